use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::DataPoint;

/// One page of report data plus the paging metadata the feed reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub total_results: u64,
    pub start_index: u64,
    pub items_per_page: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub points: Vec<DataPoint>,
}

impl DataSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
