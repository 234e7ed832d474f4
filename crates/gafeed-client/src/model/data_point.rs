use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A categorical value, e.g. `browser = "Firefox"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// A numeric value, e.g. `pageviews = 42.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

/// One row of report data.
///
/// Dimensions and metrics keep the order in which the feed listed them, and
/// names carry no namespace prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: String,
    pub title: String,
    pub updated: DateTime<FixedOffset>,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
}

impl DataPoint {
    /// Value of the dimension called `name`.
    #[must_use]
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Value of the metric called `name`.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }
}
