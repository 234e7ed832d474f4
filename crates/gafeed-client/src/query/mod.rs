//! Report request construction: arguments, filter parsing, and serialization.

mod builder;
pub mod filter;

pub use builder::{validate, QueryBuilder, FIELD_PREFIX, MAX_DIMENSIONS, MAX_METRICS};
pub use filter::{ParsedFilter, DIMENSION_OPERATORS, METRIC_OPERATORS};
pub(crate) use builder::append_api_key;

/// Arguments for one report request.
///
/// Field names are given without the `ga:` prefix. A sort name may start with
/// `-` to request descending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
    pub sort: Vec<String>,
    pub filters: Vec<String>,
    pub segment: Option<String>,
    pub start_index: Option<u32>,
    pub max_results: Option<u32>,
}

impl QueryArgs {
    /// Arguments covering `start_date..=end_date` with nothing else set.
    #[must_use]
    pub fn between(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dimensions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_metrics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_sort<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_filters<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = exprs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    #[must_use]
    pub const fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}
