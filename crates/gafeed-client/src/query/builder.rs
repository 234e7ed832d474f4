//! Validation and wire serialization of [`QueryArgs`].

use std::fmt::Write as _;

use crate::error::ValidationError;
use crate::query::filter::{split_field, ParsedFilter};
use crate::query::QueryArgs;

/// Namespace prefix the service expects on every dimension and metric name.
pub const FIELD_PREFIX: &str = "ga:";

pub const MAX_DIMENSIONS: usize = 7;
pub const MAX_METRICS: usize = 10;

/// Builds report query strings for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    profile_id: u64,
    api_key: Option<String>,
}

impl QueryBuilder {
    #[must_use]
    pub fn new(profile_id: u64) -> Self {
        Self {
            profile_id,
            api_key: None,
        }
    }

    /// Appends `&key=<api_key>` to every built query when `Some`.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    #[must_use]
    pub fn profile_id(&self) -> u64 {
        self.profile_id
    }

    /// Validates `args` and serializes them into a query string.
    ///
    /// Parameter order is fixed: `ids`, `start-date`, `end-date`, then
    /// `start-index`, `dimensions`, `metrics`, `sort`, `segment`,
    /// `max-results`, `filters`, and finally `key`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found by [`validate`]; filters
    /// that pass validation but cannot be parsed yield
    /// [`ValidationError::InvalidFilter`].
    pub fn build(&self, args: &QueryArgs) -> Result<String, ValidationError> {
        validate(args)?;

        // validate() guarantees both dates are present.
        let start_date = args.start_date.as_deref().unwrap_or_default();
        let end_date = args.end_date.as_deref().unwrap_or_default();

        let mut output = format!(
            "ids={FIELD_PREFIX}{}&start-date={start_date}&end-date={end_date}",
            self.profile_id
        );

        if let Some(start_index) = args.start_index.filter(|&i| i > 0) {
            let _ = write!(output, "&start-index={start_index}");
        }
        if !args.dimensions.is_empty() {
            output.push_str("&dimensions=");
            output.push_str(&prefixed_list(&args.dimensions));
        }
        if !args.metrics.is_empty() {
            output.push_str("&metrics=");
            output.push_str(&prefixed_list(&args.metrics));
        }
        if !args.sort.is_empty() {
            let sort: Vec<String> = args.sort.iter().map(|s| prefixed_sort(s)).collect();
            output.push_str("&sort=");
            output.push_str(&sort.join(","));
        }
        if let Some(segment) = &args.segment {
            let _ = write!(output, "&segment={segment}");
        }
        if let Some(max_results) = args.max_results {
            let _ = write!(output, "&max-results={max_results}");
        }
        if !args.filters.is_empty() {
            let filters = args
                .filters
                .iter()
                .map(|raw| ParsedFilter::parse(raw).map(|f| f.to_query_fragment(FIELD_PREFIX)))
                .collect::<Result<Vec<_>, _>>()?;
            output.push_str("&filters=");
            output.push_str(&filters.join(";"));
        }

        Ok(append_api_key(output, self.api_key.as_deref()))
    }
}

/// Checks `args` without serializing anything.
///
/// # Errors
///
/// In order of precedence: [`ValidationError::MissingStartDate`],
/// [`ValidationError::MissingEndDate`], [`ValidationError::TooManyDimensions`],
/// [`ValidationError::TooManyMetrics`], then [`ValidationError::InvalidSort`]
/// for unknown sort fields and, separately, for unknown filter fields.
pub fn validate(args: &QueryArgs) -> Result<(), ValidationError> {
    if args.start_date.as_deref().is_none_or(str::is_empty) {
        return Err(ValidationError::MissingStartDate);
    }
    if args.end_date.as_deref().is_none_or(str::is_empty) {
        return Err(ValidationError::MissingEndDate);
    }
    if args.dimensions.len() > MAX_DIMENSIONS {
        return Err(ValidationError::TooManyDimensions {
            max: MAX_DIMENSIONS,
            got: args.dimensions.len(),
        });
    }
    if args.metrics.len() > MAX_METRICS {
        return Err(ValidationError::TooManyMetrics {
            max: MAX_METRICS,
            got: args.metrics.len(),
        });
    }

    let known = |name: &str| {
        args.dimensions.iter().any(|d| d == name) || args.metrics.iter().any(|m| m == name)
    };

    let missing_sort = unknown_names(
        args.sort.iter().map(|s| s.strip_prefix('-').unwrap_or(s)),
        known,
    );
    if !missing_sort.is_empty() {
        return Err(ValidationError::InvalidSort(format!(
            "you are trying to sort by fields that are not in the available dimensions or metrics: {}",
            missing_sort.join(", ")
        )));
    }

    // A filter with no field token is listed as written.
    let filter_fields = args.filters.iter().map(|raw| match split_field(raw).0 {
        "" => raw.as_str(),
        field => field,
    });
    let missing_filter = unknown_names(filter_fields, known);
    if !missing_filter.is_empty() {
        return Err(ValidationError::InvalidSort(format!(
            "you are trying to filter by fields that are not in the available dimensions or metrics: {}",
            missing_filter.join(", ")
        )));
    }

    Ok(())
}

/// Names rejected by `known`, deduplicated, in first-seen order.
fn unknown_names<'a>(
    names: impl Iterator<Item = &'a str>,
    known: impl Fn(&str) -> bool,
) -> Vec<&'a str> {
    let mut missing: Vec<&str> = Vec::new();
    for name in names {
        if !known(name) && !missing.contains(&name) {
            missing.push(name);
        }
    }
    missing
}

fn prefixed_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{FIELD_PREFIX}{n}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `-visits` becomes `-ga:visits`; the descending marker stays in front.
fn prefixed_sort(name: &str) -> String {
    match name.strip_prefix('-') {
        Some(rest) => format!("-{FIELD_PREFIX}{rest}"),
        None => format!("{FIELD_PREFIX}{name}"),
    }
}

/// Appends `&key=<api_key>` when a key is configured.
pub(crate) fn append_api_key(mut path_and_query: String, api_key: Option<&str>) -> String {
    if let Some(key) = api_key {
        let _ = write!(path_and_query, "&key={key}");
    }
    path_and_query
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
