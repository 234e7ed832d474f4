//! The `get` subcommand: one page of report data in the requested format.

use clap::{Args, ValueEnum};
use gafeed_client::{AnalyticsSession, DataSet, QueryArgs, RowFormat, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// Dimension then metric columns
    Csv,
    /// `id`, `updated`, and `title` before the dimension and metric columns
    CsvLong,
    /// The whole data set, paging metadata included
    Yaml,
    /// One object per data point
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct ReportArgs {
    /// First day of the report range (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,
    /// Last day of the report range (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,
    /// Dimension names without the `ga:` prefix, comma separated
    #[arg(long, value_delimiter = ',')]
    pub dimensions: Vec<String>,
    /// Metric names without the `ga:` prefix, comma separated
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<String>,
    /// Sort fields; prefix a name with `-` for descending order
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub sort: Vec<String>,
    /// Filter expression such as `browser==Firefox`; repeat to AND filters
    #[arg(long = "filter")]
    pub filters: Vec<String>,
    /// Segment id, e.g. `gaid::-2`
    #[arg(long)]
    pub segment: Option<String>,
    #[arg(long)]
    pub start_index: Option<u32>,
    #[arg(long)]
    pub max_results: Option<u32>,
    /// Overrides `GAFEED_PROFILE_ID`
    #[arg(long)]
    pub profile_id: Option<u64>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    pub format: ReportFormat,
}

impl ReportArgs {
    pub(crate) fn to_query(&self) -> QueryArgs {
        QueryArgs {
            start_date: Some(self.start_date.clone()),
            end_date: Some(self.end_date.clone()),
            dimensions: self.dimensions.clone(),
            metrics: self.metrics.clone(),
            sort: self.sort.clone(),
            filters: self.filters.clone(),
            segment: self.segment.clone(),
            start_index: self.start_index,
            max_results: self.max_results,
        }
    }
}

/// Fetches the report and renders it.
///
/// # Errors
///
/// Returns an error if no profile id is available, the query is invalid,
/// the request fails, or rendering fails.
pub(crate) async fn run_get<T: Transport>(
    session: &mut AnalyticsSession<T>,
    args: &ReportArgs,
) -> anyhow::Result<String> {
    if let Some(profile_id) = args.profile_id {
        session.set_profile_id(profile_id);
    }
    let data = session.get(&args.to_query()).await?;
    tracing::info!(
        points = data.len(),
        total_results = data.total_results,
        start_index = data.start_index,
        "report fetched"
    );
    render(&data, args.format)
}

pub(crate) fn render(data: &DataSet, format: ReportFormat) -> anyhow::Result<String> {
    Ok(match format {
        ReportFormat::Csv => data.to_csv(RowFormat::Short)?,
        ReportFormat::CsvLong => data.to_csv(RowFormat::Long)?,
        ReportFormat::Yaml => data.to_yaml()?,
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&data.to_records())?;
            json.push('\n');
            json
        }
    })
}
