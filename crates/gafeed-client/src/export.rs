//! Tabular, YAML, and JSON views of report data.

use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::model::{DataPoint, DataSet};

/// Column layout for [`DataSet::to_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowFormat {
    /// Dimension values then metric values.
    #[default]
    Short,
    /// `id`, `updated`, and `title` before the short columns.
    Long,
}

const LONG_COLUMNS: [&str; 3] = ["id", "updated", "title"];

impl DataPoint {
    /// This point's values in [`RowFormat`] column order.
    #[must_use]
    pub fn to_row(&self, format: RowFormat) -> Vec<String> {
        let mut row = Vec::with_capacity(3 + self.dimensions.len() + self.metrics.len());
        if format == RowFormat::Long {
            row.push(self.id.clone());
            row.push(self.updated.to_rfc3339());
            row.push(self.title.clone());
        }
        row.extend(self.dimensions.iter().map(|d| d.value.clone()));
        row.extend(self.metrics.iter().map(|m| metric_cell(m.value)));
        row
    }

    /// Dimension and metric values keyed by name.
    #[must_use]
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        for d in &self.dimensions {
            record.insert(d.name.clone(), Value::String(d.value.clone()));
        }
        for m in &self.metrics {
            record.insert(m.name.clone(), serde_json::json!(m.value));
        }
        Value::Object(record)
    }
}

/// Metric values always carry a decimal point: `100.0`, `0.25`.
fn metric_cell(value: f64) -> String {
    format!("{value:?}")
}

impl DataSet {
    /// A header row followed by one row per point.
    ///
    /// Header names come from the first point; with no points the header
    /// holds only the `Long` columns (or nothing for `Short`).
    #[must_use]
    pub fn to_rows(&self, format: RowFormat) -> Vec<Vec<String>> {
        let mut header: Vec<String> = Vec::new();
        if format == RowFormat::Long {
            header.extend(LONG_COLUMNS.iter().map(|c| (*c).to_owned()));
        }
        if let Some(first) = self.points.first() {
            header.extend(first.dimensions.iter().map(|d| d.name.clone()));
            header.extend(first.metrics.iter().map(|m| m.name.clone()));
        }

        let mut rows = Vec::with_capacity(self.points.len() + 1);
        rows.push(header);
        rows.extend(self.points.iter().map(|p| p.to_row(format)));
        rows
    }

    /// [`DataSet::to_rows`] rendered as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Export`] if the CSV writer fails.
    pub fn to_csv(&self, format: RowFormat) -> Result<String, ClientError> {
        let export_err = |reason: String| ClientError::Export { reason };

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        for row in self.to_rows(format) {
            writer
                .write_record(&row)
                .map_err(|e| export_err(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| export_err(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| export_err(e.to_string()))
    }

    /// The whole data set, paging metadata included, as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Export`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ClientError> {
        serde_yaml::to_string(self).map_err(|e| ClientError::Export {
            reason: e.to_string(),
        })
    }

    /// One [`DataPoint::to_record`] object per point.
    #[must_use]
    pub fn to_records(&self) -> Vec<Value> {
        self.points.iter().map(DataPoint::to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{fixtures, ReportResultDecoder};

    fn data_set() -> DataSet {
        ReportResultDecoder::decode(&fixtures::data_feed(2, 1, 2)).unwrap()
    }

    #[test]
    fn short_rows_have_header_then_values() {
        let rows = data_set().to_rows(RowFormat::Short);
        assert_eq!(
            rows,
            vec![
                vec!["date".to_owned(), "pageviews".to_owned()],
                vec!["20100105".to_owned(), "100.0".to_owned()],
                vec!["20100106".to_owned(), "101.0".to_owned()],
            ]
        );
    }

    #[test]
    fn long_rows_prepend_entry_metadata() {
        let rows = data_set().to_rows(RowFormat::Long);
        assert_eq!(rows[0], vec!["id", "updated", "title", "date", "pageviews"]);
        assert_eq!(rows[1][1], "2010-01-05T16:00:00-08:00");
        assert_eq!(rows[1][2], "ga:date=20100105");
        assert_eq!(rows[1].len(), 5);
    }

    #[test]
    fn empty_set_has_header_only() {
        let set = ReportResultDecoder::decode(&fixtures::data_feed(0, 1, 0)).unwrap();
        assert_eq!(set.to_rows(RowFormat::Short), vec![Vec::<String>::new()]);
        assert_eq!(set.to_rows(RowFormat::Long).len(), 1);
        assert_eq!(set.to_rows(RowFormat::Long)[0].len(), 3);
    }

    #[test]
    fn csv_renders_header_and_rows() {
        let csv = data_set().to_csv(RowFormat::Long).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,updated,title,date,pageviews"));
        let first = lines.next().unwrap();
        assert!(first.ends_with(",ga:date=20100105,20100105,100.0"), "{first}");
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn metric_cells_keep_a_decimal_point() {
        assert_eq!(metric_cell(100.0), "100.0");
        assert_eq!(metric_cell(0.0), "0.0");
        assert_eq!(metric_cell(12.5), "12.5");
        assert_eq!(metric_cell(0.25), "0.25");
    }

    #[test]
    fn yaml_contains_paging_metadata() {
        let yaml = data_set().to_yaml().unwrap();
        assert!(yaml.contains("total_results: 2"), "{yaml}");
        assert!(yaml.contains("points:"), "{yaml}");
    }

    #[test]
    fn records_merge_dimensions_and_metrics() {
        let records = data_set().to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["date"], "20100105");
        assert_eq!(records[0]["pageviews"], 100.0);
    }
}
