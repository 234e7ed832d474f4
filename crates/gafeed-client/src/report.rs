//! Decoding of report data feeds into [`DataSet`]s.

use crate::error::ClientError;
use crate::feed::{self, FeedDocument, FeedEntry, DIMENSION, METRIC};
use crate::model::{DataPoint, DataSet, Dimension, Metric};

const CONTEXT: &str = "data feed";

/// Turns a data feed into a [`DataSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportResultDecoder;

impl ReportResultDecoder {
    /// Parses and decodes a raw data feed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Xml`] for malformed XML and
    /// [`ClientError::Decode`] when paging metadata is missing or a date,
    /// timestamp, or metric value does not parse.
    pub fn decode(xml: &str) -> Result<DataSet, ClientError> {
        Self::decode_document(&FeedDocument::parse(xml)?)
    }

    /// Decodes an already-parsed data feed.
    ///
    /// # Errors
    ///
    /// See [`ReportResultDecoder::decode`].
    pub fn decode_document(doc: &FeedDocument) -> Result<DataSet, ClientError> {
        let points = doc
            .entries()
            .map(decode_point)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DataSet {
            total_results: feed::parse_number(doc.require_text("openSearch:totalResults")?, CONTEXT)?,
            start_index: feed::parse_number(doc.require_text("openSearch:startIndex")?, CONTEXT)?,
            items_per_page: feed::parse_number(doc.require_text("openSearch:itemsPerPage")?, CONTEXT)?,
            start_date: feed::parse_date(doc.require_text("dxp:startDate")?, CONTEXT)?,
            end_date: feed::parse_date(doc.require_text("dxp:endDate")?, CONTEXT)?,
            points,
        })
    }
}

fn decode_point(entry: FeedEntry<'_>) -> Result<DataPoint, ClientError> {
    let dimensions = entry
        .fields(DIMENSION)
        .map(|(name, value)| Dimension {
            name: name.to_owned(),
            value: value.to_owned(),
        })
        .collect();

    let metrics = entry
        .fields(METRIC)
        .map(|(name, value)| {
            Ok(Metric {
                name: name.to_owned(),
                value: feed::parse_number(value, CONTEXT)?,
            })
        })
        .collect::<Result<Vec<_>, ClientError>>()?;

    Ok(DataPoint {
        id: entry.id().to_owned(),
        title: entry.title().to_owned(),
        updated: feed::parse_timestamp(entry.updated(), CONTEXT)?,
        dimensions,
        metrics,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_paging_metadata_and_points() {
        let set = ReportResultDecoder::decode(&fixtures::data_feed(5, 5, 5)).unwrap();
        assert_eq!(set.total_results, 5);
        assert_eq!(set.start_index, 5);
        assert_eq!(set.items_per_page, 5);
        assert_eq!(set.start_date.to_string(), "2010-01-01");
        assert_eq!(set.end_date.to_string(), "2010-01-31");
        assert_eq!(set.points.len(), 5);
        assert_eq!(set.points[0].title, "ga:date=20100105");
    }

    #[test]
    fn names_lose_prefix_and_metrics_are_floats() {
        let set = ReportResultDecoder::decode(&fixtures::data_feed(5, 1, 2)).unwrap();
        let point = &set.points[1];
        assert_eq!(point.dimension("date"), Some("20100106"));
        assert_eq!(point.metric("pageviews"), Some(101.0));
        assert_eq!(point.metrics.len(), 1);
        assert!(point.id.contains("ga:date=20100106"));
        assert_eq!(point.updated.to_rfc3339(), "2010-01-06T16:00:00-08:00");
    }

    #[test]
    fn field_order_follows_the_entry() {
        let xml = r#"<feed xmlns:openSearch="o" xmlns:dxp="d">
  <openSearch:totalResults>1</openSearch:totalResults>
  <openSearch:startIndex>1</openSearch:startIndex>
  <openSearch:itemsPerPage>1</openSearch:itemsPerPage>
  <dxp:startDate>2010-01-01</dxp:startDate>
  <dxp:endDate>2010-01-02</dxp:endDate>
  <entry>
    <id>x</id><updated>2010-01-01T00:00:00Z</updated><title>t</title>
    <dxp:dimension name="ga:source" value="google"/>
    <dxp:metric name="ga:visits" value="3"/>
    <dxp:dimension name="ga:medium" value="organic"/>
    <dxp:metric name="ga:bounces" value="1.5"/>
  </entry>
</feed>"#;
        let set = ReportResultDecoder::decode(xml).unwrap();
        let point = &set.points[0];
        let dims: Vec<_> = point.dimensions.iter().map(|d| d.name.as_str()).collect();
        let metrics: Vec<_> = point.metrics.iter().map(|m| (m.name.as_str(), m.value)).collect();
        assert_eq!(dims, vec!["source", "medium"]);
        assert_eq!(metrics, vec![("visits", 3.0), ("bounces", 1.5)]);
    }

    #[test]
    fn empty_feed_has_no_points() {
        let set = ReportResultDecoder::decode(&fixtures::data_feed(0, 1, 0)).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.total_results, 0);
    }

    #[test]
    fn non_numeric_metric_is_a_decode_error() {
        let xml = fixtures::data_feed(1, 1, 1).replace(r#"value="100""#, r#"value="lots""#);
        let err = ReportResultDecoder::decode(&xml).unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn missing_paging_metadata_is_a_decode_error() {
        let err = ReportResultDecoder::decode("<feed><entry/></feed>").unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
    }
}
