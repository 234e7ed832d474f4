//! Rendering for the `accounts` and `segments` listings.

use gafeed_client::{Account, Segment};
use serde::Serialize;

use crate::ListFormat;

pub(crate) fn render_accounts(accounts: &[Account], format: ListFormat) -> anyhow::Result<String> {
    tracing::debug!(count = accounts.len(), "rendering accounts");
    render(accounts, format)
}

pub(crate) fn render_segments(segments: &[Segment], format: ListFormat) -> anyhow::Result<String> {
    tracing::debug!(count = segments.len(), "rendering segments");
    render(segments, format)
}

fn render<T: Serialize + ?Sized>(value: &T, format: ListFormat) -> anyhow::Result<String> {
    Ok(match format {
        ListFormat::Yaml => serde_yaml::to_string(value)?,
        ListFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<Segment> {
        vec![Segment {
            id: "gaid::-2".to_string(),
            name: "New Visitors".to_string(),
            definition: "ga:visitorType==New Visitor".to_string(),
        }]
    }

    #[test]
    fn segments_render_as_json_array() {
        let out = render_segments(&segments(), ListFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "gaid::-2");
        assert_eq!(value[0]["definition"], "ga:visitorType==New Visitor");
    }

    #[test]
    fn segments_render_as_yaml_list() {
        let out = render_segments(&segments(), ListFormat::Yaml).unwrap();
        assert!(out.starts_with("- id: "), "{out}");
        assert!(out.contains("gaid::-2"), "{out}");
        assert!(out.contains("name: New Visitors"), "{out}");
    }

    #[test]
    fn empty_listing_is_empty_json_array() {
        let out = render_accounts(&[], ListFormat::Json).unwrap();
        assert_eq!(out.trim(), "[]");
    }
}
