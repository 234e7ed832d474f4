//! Decoding of the segment feed.

use crate::error::ClientError;
use crate::feed::{Element, FeedDocument};
use crate::model::Segment;

const CONTEXT: &str = "segment feed";

/// Turns the segment feed into [`Segment`]s, one per `dxp:segment` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentCatalogBuilder;

impl SegmentCatalogBuilder {
    /// # Errors
    ///
    /// Returns [`ClientError::Xml`] for malformed XML and
    /// [`ClientError::Decode`] when a segment lacks its `id` or `name`
    /// attribute or its `dxp:definition` element.
    pub fn build(xml: &str) -> Result<Vec<Segment>, ClientError> {
        Self::build_document(&FeedDocument::parse(xml)?)
    }

    /// # Errors
    ///
    /// See [`SegmentCatalogBuilder::build`].
    pub fn build_document(doc: &FeedDocument) -> Result<Vec<Segment>, ClientError> {
        doc.elements("dxp:segment").map(decode_segment).collect()
    }
}

fn decode_segment(element: &Element) -> Result<Segment, ClientError> {
    let attr = |name: &str| {
        element
            .attr(name)
            .map(str::to_owned)
            .ok_or_else(|| ClientError::decode(CONTEXT, format!("dxp:segment has no {name}")))
    };
    let definition = element
        .find("dxp:definition")
        .ok_or_else(|| ClientError::decode(CONTEXT, "dxp:segment has no dxp:definition"))?;

    Ok(Segment {
        id: attr("id")?,
        name: attr("name")?,
        definition: definition.text().to_owned(),
    })
}
