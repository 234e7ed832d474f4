use serde::{Deserialize, Serialize};

/// A named, reusable traffic segment.
///
/// `definition` is the service's predicate expression, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub name: String,
    pub definition: String,
}
