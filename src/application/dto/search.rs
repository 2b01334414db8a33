use serde::Serialize;

use crate::domain::entities::ContentCategory;

/// One flattened reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub category: ContentCategory,
    pub summary: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceResults {
    pub query: String,
    pub entries: Vec<ReferenceEntry>,
    /// True when the cap cut off further matches
    pub truncated: bool,
    /// Explicit "no results" marker so clients need not infer it
    pub empty: bool,
}
