//! Reference Search - keyword search over the flattened rules reference

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::{ReferenceEntry, ReferenceResults};
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::ContentRecord;

/// Maximum number of entries a single search returns
pub const REFERENCE_LIMIT: usize = 100;

pub struct ReferenceSearchService {
    content: Arc<dyn ContentRepositoryPort>,
}

impl ReferenceSearchService {
    pub fn new(content: Arc<dyn ContentRepositoryPort>) -> Self {
        Self { content }
    }

    /// Case-insensitive substring match against name, summary and
    /// description, in catalog order. A blank query matches everything.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> ReferenceResults {
        let needle = query.trim().to_lowercase();
        let mut matches = self
            .content
            .reference_records()
            .into_iter()
            .map(to_entry)
            .filter(|entry| needle.is_empty() || entry_matches(entry, &needle));

        let entries: Vec<ReferenceEntry> = matches.by_ref().take(REFERENCE_LIMIT).collect();
        let truncated = matches.next().is_some();
        debug!(results = entries.len(), truncated, "Reference search");

        ReferenceResults {
            query: query.to_string(),
            empty: entries.is_empty(),
            truncated,
            entries,
        }
    }
}

fn to_entry(record: ContentRecord<'_>) -> ReferenceEntry {
    ReferenceEntry {
        name: record.name().to_string(),
        category: record.category(),
        summary: record.summary(),
        description: record.description().to_string(),
    }
}

fn entry_matches(entry: &ReferenceEntry, needle: &str) -> bool {
    entry.name.to_lowercase().contains(needle)
        || entry.summary.to_lowercase().contains(needle)
        || entry.description.to_lowercase().contains(needle)
}
