//! Cross-reference lookup against the person registry.
//!
//! # Responsibility
//! - Seed registry searches from parsed participant entries.
//! - Own the lookup panel's paged result set and its detail modal.
//!
//! # Invariants
//! - A result set is replaced wholesale by each applied search, never merged.
//! - Failures keep the previous result set and raise a notice.
//! - Closing the panel discards results and makes pending responses stale.

pub mod dispatcher;

use crate::model::person::PersonCriteria;
use crate::normalize::entries::SemiStructuredEntry;

impl From<&SemiStructuredEntry> for PersonCriteria {
    fn from(entry: &SemiStructuredEntry) -> Self {
        PersonCriteria::new(
            entry.name.as_deref(),
            entry.phone.as_deref(),
            entry.id_card.as_deref(),
        )
    }
}

/// Criteria from `entries[index]` (default: the primary entry).
///
/// An out-of-range index or an empty list gives blank criteria.
pub fn seed_from_entries(entries: &[SemiStructuredEntry], index: Option<usize>) -> PersonCriteria {
    entries
        .get(index.unwrap_or(0))
        .map(PersonCriteria::from)
        .unwrap_or_default()
}
