use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::EntryId;

/// One catalog record: a single film with a stable identifier.
///
/// Every field except `id` is optional; the ingest layer drops blank or
/// uncoercible property values rather than inventing placeholders, so an
/// absent field always means "the source document does not say".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,

    /// Canonical display name. The curated headline (or an explicit
    /// `primary_title` property) wins over any externally supplied title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_title: Option<String>,

    /// Alternate titles (original-language, external), only those distinct
    /// from the primary title.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_titles: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,

    /// Single-valued by design; the catalog-wide director index is still a set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub genres: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub actors: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub countries: BTreeSet<String>,

    /// Curator rating on the unbounded +/- scale. Sign is direction,
    /// magnitude is intensity, zero is neutral/mixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,

    /// Advisory community rating on a 0-10 scale, externally sourced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_rating: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_confidence: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_external_id: Option<String>,

    /// Set once the enrichment pipeline has filled in external metadata.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub backfilled: bool,

    /// Flagged by the matcher when the external cross-reference is doubtful.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_review: bool,
}

impl Entry {
    /// Bare entry carrying nothing but its identifier.
    pub fn new(id: EntryId) -> Self {
        Entry {
            id,
            primary_title: None,
            secondary_titles: Vec::new(),
            year: None,
            runtime_minutes: None,
            director: None,
            genres: BTreeSet::new(),
            actors: BTreeSet::new(),
            countries: BTreeSet::new(),
            rating: None,
            external_rating: None,
            external_confidence: None,
            external_id: None,
            alt_external_id: None,
            backfilled: false,
            needs_review: false,
        }
    }

    /// All title fields, primary first. Empty for an entry with no titles.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.primary_title
            .as_deref()
            .into_iter()
            .chain(self.secondary_titles.iter().map(String::as_str))
    }
}
