//! Document ingestion: outline text in, typed catalog entries out.
//!
//! Ingestion is all-or-nothing. A structural problem in the document (or any
//! coercion failure when running strict) aborts the build and leaves whatever
//! snapshot is currently installed untouched.

mod coerce;
mod outline;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::warn;

use kinolog_model::{Entry, EntryId};

use crate::catalog::Catalog;
use crate::error::{IngestError, Result};
use outline::OutlineEntry;

/// What to do when a property value fails its typed coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionMode {
    /// Drop the field, log a warning, keep the entry. Mirrors the tolerance
    /// of the original curation pipeline for half-finished entries.
    #[default]
    Lenient,
    /// Abort the whole ingest on the first uncoercible value.
    Strict,
}

/// Knobs for one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub mode: CoercionMode,
}

/// Read and parse the document at `path` into a fresh catalog snapshot.
pub fn ingest_document(path: &Path, options: &IngestOptions) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)?;
    let entries = parse_document(&text, options)?;
    Ok(Catalog::build(entries))
}

/// Parse already-loaded document text into entries, document order preserved.
pub fn parse_document(text: &str, options: &IngestOptions) -> Result<Vec<Entry>> {
    let raw_entries = outline::parse_outline(text)?;
    let mut entries = Vec::with_capacity(raw_entries.len());
    let mut seen: HashSet<EntryId> = HashSet::with_capacity(raw_entries.len());

    for raw in raw_entries {
        let entry = build_entry(raw, options)?;
        if !seen.insert(entry.id.clone()) {
            return Err(IngestError::DuplicateId(entry.id.to_string()));
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Keys the curation pipeline wrote under their external names.
fn canonical_key(key: &str) -> &str {
    match key {
        "original_title" => "secondary_titles",
        "tmdb_rating" => "external_rating",
        "tmdb_id" => "external_id",
        "imdb_id" => "alt_external_id",
        other => other,
    }
}

fn build_entry(raw: OutlineEntry, options: &IngestOptions) -> Result<Entry> {
    let OutlineEntry {
        line,
        headline,
        properties,
    } = raw;

    // Blank values count as absent; the first occurrence of a key wins.
    let mut props: HashMap<String, String> = HashMap::with_capacity(properties.len());
    for (key, value) in properties {
        if value.is_empty() {
            continue;
        }
        props.entry(canonical_key(&key).to_string()).or_insert(value);
    }

    let cleaned = coerce::clean_headline(&headline);
    let primary_title = props.remove("primary_title").or_else(|| {
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.clone())
        }
    });

    let raw_id = props
        .remove("id")
        .unwrap_or_else(|| coerce::slugify(&cleaned));
    let id = EntryId::new(raw_id).map_err(|_| IngestError::Malformed {
        line,
        reason: format!("entry {headline:?} has neither an id property nor a usable title"),
    })?;

    let mut entry = Entry::new(id);
    entry.primary_title = primary_title;

    if let Some(value) = props.remove("secondary_titles") {
        entry.secondary_titles = coerce::split_titles(&value, entry.primary_title.as_deref());
    }
    if let Some(value) = props.remove("year") {
        entry.year = coerce_field(options.mode, &entry.id, "year", &value, coerce::parse_int)?;
    }
    // The headline often carries the year when the drawer does not.
    entry.year = entry.year.or_else(|| coerce::headline_year_hint(&headline));

    if let Some(value) = props.remove("runtime_minutes") {
        entry.runtime_minutes = coerce_field(
            options.mode,
            &entry.id,
            "runtime_minutes",
            &value,
            coerce::parse_runtime,
        )?;
    }
    entry.director = props.remove("director");
    if let Some(value) = props.remove("genres") {
        entry.genres = coerce::split_set(&value);
    }
    if let Some(value) = props.remove("actors") {
        entry.actors = coerce::split_set(&value);
    }
    if let Some(value) = props.remove("countries") {
        entry.countries = coerce::split_set(&value);
    }
    if let Some(value) = props.remove("rating") {
        entry.rating = coerce_field(options.mode, &entry.id, "rating", &value, coerce::parse_int)?;
    }
    if let Some(value) = props.remove("external_rating") {
        entry.external_rating = coerce_field(
            options.mode,
            &entry.id,
            "external_rating",
            &value,
            coerce::parse_float,
        )?;
    }
    if let Some(value) = props.remove("external_confidence") {
        entry.external_confidence = coerce_field(
            options.mode,
            &entry.id,
            "external_confidence",
            &value,
            coerce::parse_float,
        )?;
    }
    entry.external_id = props.remove("external_id");
    entry.alt_external_id = props.remove("alt_external_id");

    if let Some(value) = props.remove("backfilled") {
        entry.backfilled =
            coerce_field(options.mode, &entry.id, "backfilled", &value, coerce::parse_bool)?
                .unwrap_or(false);
    }
    if let Some(value) = props.remove("needs_review") {
        entry.needs_review = coerce_field(
            options.mode,
            &entry.id,
            "needs_review",
            &value,
            coerce::parse_bool,
        )?
        .unwrap_or(false);
    }

    // Unrecognized keys (curation bookkeeping, production notes) are ignored.
    Ok(entry)
}

fn coerce_field<T>(
    mode: CoercionMode,
    id: &EntryId,
    key: &str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match parse(value) {
        Some(parsed) => Ok(Some(parsed)),
        None => match mode {
            CoercionMode::Lenient => {
                warn!(entry = %id, key, value, "dropping unparseable property value");
                Ok(None)
            }
            CoercionMode::Strict => Err(IngestError::Field {
                id: id.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            }),
        },
    }
}
