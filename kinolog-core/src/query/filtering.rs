//! Filter predicates: AND across fields, OR within a multi-valued field,
//! vacuously true for anything the query leaves unset.

use std::collections::BTreeSet;

use kinolog_model::Entry;

use super::types::ArchiveQuery;

pub(crate) fn matches(entry: &Entry, query: &ArchiveQuery) -> bool {
    intersects(&entry.genres, &query.genres)
        && intersects(&entry.actors, &query.actors)
        && intersects(&entry.countries, &query.countries)
        && director_matches(entry, query.director.as_deref())
        && search_matches(entry, query.search.as_deref())
}

/// At least one wanted value present. Values compare as authored.
fn intersects(have: &BTreeSet<String>, want: &[String]) -> bool {
    want.is_empty() || want.iter().any(|value| have.contains(value.as_str()))
}

fn director_matches(entry: &Entry, want: Option<&str>) -> bool {
    match want {
        None => true,
        Some(want) => entry.director.as_deref() == Some(want),
    }
}

/// Case-insensitive substring over every title field. An entry without any
/// title never matches a non-blank search.
fn search_matches(entry: &Entry, needle: Option<&str>) -> bool {
    let needle = match needle.map(str::trim) {
        None | Some("") => return true,
        Some(needle) => needle.to_lowercase(),
    };
    entry
        .titles()
        .any(|title| title.to_lowercase().contains(&needle))
}
