//! Typed coercion of raw property values, plus headline cleanup.
//!
//! Every parser here is strict: it either accepts the whole trimmed value or
//! reports failure by returning `None`. What a failure means (dropped field
//! vs. aborted ingest) is the caller's decision.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical regex"));
static TRAILING_JUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_/]\s*$").expect("trailing junk regex"));
static YEAR_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[´']?(\d{4})").expect("year regex"));

/// Strip inline metadata from a headline: parenthetical notes, stray quote
/// characters, trailing underscores/slashes, runs of whitespace.
pub(crate) fn clean_headline(raw: &str) -> String {
    let cleaned = PARENTHETICAL.replace_all(raw, "");
    let cleaned = cleaned.replace(['´', '\''], "");
    let cleaned = TRAILING_JUNK.replace(&cleaned, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Year hint embedded in a headline, e.g. `(1964)`, `´1964` or `'2016`.
/// Only plausible release years are accepted.
pub(crate) fn headline_year_hint(raw: &str) -> Option<i32> {
    let caps = YEAR_HINT.captures(raw)?;
    let year: i32 = caps[1].parse().ok()?;
    (1920..=2025).contains(&year).then_some(year)
}

/// Stable identifier derived from a cleaned title when the document carries
/// no explicit `id` property.
pub(crate) fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub(crate) fn parse_int(value: &str) -> Option<i32> {
    value.parse().ok()
}

/// Runtimes are positive by definition; zero is as malformed as `"abc"`.
pub(crate) fn parse_runtime(value: &str) -> Option<u32> {
    value.parse().ok().filter(|minutes| *minutes > 0)
}

pub(crate) fn parse_float(value: &str) -> Option<f32> {
    value.parse().ok()
}

/// Exact-token booleans as written by the curation pipeline.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Comma-separated list into a set; duplicates vanish silently.
pub(crate) fn split_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Comma-separated alternate titles, source order preserved, minus anything
/// equal to the primary title.
pub(crate) fn split_titles(raw: &str, primary: Option<&str>) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() || Some(part) == primary {
            continue;
        }
        if titles.iter().any(|seen| seen == part) {
            continue;
        }
        titles.push(part.to_string());
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_cleanup() {
        assert_eq!(clean_headline("Der dritte Mann (1949)"), "Der dritte Mann");
        assert_eq!(clean_headline("M - Eine Stadt sucht einen Mörder ´1931"), "M - Eine Stadt sucht einen Mörder 1931");
        assert_eq!(clean_headline("Blade Runner _"), "Blade Runner");
        assert_eq!(clean_headline("  Double   Space  "), "Double Space");
    }

    #[test]
    fn year_hints_respect_plausible_range() {
        assert_eq!(headline_year_hint("Metropolis (1927)"), Some(1927));
        assert_eq!(headline_year_hint("Arrival '2016"), Some(2016));
        assert_eq!(headline_year_hint("1899 – way too early"), None);
        assert_eq!(headline_year_hint("no year here"), None);
    }

    #[test]
    fn slugs_are_stable_and_lowercase() {
        assert_eq!(slugify("Der dritte Mann"), "der-dritte-mann");
        assert_eq!(slugify("M - Eine Stadt..."), "m-eine-stadt");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn strict_parses_reject_garbage() {
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("-2"), Some(-2));
        assert_eq!(parse_int("3.5"), None);
        assert_eq!(parse_int(" 3"), None);
        assert_eq!(parse_runtime("0"), None);
        assert_eq!(parse_runtime("93"), Some(93));
        assert_eq!(parse_float("7.4"), Some(7.4));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("True"), None);
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn list_splitting_dedupes() {
        let set = split_set("Drama, Comedy,Drama , ");
        assert_eq!(set.len(), 2);
        assert!(set.contains("Comedy"));
    }

    #[test]
    fn secondary_titles_drop_the_primary() {
        let titles = split_titles("The Third Man, Der dritte Mann, The Third Man", Some("Der dritte Mann"));
        assert_eq!(titles, vec!["The Third Man".to_string()]);
    }
}
