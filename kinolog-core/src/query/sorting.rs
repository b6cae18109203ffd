//! Stable comparators for the sortable fields.
//!
//! Entries missing the sort field always land after all entries that have
//! it, in both directions; only the ordering among present values flips.

use std::cmp::Ordering;

use kinolog_model::Entry;

use super::types::{SortBy, SortDir};

pub(crate) fn sort_entries(entries: &mut [&Entry], sort_by: SortBy, sort_dir: SortDir) {
    entries.sort_by(|a, b| compare(a, b, sort_by, sort_dir));
}

fn compare(a: &Entry, b: &Entry, sort_by: SortBy, sort_dir: SortDir) -> Ordering {
    match sort_by {
        SortBy::Title => cmp_present(
            a.primary_title.as_deref().map(str::to_lowercase),
            b.primary_title.as_deref().map(str::to_lowercase),
            Ord::cmp,
            sort_dir,
        ),
        SortBy::Year => cmp_present(a.year, b.year, Ord::cmp, sort_dir),
        SortBy::Rating => cmp_present(a.rating, b.rating, Ord::cmp, sort_dir),
        SortBy::ExternalRating => cmp_present(
            a.external_rating,
            b.external_rating,
            |x, y| x.total_cmp(y),
            sort_dir,
        ),
    }
}

fn cmp_present<T>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
    dir: SortDir,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = cmp(&a, &b);
            match dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
