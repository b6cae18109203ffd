//! The query pipeline: filter, stable sort, clamped pagination.
//!
//! Pure computation over one already-resident snapshot; nothing here blocks,
//! suspends, or fails.

mod filtering;
mod sorting;
pub mod types;

pub use types::{ArchiveQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE, QueryResults, SortBy, SortDir};

use kinolog_model::Entry;

use crate::catalog::Catalog;

/// Run `query` against `catalog`. Total on any well-formed input: pages
/// beyond the end clamp to the last page, out-of-range page sizes clamp
/// into `[1, MAX_PER_PAGE]`.
pub fn execute(catalog: &Catalog, query: &ArchiveQuery) -> QueryResults {
    let mut hits: Vec<&Entry> = catalog
        .entries()
        .iter()
        .filter(|entry| filtering::matches(entry, query))
        .collect();
    sorting::sort_entries(&mut hits, query.sort_by, query.sort_dir);

    let per_page = query.per_page.clamp(1, MAX_PER_PAGE);
    let total_count = hits.len();
    let total_pages = total_count.div_ceil(per_page as usize) as u32;
    let page = query.page.clamp(1, total_pages.max(1));

    let (items, start, end) = if total_count == 0 {
        (Vec::new(), 0, 0)
    } else {
        let offset = (page as usize - 1) * per_page as usize;
        let upper = (offset + per_page as usize).min(total_count);
        let items = hits[offset..upper].iter().map(|e| (*e).clone()).collect();
        (items, offset + 1, upper)
    };

    QueryResults {
        items,
        page,
        per_page,
        total_count,
        total_pages,
        start,
        end,
    }
}
