use serde::{Deserialize, Serialize};

use kinolog_model::Entry;

pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 200;

/// One query over the current snapshot: optional filters plus ordering and
/// paging directives. Every field has a total, defaulted interpretation, so
/// there is no invalid `ArchiveQuery`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveQuery {
    /// OR within the list, AND against the other filter fields.
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub countries: Vec<String>,
    /// Exact match against the entry's single director.
    pub director: Option<String>,
    /// Case-insensitive substring over all title fields.
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ArchiveQuery {
    fn default() -> Self {
        ArchiveQuery {
            genres: Vec::new(),
            actors: Vec::new(),
            countries: Vec::new(),
            director: None,
            search: None,
            sort_by: SortBy::default(),
            sort_dir: SortDir::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Fields available for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Title,
    Year,
    Rating,
    ExternalRating,
}

impl SortBy {
    /// Total parse for the request surface: unknown tokens fall back to the
    /// default sort field instead of erroring.
    pub fn from_param(raw: &str) -> SortBy {
        match raw {
            "year" => SortBy::Year,
            "rating" => SortBy::Rating,
            "external_rating" => SortBy::ExternalRating,
            _ => SortBy::Title,
        }
    }
}

/// Sort direction. `Desc` reverses the non-null ordering only; entries
/// missing the sort field stay last either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn from_param(raw: &str) -> SortDir {
        match raw {
            "desc" => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }
}

/// One page of results plus the numbers a listing needs for "showing X-Y of N".
#[derive(Debug, Clone, Serialize)]
pub struct QueryResults {
    pub items: Vec<Entry>,
    pub page: u32,
    pub per_page: u32,
    pub total_count: usize,
    pub total_pages: u32,
    /// 1-based display bounds; both 0 when nothing matched.
    pub start: usize,
    pub end: usize,
}
