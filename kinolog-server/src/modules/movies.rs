//! The film archive module: catalog listing, entry detail, facet sets, and
//! the operator-facing reload trigger.

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use kinolog_core::query::{self, ArchiveQuery, DEFAULT_PER_PAGE, QueryResults, SortBy, SortDir};
use kinolog_core::{Entry, ReloadSummary};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

use super::RouteFragment;

pub(crate) fn routes() -> Vec<RouteFragment> {
    vec![
        RouteFragment::new("/api/movies", get(list_movies)),
        RouteFragment::new("/api/movies/{id}", get(get_movie)),
        RouteFragment::new("/api/facets", get(get_facets)),
        RouteFragment::new("/api/catalog/reload", post(reload_catalog)),
    ]
}

/// Raw listing parameters as they arrive on the query string. Everything is
/// optional; translation into an [`ArchiveQuery`] is total.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub genre: Option<String>,
    pub actor: Option<String>,
    pub country: Option<String>,
    pub director: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListParams {
    /// Multi-valued filters arrive comma-separated; blanks are dropped and
    /// unknown sort tokens fall back to the defaults.
    pub fn into_query(self) -> ArchiveQuery {
        ArchiveQuery {
            genres: split_csv(self.genre),
            actors: split_csv(self.actor),
            countries: split_csv(self.country),
            director: non_blank(self.director),
            search: non_blank(self.search),
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortBy::from_param)
                .unwrap_or_default(),
            sort_dir: self
                .sort_dir
                .as_deref()
                .map(SortDir::from_param)
                .unwrap_or_default(),
            page: self.page.unwrap_or(1),
            per_page: self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        }
    }
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(crate) async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<QueryResults> {
    let snapshot = state.catalog.current();
    Json(query::execute(&snapshot, &params.into_query()))
}

pub(crate) async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Entry>> {
    let snapshot = state.catalog.current();
    snapshot
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no catalog entry with id {id}")))
}

/// Distinct filterable values of the current snapshot.
#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub genres: BTreeSet<String>,
    pub actors: BTreeSet<String>,
    pub directors: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

async fn get_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    let snapshot = state.catalog.current();
    Json(FacetsResponse {
        genres: snapshot.genres.clone(),
        actors: snapshot.actors.clone(),
        directors: snapshot.directors.clone(),
        countries: snapshot.countries.clone(),
    })
}

/// Rebuild the snapshot from the source document. A failed rebuild leaves
/// the current snapshot serving; a rebuild already in flight answers 409.
async fn reload_catalog(State(state): State<AppState>) -> AppResult<Json<ReloadSummary>> {
    let store = state.catalog.clone();
    let path = state.config.catalog.path.clone();
    let options = state.config.catalog.ingest_options();

    let summary = tokio::task::spawn_blocking(move || store.reload_from(&path, &options))
        .await
        .map_err(|err| AppError::internal(format!("reload task failed: {err}")))??;

    Ok(Json(summary))
}
