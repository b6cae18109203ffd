//! TV recording archive module. Same catalog, same query pipeline, mounted
//! under the paths the `tv.` site expects.

use axum::{
    Json,
    extract::{Path, Query, State},
    routing::get,
};

use kinolog_core::Entry;
use kinolog_core::query::QueryResults;

use crate::errors::AppResult;
use crate::infra::app_state::AppState;

use super::movies::{ListParams, get_movie, list_movies};
use super::RouteFragment;

pub(crate) fn routes() -> Vec<RouteFragment> {
    vec![
        RouteFragment::new("/api/recordings", get(list_recordings)),
        RouteFragment::new("/api/recordings/{id}", get(get_recording)),
    ]
}

async fn list_recordings(
    state: State<AppState>,
    params: Query<ListParams>,
) -> Json<QueryResults> {
    list_movies(state, params).await
}

async fn get_recording(state: State<AppState>, id: Path<String>) -> AppResult<Json<Entry>> {
    get_movie(state, id).await
}
