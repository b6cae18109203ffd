//! Health and version endpoints, mounted on every site.

use axum::{Json, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::infra::app_state::AppState;

use super::RouteFragment;

pub(crate) fn routes() -> Vec<RouteFragment> {
    vec![
        RouteFragment::new("/healthz", get(healthz)),
        RouteFragment::new("/api/version", get(version)),
    ]
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    entries: usize,
    snapshot_built_at: DateTime<Utc>,
}

async fn healthz(State(state): State<AppState>) -> Json<Health> {
    let snapshot = state.catalog.current();
    Json(Health {
        status: "ok",
        entries: snapshot.len(),
        snapshot_built_at: snapshot.built_at,
    })
}

#[derive(Debug, Serialize)]
struct Version {
    name: &'static str,
    version: &'static str,
}

async fn version() -> Json<Version> {
    Json(Version {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
