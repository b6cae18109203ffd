//! One-time-secrets site module. The vault itself is an external
//! collaborator; this module only fronts the site with a service descriptor.

use axum::{Json, routing::get};
use serde::Serialize;

use super::RouteFragment;

pub(crate) fn routes() -> Vec<RouteFragment> {
    vec![RouteFragment::new("/api/status", get(status))]
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    service: &'static str,
    vault: &'static str,
    ready: bool,
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "one-time-secrets",
        vault: "external",
        ready: true,
    })
}
