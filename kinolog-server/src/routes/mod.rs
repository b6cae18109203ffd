//! Startup-time route-table composition and per-request host dispatch.
//!
//! Each site's table is the concatenation of its module list; composition is
//! plain data flow over [`RouteFragment`]s, so the resulting table can be
//! inspected and tested without a running server.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::header,
    response::Response,
};
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::errors::AppError;
use crate::infra::app_state::AppState;
use crate::middleware::apply_site_chain;
use crate::modules::{RouteFragment, site_modules};
use crate::sites::{SiteId, resolve_site};

/// Register fragments in order; the first fragment for a path wins and later
/// ones are skipped, never panicking the router on a duplicate.
pub fn compose_route_table(
    fragments: impl IntoIterator<Item = RouteFragment>,
) -> Router<AppState> {
    let mut seen: HashSet<&'static str> = HashSet::new();
    let mut router = Router::new();
    for fragment in fragments {
        if !seen.insert(fragment.path) {
            debug!(path = fragment.path, "skipping shadowed route fragment");
            continue;
        }
        router = router.route(fragment.path, fragment.handler);
    }
    router
}

/// The site's registered paths in mount order, shadowed duplicates removed.
pub fn site_route_paths(site: SiteId) -> Vec<&'static str> {
    let mut seen: HashSet<&'static str> = HashSet::new();
    site_modules(site)
        .iter()
        .flat_map(|module| module.routes())
        .filter_map(|fragment| seen.insert(fragment.path).then_some(fragment.path))
        .collect()
}

/// Compose one site's table and wrap it in the fixed middleware chain.
pub fn compose_site_router(site: SiteId, state: AppState) -> Router {
    let fragments = site_modules(site)
        .iter()
        .flat_map(|module| module.routes())
        .collect::<Vec<_>>();
    let table = compose_route_table(fragments)
        .fallback(site_fallback)
        .with_state(state);
    apply_site_chain(table)
}

async fn site_fallback() -> AppError {
    AppError::not_found("no such route")
}

/// All composed site tables, built once at startup.
#[derive(Debug)]
pub struct SiteRouterSet {
    tables: HashMap<SiteId, Router>,
}

impl SiteRouterSet {
    pub fn build(state: AppState) -> Self {
        let tables = SiteId::ALL
            .into_iter()
            .map(|site| (site, compose_site_router(site, state.clone())))
            .collect();
        SiteRouterSet { tables }
    }

    pub fn table(&self, site: SiteId) -> Router {
        self.tables[&site].clone()
    }
}

async fn dispatch(State(sites): State<Arc<SiteRouterSet>>, req: Request) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let site = resolve_site(host);

    match sites.table(site).oneshot(req).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    }
}

/// The full application: host dispatch in front of the per-site tables.
pub fn create_app(state: AppState) -> Router {
    let sites = Arc::new(SiteRouterSet::build(state));
    Router::new()
        .fallback(dispatch)
        .with_state(sites)
        .layer(TraceLayer::new_for_http())
}
