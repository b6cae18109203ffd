//! The fixed middleware chain wrapped around every composed site table.
//!
//! Request order is significant: the site context must exist before the
//! site-defaults middleware reads it, and path coercion has to happen before
//! route matching. Axum's `Router::layer` runs middleware only after a route
//! has matched, so the chain is applied around the whole table as a service
//! instead; `apply_site_chain` owns both the wrapping and the ordering.

pub mod coercion;
pub mod site_context;
pub mod site_defaults;

pub use site_context::SiteContextLayer;

use axum::Router;
use tower::ServiceBuilder;

/// Wrap a fully composed (stated) route table in the chain:
/// site context -> site defaults -> coercion -> routing.
pub fn apply_site_chain(table: Router) -> Router {
    let chained = ServiceBuilder::new()
        .layer(SiteContextLayer::new())
        .layer(axum::middleware::from_fn(site_defaults::attach_defaults))
        .layer(axum::middleware::from_fn(coercion::coerce_request))
        .service(table);
    Router::new().fallback_service(chained)
}
