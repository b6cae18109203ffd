//! kinolog server library: site resolution, feature-module route tables, and
//! the HTTP surface over the in-memory catalog.

pub mod errors;
pub mod infra;
pub mod middleware;
pub mod modules;
pub mod routes;
pub mod sites;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
pub use routes::create_app;
pub use sites::{SiteId, resolve_site};
