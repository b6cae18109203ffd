//! Legal pages, mounted on every site. Content is plain structured data;
//! rendering belongs to whichever frontend consumes it.

use axum::{Extension, Json, routing::get};
use serde::Serialize;

use crate::middleware::site_defaults::SiteDefaults;
use crate::sites::SiteId;

use super::RouteFragment;

pub(crate) fn routes() -> Vec<RouteFragment> {
    vec![
        RouteFragment::new("/legal/imprint", get(imprint)),
        RouteFragment::new("/legal/privacy", get(privacy)),
    ]
}

#[derive(Debug, Serialize)]
struct LegalPage {
    site: SiteId,
    site_name: &'static str,
    page: &'static str,
}

async fn imprint(Extension(defaults): Extension<SiteDefaults>) -> Json<LegalPage> {
    Json(LegalPage {
        site: defaults.site,
        site_name: defaults.display_name,
        page: "imprint",
    })
}

async fn privacy(Extension(defaults): Extension<SiteDefaults>) -> Json<LegalPage> {
    Json(LegalPage {
        site: defaults.site,
        site_name: defaults.display_name,
        page: "privacy",
    })
}
