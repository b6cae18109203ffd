//! Site-specific defaults, attached after the site context is resolved.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::sites::SiteId;

/// Per-site presentation defaults for downstream handlers.
#[derive(Debug, Clone, Copy)]
pub struct SiteDefaults {
    pub site: SiteId,
    pub display_name: &'static str,
}

/// Attach [`SiteDefaults`] to the request and stamp the serving site onto
/// the response so operators can see which table answered.
pub async fn attach_defaults(mut req: Request, next: Next) -> Response {
    let site = req
        .extensions()
        .get::<SiteId>()
        .copied()
        .unwrap_or(SiteId::Movies);
    req.extensions_mut().insert(SiteDefaults {
        site,
        display_name: site.display_name(),
    });

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert("x-archive-site", HeaderValue::from_static(site.slug()));
    response
}
