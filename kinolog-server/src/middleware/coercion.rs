//! Request/response coercion: canonicalize the request path before routing
//! and mark responses as host-dependent.

use axum::{
    extract::Request,
    http::{HeaderValue, Uri, header, uri::PathAndQuery},
    middleware::Next,
    response::Response,
};

/// `/api/movies/` and `/api/movies` must dispatch identically; route tables
/// only register the canonical form. Responses gain `Vary: Host` because the
/// same path answers differently per site.
pub async fn coerce_request(mut req: Request, next: Next) -> Response {
    if let Some(uri) = canonicalized(req.uri()) {
        *req.uri_mut() = uri;
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("host"));
    response
}

fn canonicalized(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    if path.len() <= 1 || !path.ends_with('/') {
        return None;
    }

    let trimmed = path.trim_end_matches('/');
    let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
    let path_and_query = match uri.query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes_only() {
        let uri: Uri = "/api/movies/?page=2".parse().unwrap();
        let coerced = canonicalized(&uri).unwrap();
        assert_eq!(coerced.path(), "/api/movies");
        assert_eq!(coerced.query(), Some("page=2"));

        assert!(canonicalized(&"/api/movies".parse().unwrap()).is_none());
        assert!(canonicalized(&"/".parse().unwrap()).is_none());
    }
}
