//! Site-context middleware for the kinolog multi-site server.
//!
//! Resolves the request's [`SiteId`] from the Host header and attaches it as
//! a request extension. Resolution is total, so every downstream consumer can
//! rely on the extension being present.

use axum::{
    body::Body,
    extract::Request,
    http::header,
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::sites::{SiteId, resolve_site};

/// Layer attaching the resolved site to each request.
#[derive(Clone, Debug, Default)]
pub struct SiteContextLayer {
    _priv: (),
}

impl SiteContextLayer {
    pub fn new() -> Self {
        SiteContextLayer { _priv: () }
    }
}

impl<S> Layer<S> for SiteContextLayer {
    type Service = SiteContextService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SiteContextService { inner }
    }
}

/// Service half of [`SiteContextLayer`]. Pure request mutation, so the inner
/// future passes straight through.
#[derive(Clone, Debug)]
pub struct SiteContextService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for SiteContextService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let site = req
            .headers()
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(resolve_site)
            .unwrap_or(SiteId::Movies);
        req.extensions_mut().insert(site);
        self.inner.call(req)
    }
}
