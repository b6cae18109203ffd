use std::{fmt, sync::Arc};

use kinolog_core::CatalogStore;

use crate::infra::config::Config;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(catalog: Arc<CatalogStore>, config: Arc<Config>) -> Self {
        AppState { catalog, config }
    }
}
