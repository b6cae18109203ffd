//! Shared fixtures for the server integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::NamedTempFile;

use kinolog_core::{CatalogStore, IngestOptions, ingest_document};
use kinolog_server::infra::config::Config;
use kinolog_server::{AppState, create_app};

/// Three entries: two comedies (one also a drama), one without genres.
pub const SAMPLE_DOC: &str = "\
* Paris, Texas
:PROPERTIES:
:GENRES: Drama, Comedy
:DIRECTOR: Wim Wenders
:YEAR: 1984
:END:
* Arizona Dream
:PROPERTIES:
:GENRES: Comedy
:ACTORS: Johnny Depp, Faye Dunaway
:END:
* Stalker
";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    /// Keeps the temp document alive (and reloadable) for the test's duration.
    pub doc: NamedTempFile,
}

pub fn spawn_app(doc_text: &str) -> TestApp {
    let mut doc = NamedTempFile::new().unwrap();
    write!(doc, "{doc_text}").unwrap();

    let mut config = Config::default();
    config.catalog.path = doc.path().to_path_buf();
    config.catalog.watch = false;
    let config = Arc::new(config);

    let catalog = ingest_document(&config.catalog.path, &IngestOptions::default())
        .expect("test document must ingest");
    let store = Arc::new(CatalogStore::new(catalog));
    let state = AppState::new(store, config);

    let server = TestServer::new(create_app(state.clone())).expect("test server");
    TestApp { server, state, doc }
}
