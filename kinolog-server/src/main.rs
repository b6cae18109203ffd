//! # kinolog Server
//!
//! Multi-site archive server over an in-memory film catalog.
//!
//! ## Overview
//!
//! One process serves several logical sites, selected per request by the
//! inbound host:
//!
//! - **Film archive** (default): the org-outline catalog behind a
//!   filter/sort/paginate query API
//! - **TV archive** (`tv.` hosts): the same catalog under the recording paths
//! - **One-time secrets** (`ots.` hosts): descriptor frontend for the
//!   external vault
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - An atomically swapped in-memory snapshot instead of a database
//! - notify for reload-on-change of the source document
//! - Startup-time route-table composition from shared feature modules

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinolog_core::{CatalogStore, ingest_document};
use kinolog_server::infra::config::ConfigLoader;
use kinolog_server::infra::watch::spawn_catalog_watcher;
use kinolog_server::{AppState, create_app};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "kinolog-server")]
#[command(about = "Multi-site archive server over an org-outline film catalog")]
struct Cli {
    /// Path to the catalog document (overrides config)
    #[arg(long, env = "KINOLOG_CATALOG")]
    catalog: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "KINOLOG_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "KINOLOG_HOST")]
    host: Option<String>,

    /// Disable the catalog file watcher
    #[arg(long, default_value_t = false)]
    no_watch: bool,

    /// Abort ingestion on the first uncoercible property value
    #[arg(long, default_value_t = false)]
    strict_fields: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;
    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if cli.no_watch {
        config.catalog.watch = false;
    }
    if cli.strict_fields {
        config.catalog.strict_fields = true;
    }
    let config = Arc::new(config);

    // Without a previous snapshot to fall back on, a broken document at
    // startup is fatal.
    let options = config.catalog.ingest_options();
    let catalog = ingest_document(&config.catalog.path, &options)
        .context("initial catalog ingestion failed")?;
    info!(
        entries = catalog.len(),
        path = %config.catalog.path.display(),
        "catalog loaded"
    );
    let store = Arc::new(CatalogStore::new(catalog));

    if config.catalog.watch {
        spawn_catalog_watcher(Arc::clone(&store), config.catalog.path.clone(), options)?;
    }

    let state = AppState::new(store, Arc::clone(&config));
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "kinolog listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
