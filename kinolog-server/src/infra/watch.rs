//! Catalog file watching: rebuild the snapshot when the source document
//! changes on disk.
//!
//! The watcher observes the document's parent directory (editors replace
//! files rather than writing in place), debounces the burst of events one
//! save produces, and then runs a guarded store reload. A failed reload
//! logs and leaves the previous snapshot serving.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::Context;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{info, warn};

use kinolog_core::{CatalogStore, IngestOptions};

const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Start watching `path` and reload `store` on changes. The watcher lives on
/// a blocking task for the rest of the process.
pub fn spawn_catalog_watcher(
    store: Arc<CatalogStore>,
    path: PathBuf,
    options: IngestOptions,
) -> anyhow::Result<()> {
    let path = path.canonicalize().unwrap_or(path);
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, rx) = std::sync::mpsc::channel::<notify::Result<Event>>();
    let mut watcher =
        notify::recommended_watcher(tx).context("failed to create filesystem watcher")?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;

    info!(path = %path.display(), "watching catalog document for changes");
    tokio::task::spawn_blocking(move || {
        // Moving the watcher in keeps it alive for the loop's lifetime.
        let _watcher = watcher;
        watch_loop(&rx, &path, &store, &options);
    });

    Ok(())
}

fn watch_loop(
    rx: &Receiver<notify::Result<Event>>,
    path: &Path,
    store: &CatalogStore,
    options: &IngestOptions,
) {
    while let Ok(event) = rx.recv() {
        match event {
            Ok(event) if touches_catalog(&event, path) => {}
            Ok(_) => continue,
            Err(err) => {
                warn!(error = %err, "filesystem watcher error");
                continue;
            }
        }

        // One save produces a burst of events; drain it before reloading.
        let deadline = Instant::now() + DEBOUNCE_WINDOW;
        loop {
            match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        match store.reload_from(path, options) {
            Ok(summary) => info!(
                entries = summary.entries,
                previous_entries = summary.previous_entries,
                "catalog reloaded after file change"
            ),
            Err(err) => warn!(
                error = %err,
                "catalog reload failed; previous snapshot remains current"
            ),
        }
    }
}

fn touches_catalog(event: &Event, path: &Path) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|touched| touched == path || touched.file_name() == path.file_name())
}
