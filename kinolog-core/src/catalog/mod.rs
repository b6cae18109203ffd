//! Catalog snapshots and the process-wide snapshot store.
//!
//! A [`Catalog`] is built once per ingestion run and never mutated afterwards.
//! The [`CatalogStore`] publishes the current snapshot behind an `Arc` swap:
//! readers clone the `Arc` once per request and keep that consistent view for
//! the whole request, no matter what a concurrent reload does.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use kinolog_model::{Entry, EntryId};

use crate::error::{IngestError, Result};
use crate::ingest::{IngestOptions, ingest_document};

/// One complete, immutable materialization of the catalog.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<Entry>,
    by_id: HashMap<EntryId, usize>,
    /// Distinct values folded from all entries, for filter pickers.
    pub genres: BTreeSet<String>,
    pub actors: BTreeSet<String>,
    pub directors: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub built_at: DateTime<Utc>,
}

impl Catalog {
    /// Fold parsed entries into a snapshot, building the id index and the
    /// catalog-wide facet sets in one pass. Entries keep document order.
    pub fn build(entries: Vec<Entry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut genres = BTreeSet::new();
        let mut actors = BTreeSet::new();
        let mut directors = BTreeSet::new();
        let mut countries = BTreeSet::new();

        for (idx, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id.clone()).or_insert(idx);
            genres.extend(entry.genres.iter().cloned());
            actors.extend(entry.actors.iter().cloned());
            countries.extend(entry.countries.iter().cloned());
            if let Some(director) = &entry.director {
                directors.insert(director.clone());
            }
        }

        Catalog {
            entries,
            by_id,
            genres,
            actors,
            directors,
            countries,
            built_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Catalog::build(Vec::new())
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.by_id.get(id).map(|idx| &self.entries[*idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a successful reload, for operator feedback.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReloadSummary {
    pub entries: usize,
    pub previous_entries: usize,
}

/// Holds the current snapshot and swaps it atomically on reload.
///
/// Not a global: construct one per process (or per test) and share it via
/// `Arc`. Reloads are serialized by a build-in-progress guard; a second
/// reload starting before the first finishes gets
/// [`IngestError::ReloadInProgress`] instead of racing the install.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
    reloading: AtomicBool,
}

impl CatalogStore {
    pub fn new(initial: Catalog) -> Self {
        CatalogStore {
            current: RwLock::new(Arc::new(initial)),
            reloading: AtomicBool::new(false),
        }
    }

    pub fn empty() -> Self {
        CatalogStore::new(Catalog::empty())
    }

    /// The snapshot to use for one whole request.
    pub fn current(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Install `next` as the current snapshot, returning the superseded one.
    pub fn replace(&self, next: Catalog) -> Arc<Catalog> {
        let next = Arc::new(next);
        match self.current.write() {
            Ok(mut guard) => std::mem::replace(&mut *guard, next),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), next),
        }
    }

    /// Claim the build-in-progress guard, released on drop.
    pub fn begin_reload(&self) -> Result<ReloadGuard<'_>> {
        if self
            .reloading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(IngestError::ReloadInProgress);
        }
        Ok(ReloadGuard { store: self })
    }

    /// Build a fresh snapshot off to the side and install it in one swap.
    /// On any ingest failure the previous snapshot stays current and serving.
    pub fn reload_from(&self, path: &Path, options: &IngestOptions) -> Result<ReloadSummary> {
        let _guard = self.begin_reload()?;
        let next = ingest_document(path, options)?;
        let entries = next.len();
        let previous = self.replace(next);
        info!(
            entries,
            previous_entries = previous.len(),
            path = %path.display(),
            "catalog snapshot installed"
        );
        Ok(ReloadSummary {
            entries,
            previous_entries: previous.len(),
        })
    }
}

/// RAII token proving this thread owns the in-progress reload.
#[derive(Debug)]
pub struct ReloadGuard<'a> {
    store: &'a CatalogStore,
}

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.store.reloading.store(false, Ordering::Release);
    }
}
