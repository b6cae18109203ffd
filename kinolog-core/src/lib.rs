//! Core library for kinolog: parses the org-style catalog document into an
//! immutable snapshot and answers filter/sort/paginate queries over it.
//!
//! Nothing in this crate performs I/O beyond reading the source document, and
//! nothing here knows about HTTP. The server crate owns both edges.

pub mod catalog;
pub mod error;
pub mod ingest;
pub mod query;

pub use catalog::{Catalog, CatalogStore, ReloadSummary};
pub use error::{IngestError, Result};
pub use ingest::{CoercionMode, IngestOptions, ingest_document, parse_document};
pub use kinolog_model::{Entry, EntryId};
