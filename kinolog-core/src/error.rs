use thiserror::Error;

/// Failures while building a catalog snapshot from the source document.
///
/// Every variant aborts the build as a whole; a partially ingested catalog
/// would leave the derived filter indices inconsistent with the entries map,
/// so there is no partial-success mode.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read catalog document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("duplicate entry id: {0}")]
    DuplicateId(String),

    /// Strict mode only. In lenient mode the same condition downgrades to a
    /// logged warning and the field stays absent.
    #[error("entry {id}: cannot coerce property {key} from {value:?}")]
    Field {
        id: String,
        key: String,
        value: String,
    },

    #[error("a catalog reload is already in progress")]
    ReloadInProgress,
}

pub type Result<T> = std::result::Result<T, IngestError>;
