//! Store error types.
//!
//! Scanning never fails; malformed records are skipped. Only reading and
//! writing the JSON store, or running out of identifiers, can fail, and every
//! such failure is fatal to a run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving the question store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read.
    #[error("failed to read store: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a JSON array of stored questions.
    #[error("invalid store format: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory store could not be serialized.
    #[error("failed to serialize store")]
    Serialize(#[source] serde_json::Error),

    /// The store file could not be written.
    #[error("failed to write store: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store's highest identifier leaves no room for new entries.
    #[error("cannot assign identifiers after {max_id}: id space exhausted")]
    IdsExhausted { max_id: u64 },
}
