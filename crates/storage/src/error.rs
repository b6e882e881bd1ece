//! Storage error types.

use thiserror::Error;

/// Failure talking to the save file. Malformed content never raises one of
/// these; the loader falls back to defaults instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save state serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
