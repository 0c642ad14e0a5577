use std::path::PathBuf;

/// All errors that can be returned by a HistoryStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Keys become file names, so they are restricted to `[A-Za-z0-9._-]`.
    #[error("invalid storage key: {key:?}")]
    InvalidKey { key: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A backend-specific failure (poisoned lock, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
