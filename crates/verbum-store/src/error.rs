use std::path::PathBuf;

/// Errors from loading a version source.
///
/// A source that simply does not exist is not an error; loaders report it as
/// `Ok(None)`. These variants describe sources that exist but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The source exists but could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but is not a recognizable book collection.
    #[error("corrupt version source {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
