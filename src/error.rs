use thiserror::Error;

/// Errors raised by [`crate::store::RecordStore`] operations.
///
/// Connection failures, malformed statements and constraint violations all
/// surface as the same kind; the wrapped driver error carries the detail.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage operation failed: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
