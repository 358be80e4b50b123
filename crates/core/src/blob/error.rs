//! Blob error types.

use blobrow_shared::AppError;
use thiserror::Error;

/// Blob storage errors.
///
/// Absence is never an error on the read path; fetching an unknown
/// identifier yields an empty handle.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Owner accessor called on a handle with no record.
    #[error("no stored blob attached to this handle")]
    MissingRecord,

    /// Uploader produced no identifier for the file.
    #[error("uploader did not provide an identifier")]
    MissingIdentifier,

    /// Payload size does not fit the size column.
    #[error("payload size {0} bytes exceeds the storable maximum")]
    SizeOverflow(u64),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl BlobError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<BlobError> for AppError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::MissingRecord => Self::NotFound(err.to_string()),
            BlobError::MissingIdentifier => Self::Validation(err.to_string()),
            BlobError::SizeOverflow(_) => Self::PayloadTooLarge(err.to_string()),
            BlobError::Repository(msg) => Self::Database(msg),
        }
    }
}
