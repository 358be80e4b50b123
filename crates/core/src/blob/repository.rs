//! Repository contract for blob persistence.

use uuid::Uuid;

use super::error::BlobError;
use super::types::{NewBlob, StoredBlob};

/// Repository trait for blob persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait BlobRepository: Send + Sync {
    /// Insert a blob, or overwrite the row already stored under the same identifier.
    fn create_or_replace(
        &self,
        input: NewBlob,
    ) -> impl std::future::Future<Output = Result<StoredBlob, BlobError>> + Send;

    /// Find a blob by its identifier.
    fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoredBlob>, BlobError>> + Send;

    /// Persist a new content type for an existing row.
    fn update_content_type(
        &self,
        id: Uuid,
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<StoredBlob, BlobError>> + Send;

    /// Delete a blob by row ID. Returns whether a row was removed.
    fn delete(&self, id: Uuid)
    -> impl std::future::Future<Output = Result<bool, BlobError>> + Send;

    /// Delete every stored blob. Returns the number of removed rows.
    fn delete_all(&self) -> impl std::future::Future<Output = Result<u64, BlobError>> + Send;

    /// Count stored blobs.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, BlobError>> + Send;
}
