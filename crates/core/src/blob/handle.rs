//! Handle over zero-or-one stored blob.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::error::BlobError;
use super::repository::BlobRepository;
use super::types::{NewBlob, StoredBlob};
use crate::storage::{UploadedFile, Uploader};

/// In-memory handle exposing the accessor surface upload libraries expect.
///
/// A handle is built fresh by every create/fetch call and is never cached.
/// When it wraps no record every accessor returns `None`, except the owner
/// accessors which report [`BlobError::MissingRecord`].
pub struct BlobHandle<R: BlobRepository> {
    repo: Arc<R>,
    record: Option<StoredBlob>,
    url: Option<String>,
}

impl<R: BlobRepository> BlobHandle<R> {
    /// Wrap an optional record.
    #[must_use]
    pub fn new(repo: Arc<R>, record: Option<StoredBlob>) -> Self {
        Self {
            repo,
            record,
            url: None,
        }
    }

    /// Store `file` under `identifier`, replacing any row with the same identifier.
    ///
    /// The uploader's owner, when present, is recorded on the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload size cannot be stored or the
    /// repository write fails.
    pub async fn create<U>(
        repo: Arc<R>,
        uploader: &U,
        file: UploadedFile,
        identifier: &str,
    ) -> Result<Self, BlobError>
    where
        U: Uploader + ?Sized,
    {
        let declared_size = file.size();
        let size =
            i64::try_from(declared_size).map_err(|_| BlobError::SizeOverflow(declared_size))?;

        let input = NewBlob {
            identifier: identifier.to_string(),
            original_filename: file.original_filename,
            content_type: file.content_type,
            size,
            payload: file.data,
            owner: uploader.owner(),
        };

        let record = repo.create_or_replace(input).await?;
        debug!(identifier = %record.identifier, size = record.size, "Stored blob");

        Ok(Self::new(repo, Some(record)))
    }

    /// Fetch the blob stored under `identifier`.
    ///
    /// An unknown identifier yields an empty handle, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository lookup fails.
    pub async fn fetch(repo: Arc<R>, identifier: &str) -> Result<Self, BlobError> {
        let record = repo.find_by_identifier(identifier).await?;
        Ok(Self::new(repo, record))
    }

    /// Delete every stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository delete fails.
    pub async fn delete_all(repo: &R) -> Result<u64, BlobError> {
        repo.delete_all().await
    }

    /// The wrapped record, if any.
    #[must_use]
    pub fn record(&self) -> Option<&StoredBlob> {
        self.record.as_ref()
    }

    /// True when no record is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record.is_none()
    }

    /// Payload bytes.
    #[must_use]
    pub fn read(&self) -> Option<&[u8]> {
        self.record.as_ref().map(|r| r.payload.as_slice())
    }

    /// Stored size in bytes.
    #[must_use]
    pub fn size(&self) -> Option<i64> {
        self.record.as_ref().map(|r| r.size)
    }

    /// Extension taken from the identifier after its last `.`.
    ///
    /// This reads the identifier, not the original filename. An identifier
    /// without a dot is returned whole.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.record
            .as_ref()
            .and_then(|r| r.identifier.rsplit('.').find(|part| !part.is_empty()))
    }

    /// MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.record.as_ref().and_then(|r| r.content_type.as_deref())
    }

    /// Change the MIME type and persist it immediately.
    ///
    /// Does nothing on an empty handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository update fails.
    pub async fn set_content_type(&mut self, content_type: &str) -> Result<(), BlobError> {
        let Some(record) = &self.record else {
            return Ok(());
        };

        let updated = self
            .repo
            .update_content_type(record.id, content_type)
            .await?;
        self.record = Some(updated);
        Ok(())
    }

    /// Lookup key the blob is stored under.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.identifier.as_str())
    }

    /// Original filename.
    #[must_use]
    pub fn original_filename(&self) -> Option<&str> {
        self.record
            .as_ref()
            .and_then(|r| r.original_filename.as_deref())
    }

    /// Alias for [`Self::original_filename`].
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.original_filename()
    }

    /// Delete the underlying row.
    ///
    /// Returns `false` when the handle is empty. The handle is empty afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository delete fails.
    pub async fn delete(&mut self) -> Result<bool, BlobError> {
        let Some(record) = self.record.take() else {
            return Ok(false);
        };

        let deleted = self.repo.delete(record.id).await?;
        debug!(identifier = %record.identifier, deleted, "Deleted blob");
        Ok(deleted)
    }

    /// Alias for [`Self::delete`].
    ///
    /// # Errors
    ///
    /// Returns an error if the repository delete fails.
    pub async fn destroy(&mut self) -> Result<bool, BlobError> {
        self.delete().await
    }

    /// Owner identifier of the wrapped row.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::MissingRecord`] on an empty handle.
    pub fn owner_id(&self) -> Result<Option<&str>, BlobError> {
        self.record
            .as_ref()
            .map(|r| r.owner_id.as_deref())
            .ok_or(BlobError::MissingRecord)
    }

    /// Owner type name of the wrapped row.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::MissingRecord`] on an empty handle.
    pub fn owner_type_name(&self) -> Result<Option<&str>, BlobError> {
        self.record
            .as_ref()
            .map(|r| r.owner_type_name.as_deref())
            .ok_or(BlobError::MissingRecord)
    }

    /// URL attached by the storage provider.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Attach a URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }
}

impl<R: BlobRepository> fmt::Debug for BlobHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobHandle")
            .field("identifier", &self.identifier())
            .field("size", &self.size())
            .field("content_type", &self.content_type())
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::OwnerRef;
    use crate::testing::{MockBlobRepository, StubUploader};

    const IDENTIFIER: &str = "/uploads/sample.png";

    fn sample_file() -> UploadedFile {
        UploadedFile::new(b"File content.".to_vec())
            .with_original_filename("o_sample.png")
            .with_content_type("image/png")
            .with_size(123)
    }

    async fn stored(repo: &Arc<MockBlobRepository>) -> BlobHandle<MockBlobRepository> {
        BlobHandle::create(repo.clone(), &StubUploader::default(), sample_file(), IDENTIFIER)
            .await
            .expect("create should succeed")
    }

    #[tokio::test]
    async fn test_create_then_fetch_returns_stored_fields() {
        let repo = Arc::new(MockBlobRepository::new());
        stored(&repo).await;

        let handle = BlobHandle::fetch(repo, IDENTIFIER).await.unwrap();
        assert!(!handle.is_empty());
        assert_eq!(handle.read(), Some(b"File content.".as_slice()));
        assert_eq!(handle.size(), Some(123));
        assert_eq!(handle.content_type(), Some("image/png"));
        assert_eq!(handle.original_filename(), Some("o_sample.png"));
        assert_eq!(handle.filename(), Some("o_sample.png"));
        assert_eq!(handle.identifier(), Some(IDENTIFIER));
    }

    #[tokio::test]
    async fn test_create_twice_replaces_fields_in_place() {
        let repo = Arc::new(MockBlobRepository::new());
        let first = stored(&repo).await;

        let replacement = UploadedFile::new(b"second".to_vec()).with_content_type("text/plain");
        let second =
            BlobHandle::create(repo.clone(), &StubUploader::default(), replacement, IDENTIFIER)
                .await
                .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            first.record().map(|r| r.id),
            second.record().map(|r| r.id)
        );
        assert_eq!(second.read(), Some(b"second".as_slice()));
        assert_eq!(second.size(), Some(6));
        assert_eq!(second.content_type(), Some("text/plain"));
        assert_eq!(second.original_filename(), None);
    }

    #[tokio::test]
    async fn test_create_records_uploader_owner() {
        let repo = Arc::new(MockBlobRepository::new());
        let uploader = StubUploader {
            owner: Some(OwnerRef::new("1", "Article")),
            ..StubUploader::default()
        };

        let handle = BlobHandle::create(repo, &uploader, sample_file(), IDENTIFIER)
            .await
            .unwrap();
        assert_eq!(handle.owner_id().unwrap(), Some("1"));
        assert_eq!(handle.owner_type_name().unwrap(), Some("Article"));
    }

    #[tokio::test]
    async fn test_fetch_unknown_identifier_is_empty() {
        let repo = Arc::new(MockBlobRepository::new());
        let handle = BlobHandle::fetch(repo, "non-existent-identifier")
            .await
            .unwrap();

        assert!(handle.is_empty());
        assert!(handle.record().is_none());
        assert_eq!(handle.read(), None);
        assert_eq!(handle.size(), None);
        assert_eq!(handle.extension(), None);
        assert_eq!(handle.content_type(), None);
        assert_eq!(handle.identifier(), None);
        assert_eq!(handle.original_filename(), None);
        assert_eq!(handle.url(), None);
        assert!(matches!(handle.owner_id(), Err(BlobError::MissingRecord)));
        assert!(matches!(
            handle.owner_type_name(),
            Err(BlobError::MissingRecord)
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_one_row() {
        let repo = Arc::new(MockBlobRepository::new());
        stored(&repo).await;
        BlobHandle::create(
            repo.clone(),
            &StubUploader::default(),
            sample_file(),
            "/uploads/other.png",
        )
        .await
        .unwrap();

        let mut handle = BlobHandle::fetch(repo.clone(), IDENTIFIER).await.unwrap();
        assert!(handle.delete().await.unwrap());
        assert!(handle.is_empty());
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.get(IDENTIFIER).is_none());
    }

    #[tokio::test]
    async fn test_delete_empty_handle_returns_false() {
        let repo = Arc::new(MockBlobRepository::new());
        stored(&repo).await;

        let mut handle = BlobHandle::fetch(repo.clone(), "missing").await.unwrap();
        assert!(!handle.destroy().await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_content_type_persists() {
        let repo = Arc::new(MockBlobRepository::new());
        let mut handle = stored(&repo).await;

        handle.set_content_type("image/webp").await.unwrap();
        assert_eq!(handle.content_type(), Some("image/webp"));
        assert_eq!(
            repo.get(IDENTIFIER).and_then(|r| r.content_type),
            Some("image/webp".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_content_type_on_empty_handle_is_noop() {
        let repo = Arc::new(MockBlobRepository::new());
        let mut handle = BlobHandle::new(repo.clone(), None);

        handle.set_content_type("image/webp").await.unwrap();
        assert_eq!(handle.content_type(), None);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_extension_comes_from_identifier() {
        let repo = Arc::new(MockBlobRepository::new());
        let file = UploadedFile::new(b"x".to_vec()).with_original_filename("photo.jpeg");
        let handle = BlobHandle::create(repo, &StubUploader::default(), file, "archive.tar.gz")
            .await
            .unwrap();

        assert_eq!(handle.extension(), Some("gz"));
    }

    #[tokio::test]
    async fn test_delete_all_clears_repository() {
        let repo = Arc::new(MockBlobRepository::new());
        stored(&repo).await;

        assert_eq!(BlobHandle::delete_all(repo.as_ref()).await.unwrap(), 1);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[test]
    fn test_url_is_set_externally() {
        let mut handle = BlobHandle::new(Arc::new(MockBlobRepository::new()), None);
        handle.set_url("/files/a.png");
        assert_eq!(handle.url(), Some("/files/a.png"));
    }
}
