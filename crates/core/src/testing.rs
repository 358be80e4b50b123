//! In-memory repository and stub uploader used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::blob::{BlobError, BlobRepository, NewBlob, OwnerRef, StoredBlob};
use crate::storage::Uploader;

/// Mock repository keyed by identifier.
#[derive(Default)]
pub(crate) struct MockBlobRepository {
    blobs: Mutex<HashMap<String, StoredBlob>>,
}

impl MockBlobRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, identifier: &str) -> Option<StoredBlob> {
        self.blobs.lock().unwrap().get(identifier).cloned()
    }
}

impl BlobRepository for MockBlobRepository {
    async fn create_or_replace(&self, input: NewBlob) -> Result<StoredBlob, BlobError> {
        let now = Utc::now();
        let mut blobs = self.blobs.lock().unwrap();
        let existing = blobs.get(&input.identifier).cloned();

        let (owner_id, owner_type_name) = match (&input.owner, &existing) {
            (Some(owner), _) => (Some(owner.id.clone()), Some(owner.type_name.clone())),
            (None, Some(row)) => (row.owner_id.clone(), row.owner_type_name.clone()),
            (None, None) => (None, None),
        };

        let blob = StoredBlob {
            id: existing.as_ref().map_or_else(Uuid::new_v4, |row| row.id),
            identifier: input.identifier.clone(),
            payload: input.payload,
            original_filename: input.original_filename,
            content_type: input.content_type,
            size: input.size,
            owner_id,
            owner_type_name,
            created_at: existing.as_ref().map_or(now, |row| row.created_at),
            updated_at: now,
        };
        blobs.insert(input.identifier, blob.clone());
        Ok(blob)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<StoredBlob>, BlobError> {
        Ok(self.get(identifier))
    }

    async fn update_content_type(
        &self,
        id: Uuid,
        content_type: &str,
    ) -> Result<StoredBlob, BlobError> {
        let mut blobs = self.blobs.lock().unwrap();
        let blob = blobs
            .values_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BlobError::repository("row not found"))?;
        blob.content_type = Some(content_type.to_string());
        blob.updated_at = Utc::now();
        Ok(blob.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BlobError> {
        let mut blobs = self.blobs.lock().unwrap();
        let before = blobs.len();
        blobs.retain(|_, b| b.id != id);
        Ok(blobs.len() < before)
    }

    async fn delete_all(&self) -> Result<u64, BlobError> {
        let mut blobs = self.blobs.lock().unwrap();
        let removed = blobs.len() as u64;
        blobs.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, BlobError> {
        Ok(self.blobs.lock().unwrap().len() as u64)
    }
}

/// Uploader with every contract method driven by plain fields.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubUploader {
    pub(crate) identifier: Option<String>,
    pub(crate) owner: Option<OwnerRef>,
    pub(crate) mounted_as: Option<String>,
    pub(crate) default_url: Option<String>,
}

impl StubUploader {
    pub(crate) fn with_identifier(identifier: &str) -> Self {
        Self {
            identifier: Some(identifier.to_string()),
            ..Self::default()
        }
    }
}

impl Uploader for StubUploader {
    fn filename(&self) -> Option<String> {
        self.identifier.clone()
    }

    fn owner(&self) -> Option<OwnerRef> {
        self.owner.clone()
    }

    fn mounted_as(&self) -> Option<&str> {
        self.mounted_as.as_deref()
    }

    fn default_url(&self) -> Option<String> {
        self.default_url.clone()
    }
}
