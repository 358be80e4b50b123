//! Upload library contract.

use crate::blob::OwnerRef;

/// The uploader side of the storage contract.
///
/// Identifier and filename logic belong to the uploader; the storage
/// provider only asks for the result.
pub trait Uploader: Send + Sync {
    /// Filename the uploader assigns to the current file.
    fn filename(&self) -> Option<String>;

    /// Key the file is stored under. Defaults to [`Self::filename`].
    fn identifier(&self) -> Option<String> {
        self.filename()
    }

    /// Entity the uploader is mounted on.
    fn owner(&self) -> Option<OwnerRef> {
        None
    }

    /// Name of the field the uploader is mounted as (e.g. `file`).
    fn mounted_as(&self) -> Option<&str> {
        None
    }

    /// Uploader-defined URL that overrides the prefix fallback.
    fn default_url(&self) -> Option<String> {
        None
    }
}

/// A file handed to the storage provider, fully materialized in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename as sent by the client.
    pub original_filename: Option<String>,
    /// MIME type.
    pub content_type: Option<String>,
    /// Payload bytes.
    pub data: Vec<u8>,
    /// Declared size; the payload length is used when unset.
    pub declared_size: Option<u64>,
}

impl UploadedFile {
    /// Create a file from its payload.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Set the original filename.
    #[must_use]
    pub fn with_original_filename(mut self, filename: impl Into<String>) -> Self {
        self.original_filename = Some(filename.into());
        self
    }

    /// Set the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Declare a size that differs from the payload length.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.declared_size
            .unwrap_or_else(|| u64::try_from(self.data.len()).unwrap_or(u64::MAX))
    }
}
