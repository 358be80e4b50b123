//! Blob record types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weak reference to the entity that owns a stored blob.
///
/// No referential integrity is enforced; the reference is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Owner identifier, as rendered by the owning system.
    pub id: String,
    /// Owner type name (e.g. `Article`).
    pub type_name: String,
}

impl OwnerRef {
    /// Create an owner reference.
    #[must_use]
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
        }
    }
}

/// Input for creating or replacing a stored blob.
#[derive(Debug, Clone)]
pub struct NewBlob {
    /// Lookup key supplied by the uploader.
    pub identifier: String,
    /// Raw payload.
    pub payload: Vec<u8>,
    /// Original filename.
    pub original_filename: Option<String>,
    /// MIME type.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: i64,
    /// Owning entity; owner columns are left untouched when `None`.
    pub owner: Option<OwnerRef>,
}

/// Stored blob domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Unique row identifier.
    pub id: Uuid,
    /// Lookup key (unique per table).
    pub identifier: String,
    /// Raw payload.
    pub payload: Vec<u8>,
    /// Original filename.
    pub original_filename: Option<String>,
    /// MIME type.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: i64,
    /// Owner identifier.
    pub owner_id: Option<String>,
    /// Owner type name.
    pub owner_type_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
