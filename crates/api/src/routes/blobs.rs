//! Upload route.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use blobrow_core::blob::{BlobHandle, BlobRepository};
use blobrow_core::storage::{StorageEngine, UploadedFile, Uploader};
use blobrow_shared::AppError;
use serde::Serialize;
use tracing::info;

use crate::{ApiError, AppState};

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Directory-like prefix for identifiers of uploaded files.
const UPLOAD_DIR: &str = "uploads";

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/blobs", post(upload))
}

/// Response describing a stored blob.
#[derive(Debug, Serialize)]
pub struct BlobResponse {
    /// Lookup key.
    pub identifier: Option<String>,
    /// Download URL.
    pub url: Option<String>,
    /// Original filename.
    pub original_filename: Option<String>,
    /// MIME type.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: Option<i64>,
    /// Extension derived from the identifier.
    pub extension: Option<String>,
}

impl<R: BlobRepository> From<&BlobHandle<R>> for BlobResponse {
    fn from(handle: &BlobHandle<R>) -> Self {
        Self {
            identifier: handle.identifier().map(String::from),
            url: handle.url().map(String::from),
            original_filename: handle.original_filename().map(String::from),
            content_type: handle.content_type().map(String::from),
            size: handle.size(),
            extension: handle.extension().map(String::from),
        }
    }
}

/// Uploader for files posted through the form endpoint.
///
/// Files land under `uploads/{sanitized filename}`.
#[derive(Debug)]
struct FormUploader {
    filename: String,
}

impl Uploader for FormUploader {
    fn filename(&self) -> Option<String> {
        Some(self.filename.clone())
    }

    fn identifier(&self) -> Option<String> {
        Some(format!("{UPLOAD_DIR}/{}", self.filename))
    }
}

/// POST `/blobs`
/// Store the multipart `file` field.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_filename = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let filename = original_filename
            .as_deref()
            .map(sanitize_filename)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::Validation("file field has no filename".to_string()))?;

        let mut file = UploadedFile::new(data.to_vec());
        file.original_filename = original_filename;
        file.content_type = content_type;

        let uploader = FormUploader { filename };
        let handle = state.storage.store(&uploader, file).await?;

        info!(
            identifier = ?handle.identifier(),
            size = ?handle.size(),
            "Blob uploaded"
        );

        return Ok((StatusCode::CREATED, Json(BlobResponse::from(&handle))));
    }

    Err(AppError::Validation(format!("missing multipart field `{FILE_FIELD}`")).into())
}

/// Sanitize a client filename for use in an identifier.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
/// Leading dots are dropped so the result never names a hidden file.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
