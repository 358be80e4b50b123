//! Download routes under the configured path prefix.
//!
//! The identifier is the rest of the path, slashes included, so
//! `GET /files/uploads/a.png` serves the row keyed `uploads/a.png`.

use std::fmt::Write;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use blobrow_core::blob::BlobHandle;
use blobrow_core::storage::normalize_path_prefix;
use blobrow_shared::AppError;
use tracing::info;

use crate::{ApiError, AppState};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Creates the download routes mounted at `prefix`.
///
/// The prefix is normalized first, so `files` and `/files/` both mount at
/// `/files`.
pub fn routes(prefix: &str) -> Router<AppState> {
    let path = format!("{}/{{*identifier}}", normalize_path_prefix(prefix));
    Router::new().route(&path, get(download).delete(remove))
}

/// GET `{prefix}/{identifier}`
/// Serve the stored bytes with their recorded content type.
async fn download(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response, ApiError> {
    let handle = BlobHandle::fetch(state.storage.repository().clone(), &identifier).await?;
    let Some(record) = handle.record() else {
        return Err(not_found(&identifier));
    };

    let content_type = record
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));

    let mut response = (StatusCode::OK, record.payload.clone()).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Some(disposition) = handle.original_filename().and_then(content_disposition) {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}

/// DELETE `{prefix}/{identifier}`
/// Remove the row stored under the identifier.
async fn remove(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut handle = BlobHandle::fetch(state.storage.repository().clone(), &identifier).await?;
    if !handle.delete().await? {
        return Err(not_found(&identifier));
    }

    info!(identifier = %identifier, "Blob deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(identifier: &str) -> ApiError {
    AppError::NotFound(format!("blob `{identifier}`")).into()
}

/// `inline` disposition naming `filename`.
///
/// The quoted `filename` parameter carries a printable-ASCII fallback with
/// `"` and `\` escaped. Names outside printable ASCII also get an RFC 5987
/// `filename*` parameter with the exact UTF-8 name.
fn content_disposition(filename: &str) -> Option<HeaderValue> {
    let mut fallback = String::with_capacity(filename.len());
    for c in filename.chars() {
        match c {
            '"' | '\\' => {
                fallback.push('\\');
                fallback.push(c);
            }
            ' '..='~' => fallback.push(c),
            _ => fallback.push('_'),
        }
    }

    let mut value = format!("inline; filename=\"{fallback}\"");
    if !filename.chars().all(|c| matches!(c, ' '..='~')) {
        value.push_str("; filename*=UTF-8''");
        for byte in filename.bytes() {
            if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
                value.push(char::from(byte));
            } else {
                let _ = write!(value, "%{byte:02X}");
            }
        }
    }

    HeaderValue::from_str(&value).ok()
}
