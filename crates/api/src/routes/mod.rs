//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod blobs;
pub mod downloads;
pub mod health;

/// Creates the API router mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(blobs::routes())
}
