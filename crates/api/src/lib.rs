//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Download routes under the configured path prefix
//! - The upload endpoint
//! - Error responses

pub mod error;
pub mod routes;

use axum::Router;
use blobrow_core::storage::TableStorage;
use blobrow_db::BlobRepository;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Storage provider backed by the database repository.
pub type BlobStorage = TableStorage<BlobRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage provider for uploads and downloads.
    pub storage: Arc<BlobStorage>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let prefix = state.storage.config().download_path_prefix.clone();

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .merge(routes::downloads::routes(&prefix))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
