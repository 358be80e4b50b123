//! Table-backed storage provider for upload libraries.
//!
//! The provider translates the upload library's `store`/`retrieve` verbs into
//! `BlobHandle` calls and attaches a download URL to every handle it returns.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  store/retrieve  ┌──────────────┐  create/fetch  ┌────────────────┐
//! │   Uploader   │ ───────────────▶ │ TableStorage │ ─────────────▶ │   BlobHandle   │
//! └──────────────┘                  └──────┬───────┘                └───────┬────────┘
//!                                          │ resolve_url                    │
//!                                          ▼                                ▼
//!                                   RouteResolver?                  BlobRepository
//! ```

mod config;
mod service;
mod uploader;
mod url;

pub use config::{StorageConfig, normalize_path_prefix};
pub use service::{StorageEngine, TableStorage};
pub use uploader::{UploadedFile, Uploader};
pub use url::{RouteResolver, resolve_url, route_name};
