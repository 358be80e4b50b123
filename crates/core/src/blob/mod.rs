//! Stored blob records and the handle exposed to upload libraries.
//!
//! This module provides:
//! - The stored blob domain model
//! - The repository contract implemented by the db crate
//! - `BlobHandle`, a uniform accessor surface over zero-or-one record

mod error;
mod handle;
mod repository;
mod types;

pub use error::BlobError;
pub use handle::BlobHandle;
pub use repository::BlobRepository;
pub use types::{NewBlob, OwnerRef, StoredBlob};
