//! Core storage logic for Blobrow.
//!
//! This crate contains the blob record model, the repository contract the db
//! crate implements, the handle exposed to upload libraries and the storage
//! provider that computes download URLs. It has ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `blob` - Stored blob records, the repository trait and `BlobHandle`
//! - `storage` - Uploader contract, URL policy and the `TableStorage` provider

pub mod blob;
pub mod storage;

#[cfg(test)]
mod testing;
