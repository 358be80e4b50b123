//! `SeaORM` entity definitions.

pub mod stored_blobs;
