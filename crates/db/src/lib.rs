//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - The `SeaORM` entity for the blob table
//! - A repository implementing the core blob repository trait
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use entities::stored_blobs::{configure_table_name, table_name};
pub use repositories::BlobRepository;

use std::time::Duration;

use blobrow_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection sized from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with_config(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    Database::connect(options).await
}
