//! Database migration runner for Blobrow.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The connection comes from `DATABASE_URL`. The blob table name comes from
//! the `storage` section of the server configuration
//! (`BLOBROW__STORAGE__TABLE_NAME`), so both binaries agree on it.

use blobrow_db::{configure_table_name, migration::Migrator};
use blobrow_shared::StorageSettings;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let settings = match StorageSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load storage configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = configure_table_name(&settings.table_name) {
        eprintln!("Invalid table name: {e}");
        std::process::exit(1);
    }

    // Run the migrator CLI (it sets up its own tracing)
    cli::run_cli(Migrator).await;
}
