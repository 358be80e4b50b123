//! Blobrow API Server
//!
//! Main entry point for the blob storage service.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobrow_api::{AppState, create_router};
use blobrow_core::storage::{StorageConfig, TableStorage};
use blobrow_db::{BlobRepository, configure_table_name, connect_with_config, migration::Migrator};
use blobrow_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blobrow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Must happen before any query touches the entity
    configure_table_name(&config.storage.table_name)?;

    // Connect to database
    let db = connect_with_config(&config.database).await?;
    info!(table = %config.storage.table_name, "Connected to database");

    if config.database.auto_migrate {
        Migrator::up(&db, None).await?;
        info!("Migrations applied");
    }

    let storage_config = StorageConfig::from(&config.storage);
    info!(
        download_path_prefix = %storage_config.download_path_prefix,
        "Table storage configured"
    );

    // Create application state
    let storage = TableStorage::new(Arc::new(BlobRepository::new(db)), storage_config);
    let state = AppState {
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
