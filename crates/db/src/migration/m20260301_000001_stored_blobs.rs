//! Stored blobs migration.
//!
//! Creates the blob table under the configured table name, with a unique
//! index on `medium_hash` backing the one-row-per-identifier upsert.

use sea_orm_migration::prelude::*;

use crate::entities::stored_blobs::{Column, Entity, table_name};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(Column::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Column::MediumHash).string().not_null())
                    .col(ColumnDef::new(Column::Binary).blob().not_null())
                    .col(ColumnDef::new(Column::OriginalFilename).string().null())
                    .col(ColumnDef::new(Column::ContentType).string().null())
                    .col(ColumnDef::new(Column::Size).big_integer().not_null())
                    .col(ColumnDef::new(Column::OwnerId).string().null())
                    .col(ColumnDef::new(Column::OwnerTypeName).string().null())
                    .col(
                        ColumnDef::new(Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Identifier lookup (every fetch) and the upsert conflict target
        manager
            .create_index(
                Index::create()
                    .name(medium_hash_index())
                    .table(Entity)
                    .col(Column::MediumHash)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Blobs attached to an owner
        manager
            .create_index(
                Index::create()
                    .name(owner_index())
                    .table(Entity)
                    .col(Column::OwnerTypeName)
                    .col(Column::OwnerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entity).if_exists().to_owned())
            .await
    }
}

fn medium_hash_index() -> String {
    format!("idx_{}_medium_hash", table_name())
}

fn owner_index() -> String {
    format!("idx_{}_owner", table_name())
}
