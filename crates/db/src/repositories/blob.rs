//! Blob repository for database operations.
//!
//! Implements blob CRUD operations using SeaORM.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::stored_blobs;
use blobrow_core::blob::{BlobError, BlobRepository as BlobRepoTrait, NewBlob, StoredBlob};

/// Blob repository implementation.
#[derive(Debug, Clone)]
pub struct BlobRepository {
    db: DatabaseConnection,
}

impl BlobRepository {
    /// Create a new blob repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, identifier: &str) -> Result<Option<stored_blobs::Model>, DbErr> {
        stored_blobs::Entity::find()
            .filter(stored_blobs::Column::MediumHash.eq(identifier))
            .one(&self.db)
            .await
    }
}

impl BlobRepoTrait for BlobRepository {
    async fn create_or_replace(&self, input: NewBlob) -> Result<StoredBlob, BlobError> {
        let now = Utc::now().into();
        let identifier = input.identifier.clone();

        // Owner columns are only written when an owner is supplied
        let mut update_columns = vec![
            stored_blobs::Column::Binary,
            stored_blobs::Column::OriginalFilename,
            stored_blobs::Column::ContentType,
            stored_blobs::Column::Size,
            stored_blobs::Column::UpdatedAt,
        ];
        let (owner_id, owner_type_name) = match input.owner {
            Some(owner) => {
                update_columns.push(stored_blobs::Column::OwnerId);
                update_columns.push(stored_blobs::Column::OwnerTypeName);
                (Some(owner.id), Some(owner.type_name))
            }
            None => (None, None),
        };

        let active_model = stored_blobs::ActiveModel {
            id: Set(Uuid::new_v4()),
            medium_hash: Set(input.identifier),
            binary: Set(input.payload),
            original_filename: Set(input.original_filename),
            content_type: Set(input.content_type),
            size: Set(input.size),
            owner_id: Set(owner_id),
            owner_type_name: Set(owner_type_name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        stored_blobs::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(stored_blobs::Column::MediumHash)
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| BlobError::repository(e.to_string()))?;

        let model = self
            .find_model(&identifier)
            .await
            .map_err(|e| BlobError::repository(e.to_string()))?
            .ok_or_else(|| {
                BlobError::repository(format!("blob `{identifier}` missing after upsert"))
            })?;

        debug!(identifier = %identifier, id = %model.id, "Upserted blob row");
        Ok(to_domain(model))
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<StoredBlob>, BlobError> {
        let model = self
            .find_model(identifier)
            .await
            .map_err(|e| BlobError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn update_content_type(
        &self,
        id: Uuid,
        content_type: &str,
    ) -> Result<StoredBlob, BlobError> {
        let model = stored_blobs::ActiveModel {
            id: Set(id),
            content_type: Set(Some(content_type.to_string())),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| BlobError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BlobError> {
        let result = stored_blobs::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BlobError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, BlobError> {
        let result = stored_blobs::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| BlobError::repository(e.to_string()))?;

        debug!(rows = result.rows_affected, "Deleted all blob rows");
        Ok(result.rows_affected)
    }

    async fn count(&self) -> Result<u64, BlobError> {
        stored_blobs::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| BlobError::repository(e.to_string()))
    }
}

/// Convert database model to domain model.
fn to_domain(model: stored_blobs::Model) -> StoredBlob {
    StoredBlob {
        id: model.id,
        identifier: model.medium_hash,
        payload: model.binary,
        original_filename: model.original_filename,
        content_type: model.content_type,
        size: model.size,
        owner_id: model.owner_id,
        owner_type_name: model.owner_type_name,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
