//! `SeaORM` Entity for the stored blobs table.
//!
//! The table name is configurable once per process (see
//! [`configure_table_name`]), so the entity is written in expanded form with
//! a hand-written [`EntityName`] impl.

use std::sync::OnceLock;

use blobrow_shared::StorageSettings;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

static TABLE_NAME: OnceLock<String> = OnceLock::new();

/// Table name used when none is configured.
pub const DEFAULT_TABLE_NAME: &str = StorageSettings::DEFAULT_TABLE_NAME;

/// Effective table name. Fixed on first use.
pub fn table_name() -> &'static str {
    TABLE_NAME.get_or_init(|| DEFAULT_TABLE_NAME.to_string())
}

/// Override the table name.
///
/// Must run before the first query or migration. Configuring the name that
/// is already in effect is a no-op.
///
/// # Errors
///
/// Returns an error if the name is not a plain identifier or a different
/// name is already in effect.
pub fn configure_table_name(name: &str) -> Result<(), DbErr> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(DbErr::Custom(format!("invalid table name `{name}`")));
    }

    let current = TABLE_NAME.get_or_init(|| name.to_string());
    if current == name {
        Ok(())
    } else {
        Err(DbErr::Custom(format!(
            "table name is already fixed as `{current}`"
        )))
    }
}

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        table_name()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize)]
pub struct Model {
    pub id: Uuid,
    pub medium_hash: String,
    pub binary: Vec<u8>,
    pub original_filename: Option<String>,
    pub content_type: Option<String>,
    pub size: i64,
    pub owner_id: Option<String>,
    pub owner_type_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    MediumHash,
    Binary,
    OriginalFilename,
    ContentType,
    Size,
    OwnerId,
    OwnerTypeName,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;

    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl ColumnTrait for Column {
    type EntityName = Entity;

    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::MediumHash => ColumnType::String(StringLen::None).def().unique(),
            Self::Binary => ColumnType::VarBinary(StringLen::None).def(),
            Self::OriginalFilename
            | Self::ContentType
            | Self::OwnerId
            | Self::OwnerTypeName => ColumnType::String(StringLen::None).def().null(),
            Self::Size => ColumnType::BigInteger.def(),
            Self::CreatedAt | Self::UpdatedAt => ColumnType::TimestampWithTimeZone.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}
