//! Lead database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Lead, Lifecycle};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique among rows where `deleted_at IS NULL` (partial index)
    pub email: String,
    pub phone: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub budget_min: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub budget_max: Option<Decimal>,
    pub status: String,
    pub source: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub property_interest: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity::Entity")]
    Activity,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Lead {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Lead {
            status: model.status.parse().map_err(|_| {
                AppError::internal(format!("lead {} has unknown status {}", model.id, model.status))
            })?,
            source: model.source.parse().map_err(|_| {
                AppError::internal(format!("lead {} has unknown source {}", model.id, model.source))
            })?,
            lifecycle: Lifecycle::from_deleted_at(model.deleted_at),
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            budget_min: model.budget_min,
            budget_max: model.budget_max,
            property_interest: model.property_interest,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
