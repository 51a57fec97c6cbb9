//! Migration: Create leads table with soft delete support.
//!
//! Email uniqueness only applies to live rows, so it is enforced with a
//! partial unique index instead of a column constraint.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leads::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Leads::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Leads::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Leads::Phone).string_len(32).not_null())
                    .col(ColumnDef::new(Leads::BudgetMin).decimal_len(12, 2).null())
                    .col(ColumnDef::new(Leads::BudgetMax).decimal_len(12, 2).null())
                    .col(
                        ColumnDef::new(Leads::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(Leads::Source)
                            .string_len(20)
                            .not_null()
                            .default("other"),
                    )
                    .col(ColumnDef::new(Leads::PropertyInterest).text().null())
                    .col(ColumnDef::new(Leads::CreatedBy).integer().null())
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Leads::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Leads::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leads_created_by")
                            .from(Leads::Table, Leads::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_status")
                    .table(Leads::Table)
                    .col(Leads::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_created_at")
                    .table(Leads::Table)
                    .col(Leads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // At most one live lead per email
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_leads_active_email ON leads (email) WHERE deleted_at IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Leads {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    BudgetMin,
    BudgetMax,
    Status,
    Source,
    PropertyInterest,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
