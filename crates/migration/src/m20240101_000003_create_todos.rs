//! Create `todos` table.
//!
//! No owner column: every authenticated user sees every todo. Rows are
//! soft-deleted through `deleted_at` and never removed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(pk_auto(Todos::Id))
                    .col(string_len(Todos::Title, 255).not_null())
                    .col(ColumnDef::new(Todos::Description).text().null())
                    .col(integer(Todos::Status).not_null().default(0))
                    .col(timestamp_with_time_zone(Todos::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Todos::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Todos::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Todos::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Todos { Table, Id, Title, Description, Status, CreatedAt, UpdatedAt, DeletedAt }
