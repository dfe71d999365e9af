//! Create `personal_access_tokens` table storing SHA-256 digests of bearer tokens.
//! One user may hold any number of tokens; rows go away with their user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PersonalAccessTokens::Table)
                    .if_not_exists()
                    .col(pk_auto(PersonalAccessTokens::Id))
                    .col(integer(PersonalAccessTokens::UserId).not_null())
                    .col(string_len(PersonalAccessTokens::Name, 255).not_null())
                    .col(string_len(PersonalAccessTokens::Token, 64).unique_key().not_null())
                    .col(
                        ColumnDef::new(PersonalAccessTokens::LastUsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(PersonalAccessTokens::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(PersonalAccessTokens::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personal_access_tokens_user")
                            .from(PersonalAccessTokens::Table, PersonalAccessTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PersonalAccessTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PersonalAccessTokens {
    Table,
    Id,
    UserId,
    Name,
    Token,
    LastUsedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
