use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tokens: lookups by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_personal_access_tokens_user")
                    .table(PersonalAccessTokens::Table)
                    .col(PersonalAccessTokens::UserId)
                    .to_owned(),
            )
            .await?;

        // Todos: every live query filters on deleted_at
        manager
            .create_index(
                Index::create()
                    .name("idx_todos_deleted_at")
                    .table(Todos::Table)
                    .col(Todos::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_todos_deleted_at").table(Todos::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_personal_access_tokens_user")
                    .table(PersonalAccessTokens::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PersonalAccessTokens { Table, UserId }

#[derive(DeriveIden)]
enum Todos { Table, DeletedAt }
