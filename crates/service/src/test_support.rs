#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory database for a single test.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    Ok(models::db::connect_in_memory().await?)
}
