use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::todo::domain::Todo;
use crate::todo::repository::TodoRepository;

use models::todo;

pub struct SeaOrmTodoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTodoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl TodoRepository for SeaOrmTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(todo::list_live(&self.db).await?)
    }

    async fn find(&self, id: i32) -> Result<Option<Todo>, ServiceError> {
        Ok(todo::find_live(&self.db, id).await?)
    }

    async fn create(&self, title: &str, description: Option<&str>, status: i32) -> Result<Todo, ServiceError> {
        Ok(todo::create(&self.db, title, description, status).await?)
    }

    async fn update(
        &self,
        id: i32,
        title: &str,
        description: Option<Option<&str>>,
        status: i32,
    ) -> Result<Option<Todo>, ServiceError> {
        Ok(todo::update_live(&self.db, id, title, description, status).await?)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(todo::soft_delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;

    #[tokio::test]
    async fn soft_deleted_rows_stay_in_the_table() -> anyhow::Result<()> {
        let db = memory_db().await?;
        let repo = SeaOrmTodoRepository::new(db.clone());
        let t = repo.create("A", Some("B"), 0).await?;
        assert!(repo.soft_delete(t.id).await?);
        assert!(repo.find(t.id).await?.is_none());
        assert!(repo.list().await?.is_empty());
        assert!(!repo.soft_delete(t.id).await?);

        let raw = todo::find_with_trashed(&db, t.id).await?.expect("row kept");
        assert!(raw.deleted_at.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn update_can_keep_or_clear_description() -> anyhow::Result<()> {
        let repo = SeaOrmTodoRepository::new(memory_db().await?);
        let t = repo.create("A", Some("B"), 0).await?;
        let kept = repo.update(t.id, "A2", None, 1).await?.expect("live");
        assert_eq!(kept.description.as_deref(), Some("B"));
        let cleared = repo.update(t.id, "A3", Some(None), 2).await?.expect("live");
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.status, 2);
        Ok(())
    }
}
