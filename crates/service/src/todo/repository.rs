use async_trait::async_trait;

use super::domain::Todo;
use crate::errors::ServiceError;

/// Persistence for todos. Every lookup ignores soft-deleted rows.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<Todo>, ServiceError>;
    async fn create(&self, title: &str, description: Option<&str>, status: i32) -> Result<Todo, ServiceError>;
    async fn update(
        &self,
        id: i32,
        title: &str,
        description: Option<Option<&str>>,
        status: i32,
    ) -> Result<Option<Todo>, ServiceError>;
    /// Returns `false` when there was no live row to delete.
    async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use chrono::{DateTime, FixedOffset, Utc};

    #[derive(Default)]
    pub struct MockTodoRepository {
        rows: Mutex<Vec<Todo>>,
    }

    impl MockTodoRepository {
        /// Total rows including soft-deleted ones.
        pub fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    fn now() -> DateTime<FixedOffset> {
        Utc::now().into()
    }

    #[async_trait]
    impl TodoRepository for MockTodoRepository {
        async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|t| !t.is_deleted()).cloned().collect())
        }

        async fn find(&self, id: i32) -> Result<Option<Todo>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|t| t.id == id && !t.is_deleted()).cloned())
        }

        async fn create(&self, title: &str, description: Option<&str>, status: i32) -> Result<Todo, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let ts = now();
            let todo = Todo {
                id: rows.len() as i32 + 1,
                title: title.to_string(),
                description: description.map(str::to_string),
                status,
                created_at: ts,
                updated_at: ts,
                deleted_at: None,
            };
            rows.push(todo.clone());
            Ok(todo)
        }

        async fn update(
            &self,
            id: i32,
            title: &str,
            description: Option<Option<&str>>,
            status: i32,
        ) -> Result<Option<Todo>, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|t| t.id == id && !t.is_deleted()) else {
                return Ok(None);
            };
            row.title = title.to_string();
            if let Some(description) = description {
                row.description = description.map(str::to_string);
            }
            row.status = status;
            row.updated_at = now();
            Ok(Some(row.clone()))
        }

        async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|t| t.id == id && !t.is_deleted()) else {
                return Ok(false);
            };
            row.deleted_at = Some(now());
            Ok(true)
        }
    }
}
