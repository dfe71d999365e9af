use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{CreateTodoInput, Todo, UpdateTodoInput, DELETED_MESSAGE, NOT_FOUND_MESSAGE};
use super::repository::TodoRepository;
use crate::envelope::Envelope;
use crate::errors::ServiceError;

/// Todo CRUD. A missing or soft-deleted id answers with an error envelope,
/// not an `Err`; `Err` means the store failed.
///
/// Ids arrive as `i64`; one outside the `i32` key range cannot name a row and
/// is simply not found.
pub struct TodoService<R: TodoRepository> {
    repo: Arc<R>,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Envelope<Vec<Todo>>, ServiceError> {
        let todos = self.repo.list().await?;
        debug!(count = todos.len(), "todos_listed");
        Ok(Envelope::success(todos))
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Envelope<Todo>, ServiceError> {
        let found = match row_id(id) {
            Some(id) => self.repo.find(id).await?,
            None => None,
        };
        Ok(match found {
            Some(todo) => Envelope::success(todo),
            None => Envelope::error(NOT_FOUND_MESSAGE),
        })
    }

    /// # Examples
    /// ```
    /// use service::todo::{TodoService, repository::mock::MockTodoRepository, domain::CreateTodoInput};
    /// use std::sync::Arc;
    /// let svc = TodoService::new(Arc::new(MockTodoRepository::default()));
    /// let input = CreateTodoInput { title: "x".into(), description: None, status: None };
    /// let env = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(env.data.unwrap().status, 0);
    /// ```
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateTodoInput) -> Result<Envelope<Todo>, ServiceError> {
        let todo = self.repo
            .create(&input.title, input.description.as_deref(), input.status.unwrap_or(0))
            .await?;
        info!(todo_id = todo.id, "todo_created");
        Ok(Envelope::success(todo))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateTodoInput) -> Result<Envelope<Todo>, ServiceError> {
        let Some(id) = row_id(id) else {
            return Ok(Envelope::error(NOT_FOUND_MESSAGE));
        };
        let description = input.description.as_ref().map(|d| d.as_deref());
        Ok(match self.repo.update(id, &input.title, description, input.status).await? {
            Some(todo) => {
                info!(todo_id = todo.id, "todo_updated");
                Envelope::success(todo)
            }
            None => Envelope::error(NOT_FOUND_MESSAGE),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Envelope<()>, ServiceError> {
        let deleted = match row_id(id) {
            Some(id) => self.repo.soft_delete(id).await?,
            None => false,
        };
        if deleted {
            info!(todo_id = id, "todo_deleted");
            Ok(Envelope::message(DELETED_MESSAGE))
        } else {
            Ok(Envelope::error(NOT_FOUND_MESSAGE))
        }
    }
}

fn row_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EnvelopeStatus;
    use crate::todo::repository::mock::MockTodoRepository;

    fn svc() -> (Arc<MockTodoRepository>, TodoService<MockTodoRepository>) {
        let repo = Arc::new(MockTodoRepository::default());
        (repo.clone(), TodoService::new(repo))
    }

    fn create_input(title: &str, description: Option<&str>) -> CreateTodoInput {
        CreateTodoInput { title: title.into(), description: description.map(Into::into), status: None }
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let (_, svc) = svc();
        let created = svc.create(create_input("A", Some("B"))).await.unwrap().data.unwrap();
        let got = svc.get_by_id(created.id.into()).await.unwrap();
        assert!(got.is_success());
        let todo = got.data.unwrap();
        assert_eq!((todo.title.as_str(), todo.description.as_deref(), todo.status), ("A", Some("B"), 0));
        assert!(todo.deleted_at.is_none());
    }

    #[tokio::test]
    async fn explicit_status_is_kept_even_if_unknown() {
        let (_, svc) = svc();
        let input = CreateTodoInput { title: "x".into(), description: None, status: Some(42) };
        assert_eq!(svc.create(input).await.unwrap().data.unwrap().status, 42);
    }

    #[tokio::test]
    async fn delete_hides_row_and_second_delete_is_not_found() {
        let (repo, svc) = svc();
        let id = svc.create(create_input("A", None)).await.unwrap().data.unwrap().id;

        let deleted = svc.delete(id.into()).await.unwrap();
        assert_eq!(deleted.message.as_deref(), Some(DELETED_MESSAGE));

        let got = svc.get_by_id(id.into()).await.unwrap();
        assert_eq!(got.status, EnvelopeStatus::Error);
        assert_eq!(got.message.as_deref(), Some(NOT_FOUND_MESSAGE));
        assert!(svc.list().await.unwrap().data.unwrap().is_empty());

        let again = svc.delete(id.into()).await.unwrap();
        assert_eq!(again.status, EnvelopeStatus::Error);
        assert_eq!(repo.row_count(), 1);
    }

    #[tokio::test]
    async fn update_missing_or_deleted_is_not_found_and_creates_nothing() {
        let (repo, svc) = svc();
        let input = || UpdateTodoInput { title: "t".into(), description: None, status: 1 };
        let missing = svc.update(99, input()).await.unwrap();
        assert_eq!(missing.message.as_deref(), Some(NOT_FOUND_MESSAGE));
        assert_eq!(repo.row_count(), 0);

        let id = svc.create(create_input("A", None)).await.unwrap().data.unwrap().id;
        svc.delete(id.into()).await.unwrap();
        let gone = svc.update(id.into(), input()).await.unwrap();
        assert_eq!(gone.status, EnvelopeStatus::Error);
        assert_eq!(repo.row_count(), 1);
    }

    #[tokio::test]
    async fn ids_beyond_the_key_range_are_not_found() {
        let (repo, svc) = svc();
        svc.create(create_input("A", None)).await.unwrap();
        let huge = i64::from(i32::MAX) + 1;
        assert_eq!(svc.get_by_id(huge).await.unwrap().message.as_deref(), Some(NOT_FOUND_MESSAGE));
        let input = UpdateTodoInput { title: "t".into(), description: None, status: 1 };
        assert_eq!(svc.update(huge, input).await.unwrap().status, EnvelopeStatus::Error);
        assert_eq!(svc.delete(-huge - 1).await.unwrap().status, EnvelopeStatus::Error);
        assert_eq!(repo.row_count(), 1);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (_, svc) = svc();
        let id = svc.create(create_input("A", Some("B"))).await.unwrap().data.unwrap().id;
        let input = UpdateTodoInput { title: "A2".into(), description: Some(None), status: 2 };
        let todo = svc.update(id.into(), input).await.unwrap().data.unwrap();
        assert_eq!(todo.title, "A2");
        assert_eq!(todo.description, None);
        assert_eq!(todo.status, 2);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let (_, svc) = svc();
        for t in ["one", "two", "three"] {
            svc.create(create_input(t, None)).await.unwrap();
        }
        let titles: Vec<_> = svc.list().await.unwrap().data.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }
}
