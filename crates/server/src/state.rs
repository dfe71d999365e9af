use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::todo::repo::SeaOrmTodoRepository;
use service::todo::TodoService;

pub type Auth = AuthService<SeaOrmAuthRepository>;
pub type Todos = TodoService<SeaOrmTodoRepository>;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<Auth>,
    pub todos: Arc<Todos>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth_cfg: AuthConfig) -> Self {
        let auth_repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let todo_repo = Arc::new(SeaOrmTodoRepository::new(db.clone()));
        Self {
            db,
            auth: Arc::new(AuthService::new(auth_repo, auth_cfg)),
            todos: Arc::new(TodoService::new(todo_repo)),
        }
    }
}
