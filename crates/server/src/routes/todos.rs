use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use service::envelope::Envelope;
use service::todo::domain::{CreateTodoInput, Todo, UpdateTodoInput};

use crate::errors::ApiError;
use crate::extract::{TodoId, ValidatedJson};
use crate::metrics;
use crate::state::ServerState;

/// 列出所有未删除的 Todo
#[utoipa::path(
    get, path = "/todos", tag = "todos",
    security(("bearer" = [])),
    responses((status = 200, description = "Live todos in id order"), (status = 401, description = "Unauthenticated"))
)]
pub async fn index(State(state): State<ServerState>) -> Result<Json<Envelope<Vec<Todo>>>, ApiError> {
    let env = state.todos.list().await?;
    metrics::record_todo("list", true);
    Ok(Json(env))
}

#[utoipa::path(
    get, path = "/todos/{id}", tag = "todos",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo, or error envelope when missing or deleted"),
        (status = 422, description = "id is not an integer", body = crate::openapi::ValidationErrorBody),
    )
)]
pub async fn show(State(state): State<ServerState>, TodoId(id): TodoId) -> Result<Json<Envelope<Todo>>, ApiError> {
    let env = state.todos.get_by_id(id).await?;
    metrics::record_todo("show", env.is_success());
    Ok(Json(env))
}

#[utoipa::path(
    post, path = "/todos", tag = "todos",
    security(("bearer" = [])),
    request_body = crate::openapi::CreateTodoRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorBody),
    )
)]
pub async fn store(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<CreateTodoInput>,
) -> Result<(StatusCode, Json<Envelope<Todo>>), ApiError> {
    let env = state.todos.create(input).await?;
    metrics::record_todo("create", true);
    Ok((StatusCode::CREATED, Json(env)))
}

#[utoipa::path(
    put, path = "/todos/{id}", tag = "todos",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Todo id")),
    request_body = crate::openapi::UpdateTodoRequest,
    responses(
        (status = 200, description = "Updated, or error envelope when missing or deleted"),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorBody),
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    TodoId(id): TodoId,
    ValidatedJson(input): ValidatedJson<UpdateTodoInput>,
) -> Result<Json<Envelope<Todo>>, ApiError> {
    let env = state.todos.update(id, input).await?;
    metrics::record_todo("update", env.is_success());
    Ok(Json(env))
}

/// 软删除：只写 deleted_at
#[utoipa::path(
    delete, path = "/todos/{id}", tag = "todos",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Deleted, or error envelope when missing or already deleted"),
        (status = 422, description = "id is not an integer", body = crate::openapi::ValidationErrorBody),
    )
)]
pub async fn destroy(State(state): State<ServerState>, TodoId(id): TodoId) -> Result<Json<Envelope<()>>, ApiError> {
    let env = state.todos.delete(id).await?;
    metrics::record_todo("delete", env.is_success());
    Ok(Json(env))
}
