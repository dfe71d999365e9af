use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use service::auth::domain::{INVALID_CREDENTIALS_MESSAGE, UNAUTHENTICATED_MESSAGE};
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::validation::ValidationErrors;

/// Every failure a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 422 with field-keyed messages.
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("bad request: {0}")]
    BadRequest(String),
    /// 500; the cause is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let body = json!({ "message": errors.summary(), "errors": errors });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": UNAUTHENTICATED_MESSAGE }))).into_response()
            }
            ApiError::BadRequest(msg) => {
                warn!(error = %msg, "bad request");
                (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response()
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "Server Error" }))).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Validation(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(errors) => ApiError::Validation(errors),
            AuthError::InvalidCredentials => {
                ApiError::Validation(ValidationErrors::single("email", INVALID_CREDENTIALS_MESSAGE))
            }
            AuthError::Unauthenticated => ApiError::Unauthenticated,
            other => ApiError::Internal(format!("[{}] {}", other.code(), other)),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::BadRequest(msg),
            ServiceError::Db(msg) => ApiError::Internal(msg),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
