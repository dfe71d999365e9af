//! Request extractors that validate before the handler runs.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use service::validation::{self, integer_message, Validate, ValidationErrors};

use crate::errors::ApiError;

/// JSON body checked against `T::SCHEMA`, then deserialized.
///
/// An empty body counts as `{}`. A body that is not JSON is a 400. The
/// `Content-Type` header is not inspected.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {e}")))?
        };
        Ok(Self(validation::validate_into::<T>(value)?))
    }
}

/// `{id}` path segment of the todo routes. Non-integers are a 422 on `todoId`;
/// any integer passes, range is the service's concern.
#[derive(Debug, Clone, Copy)]
pub struct TodoId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        raw.parse::<i64>()
            .map(TodoId)
            .map_err(|_| ValidationErrors::single("todoId", integer_message("todoId")).into())
    }
}
