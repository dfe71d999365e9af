use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::errors::ApiError;
use crate::metrics;
use crate::state::ServerState;

/// `Authorization: Bearer <token>`, scheme matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Route layer for protected routes: resolves the bearer token and stores the
/// resulting `AuthContext` in the request extensions.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_owned();
    let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
        warn!(%path, "missing or malformed Authorization header");
        metrics::record_auth("rejected");
        return Err(ApiError::Unauthenticated);
    };

    let ctx = state.auth.resolve_token(&token).await.map_err(|e| {
        warn!(%path, code = e.code(), "token rejected");
        metrics::record_auth("rejected");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
