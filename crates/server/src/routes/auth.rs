use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use service::auth::domain::{
    AuthContext, AuthSession, AuthUser, LoginInput, RegisterInput, LOGGED_IN_MESSAGE, LOGGED_OUT_MESSAGE,
    REGISTERED_MESSAGE,
};
use service::auth::errors::AuthError;
use service::envelope::Envelope;

use crate::errors::ApiError;
use crate::extract::ValidatedJson;
use crate::metrics;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered; body carries user and token"),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorBody),
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<RegisterInput>,
) -> Result<(StatusCode, Json<Envelope<AuthSession>>), ApiError> {
    let session = state.auth.register(input).await?;
    metrics::record_auth("registered");
    Ok((StatusCode::CREATED, Json(Envelope::success_with_message(REGISTERED_MESSAGE, session))))
}

#[utoipa::path(
    post, path = "/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in; body carries user and token"),
        (status = 422, description = "Validation failed or invalid credentials", body = crate::openapi::ValidationErrorBody),
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> Result<Json<Envelope<AuthSession>>, ApiError> {
    match state.auth.login(input).await {
        Ok(session) => {
            metrics::record_auth("login");
            Ok(Json(Envelope::success_with_message(LOGGED_IN_MESSAGE, session)))
        }
        Err(e) => {
            if matches!(e, AuthError::InvalidCredentials) {
                metrics::record_auth("login_failed");
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get, path = "/me", tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user"),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn me(Extension(ctx): Extension<AuthContext>) -> Json<Envelope<AuthUser>> {
    Json(Envelope::success(ctx.user))
}

#[utoipa::path(
    post, path = "/logout", tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Presented token revoked"),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn logout(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.auth.logout(ctx.token_id).await?;
    metrics::record_auth("logout");
    Ok(Json(Envelope::message(LOGGED_OUT_MESSAGE)))
}
