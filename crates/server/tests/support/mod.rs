#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use server::routes;
use server::state::ServerState;
use service::auth::AuthConfig;

pub async fn build_app() -> anyhow::Result<(Router, sea_orm::DatabaseConnection)> {
    let db = models::db::connect_in_memory().await?;
    let state = ServerState::new(db.clone(), AuthConfig::default());
    Ok((routes::build_router(tower_http::cors::CorsLayer::very_permissive(), state), db))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    send_raw(app, req).await
}

pub async fn send_raw(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, json))
}

/// Register a user and return the issued token.
pub async fn register(app: &Router, email: &str) -> anyhow::Result<String> {
    let body = serde_json::json!({ "name": "Tester", "email": email, "password": "password123" });
    let (status, json) = send(app, "POST", "/register", None, Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    Ok(json["data"]["token"].as_str().unwrap_or_default().to_string())
}
