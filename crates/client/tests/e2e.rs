use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use client::types::{NewTodo, TodoUpdate};
use client::{ApiClient, ClientError, Session};
use server::{routes, ServerState};
use service::auth::AuthConfig;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let state = ServerState::new(db, AuthConfig::default());
    let app = routes::build_router(CorsLayer::very_permissive(), state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()) })
}

fn api(app: &TestApp) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(&app.base_url, Arc::new(Session::in_memory()))?)
}

#[tokio::test]
async fn e2e_register_crud_logout() -> anyhow::Result<()> {
    let app = start_server().await?;
    let api = api(&app)?;

    let user = api.register("花子", "hanako@example.com", "password123").await?;
    assert_eq!(user.name, "花子");
    assert!(api.session().is_logged_in());
    assert_eq!(api.me().await?.email, "hanako@example.com");

    let created = api
        .create_todo(&NewTodo { title: "買い物".into(), description: Some("牛乳".into()), status: None })
        .await?;
    assert_eq!(created.status, 0);
    assert_eq!(created.status_label(), "未着手");

    let updated = api
        .update_todo(created.id, &TodoUpdate { title: "買い物".into(), description: None, status: 1 })
        .await?;
    assert_eq!(updated.description.as_deref(), Some("牛乳"));
    assert_eq!(updated.status, 1);

    assert_eq!(api.list_todos().await?.len(), 1);
    assert_eq!(api.delete_todo(created.id).await?, "Todoリストを削除しました。");

    match api.get_todo(created.id).await {
        Err(ClientError::NotFound(msg)) => assert_eq!(msg, "Todoリストが見つかりません。"),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(matches!(api.delete_todo(created.id).await, Err(ClientError::NotFound(_))));

    assert_eq!(api.logout().await?, "ログアウトしました。");
    assert!(!api.session().is_logged_in());
    Ok(())
}

#[tokio::test]
async fn e2e_revoked_token_clears_session() -> anyhow::Result<()> {
    let app = start_server().await?;
    let first = api(&app)?;
    first.register("A", "a@example.com", "password123").await?;
    let stale = first.session().token().expect("token stored");

    let second = api(&app)?;
    second.session().set(&stale)?;
    first.logout().await?;

    let err = second.list_todos().await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(!second.session().is_logged_in());
    Ok(())
}

#[tokio::test]
async fn e2e_validation_errors_surface_per_field() -> anyhow::Result<()> {
    let app = start_server().await?;
    let api = api(&app)?;

    let err = api.register("", "bad", "short").await.unwrap_err();
    assert_eq!(err.field_errors("name"), ["The name field is required."]);
    assert_eq!(err.field_errors("password"), ["The password field must be at least 8 characters."]);

    api.register("B", "b@example.com", "password123").await?;
    let err = api.login("b@example.com", "wrong-one").await.unwrap_err();
    assert_eq!(err.field_errors("email"), ["ログイン情報が正しくありません。"]);

    let err = api.create_todo(&NewTodo { title: "x".repeat(300), ..Default::default() }).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(err.field_errors("title"), ["The title field must not be greater than 255 characters."]);
    Ok(())
}
