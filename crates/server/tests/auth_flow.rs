mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use support::{build_app, register, send, send_raw};

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;

    let body = json!({ "name": "山田太郎", "email": "taro@example.com", "password": "password123" });
    let (status, json) = send(&app, "POST", "/register", None, Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "ユーザー登録が完了しました。");
    assert_eq!(json["data"]["user"]["name"], "山田太郎");
    assert!(json["data"]["user"].get("password").is_none());
    let first = json["data"]["token"].as_str().unwrap().to_string();

    let body = json!({ "email": "taro@example.com", "password": "password123" });
    let (status, json) = send(&app, "POST", "/login", None, Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "ログインしました。");
    let second = json["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(first, second);

    let (status, json) = send(&app, "GET", "/me", Some(&second), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email"], "taro@example.com");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_rejected_without_new_row() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    register(&app, "dup@example.com").await?;

    let body = json!({ "name": "Other", "email": "dup@example.com", "password": "password123" });
    let (status, json) = send(&app, "POST", "/register", None, Some(body)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"]["email"], json!(["The email has already been taken."]));
    assert_eq!(json["message"], "The email has already been taken.");
    assert_eq!(models::user::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_simultaneous_registrations_one_wins() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    let body = json!({ "name": "Twin", "email": "twin@example.com", "password": "password123" });

    let (first, second) = tokio::join!(
        send(&app, "POST", "/register", None, Some(body.clone())),
        send(&app, "POST", "/register", None, Some(body.clone())),
    );
    let (first, second) = (first?, second?);
    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::UNPROCESSABLE_ENTITY]);

    let loser = if first.0 == StatusCode::CREATED { second.1 } else { first.1 };
    assert_eq!(loser["errors"]["email"], json!(["The email has already been taken."]));
    assert_eq!(models::user::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_register_validation_messages() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let body = json!({ "name": "", "email": "not-an-email", "password": "short" });
    let (status, json) = send(&app, "POST", "/register", None, Some(body)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"]["name"], json!(["The name field is required."]));
    assert_eq!(json["errors"]["email"], json!(["The email field must be a valid email address."]));
    assert_eq!(json["errors"]["password"], json!(["The password field must be at least 8 characters."]));
    assert_eq!(json["message"], "The name field is required. (and 2 more errors)");
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    let (app, db) = build_app().await?;
    register(&app, "w@example.com").await?;
    let tokens_before = models::personal_access_token::Entity::find().count(&db).await?;

    let body = json!({ "email": "w@example.com", "password": "wrong-password" });
    let (status, json) = send(&app, "POST", "/login", None, Some(body)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"], json!({ "email": ["ログイン情報が正しくありません。"] }));
    assert!(json.get("data").is_none());
    assert_eq!(models::personal_access_token::Entity::find().count(&db).await?, tokens_before);

    let body = json!({ "email": "nobody@example.com", "password": "password123" });
    let (status, json) = send(&app, "POST", "/login", None, Some(body)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"], json!({ "email": ["ログイン情報が正しくありません。"] }));
    Ok(())
}

#[tokio::test]
async fn test_logout_revokes_only_presented_token() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let first = register(&app, "l@example.com").await?;
    let body = json!({ "email": "l@example.com", "password": "password123" });
    let (_, json) = send(&app, "POST", "/login", None, Some(body)).await?;
    let second = json["data"]["token"].as_str().unwrap().to_string();

    let (status, json) = send(&app, "POST", "/logout", Some(&first), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "success", "message": "ログアウトしました。" }));

    let (status, json) = send(&app, "POST", "/logout", Some(&first), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, json!({ "message": "Unauthenticated." }));

    let (status, _) = send(&app, "GET", "/me", Some(&second), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_bad_authorization_headers() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    for header in [None, Some("Bearer"), Some("Basic abc"), Some("Bearer 1|nope")] {
        let mut req = Request::builder().method("GET").uri("/me");
        if let Some(h) = header {
            req = req.header("authorization", h);
        }
        let (status, json) = send_raw(&app, req.body(Body::empty())?).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header:?}");
        assert_eq!(json, json!({ "message": "Unauthenticated." }));
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let (status, json) = send_raw(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].is_string());

    let req = Request::builder().method("POST").uri("/login").body(Body::empty())?;
    let (status, json) = send_raw(&app, req).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"]["email"], json!(["The email field is required."]));
    assert_eq!(json["errors"]["password"], json!(["The password field is required."]));
    Ok(())
}

#[tokio::test]
async fn test_health_metrics_and_docs() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let (status, json) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok" }));

    register(&app, "m@example.com").await?;
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = tower::ServiceExt::oneshot(app.clone(), req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("todo_app_auth_events_total"));

    let (status, json) = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/todos/{id}"].is_object());
    Ok(())
}
