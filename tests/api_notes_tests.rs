//! 笔记 API 集成测试
//! 覆盖 CRUD 与所有权校验，需要本地 PostgreSQL，因此默认 ignore

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, setup_test_db};

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// 注册一个用户并返回令牌
async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_create_and_list_notes() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let token = register(&app, "Alice", "alice@example.com", "pass1").await;

    let (status, note) = send_json(
        app.clone(),
        "POST",
        "/notes",
        Some(&token),
        Some(json!({ "title": "Groceries", "description": "buy milk" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["description"], "buy milk");
    assert!(note["id"].is_string());
    assert!(note["owner_id"].is_string());

    let (status, notes) = send_json(app, "GET", "/notes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], note["id"]);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_list_is_idempotent_and_scoped_to_owner() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let alice = register(&app, "Alice", "alice@example.com", "pass1").await;
    let bob = register(&app, "Bobby", "bob@example.com", "pass2").await;

    send_json(
        app.clone(),
        "POST",
        "/notes",
        Some(&alice),
        Some(json!({ "title": "Groceries", "description": "buy milk" })),
    )
    .await;

    // 没有写入的情况下两次查询结果一致
    let (_, first) = send_json(app.clone(), "GET", "/notes", Some(&alice), None).await;
    let (_, second) = send_json(app.clone(), "GET", "/notes", Some(&alice), None).await;
    assert_eq!(first, second);

    // Bob 看不到 Alice 的笔记
    let (_, bob_notes) = send_json(app, "GET", "/notes", Some(&bob), None).await;
    assert_eq!(bob_notes.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_partial_update_preserves_other_fields() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let token = register(&app, "Alice", "alice@example.com", "pass1").await;

    let (_, note) = send_json(
        app.clone(),
        "POST",
        "/notes",
        Some(&token),
        Some(json!({ "title": "Groceries", "description": "buy milk", "tag": "errands" })),
    )
    .await;
    let id = note["id"].as_str().unwrap();

    let (status, body) = send_json(
        app.clone(),
        "PUT",
        &format!("/notes/{}", id),
        Some(&token),
        Some(json!({ "title": "Groceries v2" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["note"]["title"], "Groceries v2");
    // 未提供的字段保持原值
    assert_eq!(body["note"]["description"], "buy milk");
    assert_eq!(body["note"]["tag"], "errands");
    // 所有权不随更新变化
    assert_eq!(body["note"]["owner_id"], note["owner_id"]);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_update_unknown_note_is_bad_request() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let token = register(&app, "Alice", "alice@example.com", "pass1").await;

    let (status, body) = send_json(
        app,
        "PUT",
        &format!("/notes/{}", uuid::Uuid::new_v4()),
        Some(&token),
        Some(json!({ "title": "whatever" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "note not found");
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_cross_user_mutation_denied() {
    // 规约场景：Alice 创建笔记，Bob 的令牌不能更新或删除它
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let alice = register(&app, "Alice", "alice@example.com", "pass1").await;
    let bob = register(&app, "Bobby", "bob@example.com", "pass2").await;

    let (_, note) = send_json(
        app.clone(),
        "POST",
        "/notes",
        Some(&alice),
        Some(json!({ "title": "Groceries", "description": "buy milk" })),
    )
    .await;
    let id = note["id"].as_str().unwrap();

    let (status, body) = send_json(
        app.clone(),
        "PUT",
        &format!("/notes/{}", id),
        Some(&bob),
        Some(json!({ "title": "hijacked!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send_json(
        app.clone(),
        "DELETE",
        &format!("/notes/{}", id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 笔记原样保留，属主仍然可以访问
    let (_, notes) = send_json(app, "GET", "/notes", Some(&alice), None).await;
    assert_eq!(notes.as_array().unwrap().len(), 1);
    assert_eq!(notes[0]["title"], "Groceries");
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_owner_can_delete_note() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let token = register(&app, "Alice", "alice@example.com", "pass1").await;

    let (_, note) = send_json(
        app.clone(),
        "POST",
        "/notes",
        Some(&token),
        Some(json!({ "title": "Groceries", "description": "buy milk" })),
    )
    .await;
    let id = note["id"].as_str().unwrap();

    let (status, body) = send_json(
        app.clone(),
        "DELETE",
        &format!("/notes/{}", id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["note"]["id"].as_str().unwrap(), id);

    let (_, notes) = send_json(app, "GET", "/notes", Some(&token), None).await;
    assert_eq!(notes.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_notes_require_token() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let (status, _) = send_json(app.clone(), "GET", "/notes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(
        app,
        "POST",
        "/notes",
        None,
        Some(json!({ "title": "Groceries", "description": "buy milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore] // 需要数据库
async fn test_create_note_validation() {
    let config = common::create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool).await;
    let app = notes_service::routes::create_router(state);

    let token = register(&app, "Alice", "alice@example.com", "pass1").await;

    let (status, body) = send_json(
        app,
        "POST",
        "/notes",
        Some(&token),
        Some(json!({ "title": "ab", "description": "1234" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}
