//! HTTP contract tests for the `/users` endpoints.
//!
//! The router runs against the in-memory repository, so no database is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_lib::routes::create_router;
use api_lib::state::AppState;
use user_service_lib::repository::InMemoryUserRepository;
use user_service_lib::service::UserManager;

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    let service = Arc::new(UserManager::new(Arc::new(InMemoryUserRepository::new())));
    create_router(AppState::new(service, None))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

async fn create_test_user(app: &Router, email: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/users",
        Some(json!({ "name": "Test", "email": email, "password": "12345678" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn assert_error(body: &Value, status: u16, detail: &str) {
    assert_eq!(body["status"], status);
    assert_eq!(body["detail"], detail);
}

// =============================================================================
// GET /users
// =============================================================================

#[tokio::test]
async fn test_list_users_empty_is_no_content() {
    let (status, body) = send(&app(), "GET", "/users", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_users_returns_views() {
    let app = app();
    create_test_user(&app, "test@gmail.com").await;

    let (status, body) = send_json(&app, "GET", "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "test@gmail.com");
    assert!(users[0].get("password").is_none());
}

// =============================================================================
// POST /users
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_view() {
    let body = create_test_user(&app(), "test@gmail.com").await;

    assert!(body["id"].as_str().is_some_and(|id| uuid::Uuid::parse_str(id).is_ok()));
    assert_eq!(body["nome"], "Test");
    assert_eq!(body["email"], "test@gmail.com");
    assert_eq!(body.as_object().map(|o| o.len()), Some(3));
}

#[tokio::test]
async fn test_create_user_ignores_client_id() {
    let app = app();
    let forced = "00000000-0000-0000-0000-000000000001";

    let (status, body) = send_json(
        &app,
        "POST",
        "/users",
        Some(json!({ "id": forced, "name": "Test", "email": "test@gmail.com", "password": "12345678" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], forced);
}

#[tokio::test]
async fn test_create_user_duplicate_email_conflicts() {
    let app = app();
    create_test_user(&app, "test@gmail.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "Other", "email": "test@gmail.com", "password": "87654321" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, 409, "Esse e-mail já existe.");
}

#[tokio::test]
async fn test_create_user_validation_lists_fields() {
    let (status, body) = send_json(
        &app(),
        "POST",
        "/users",
        Some(json!({ "name": "", "email": "not-an-email", "password": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        400,
        "{email=O e-mail informado é inválido., name=O nome é obrigatório., password=A senha deve ter pelo menos 8 caracteres.}",
    );
}

#[tokio::test]
async fn test_create_user_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": \"Test\","))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_error(&body, 400, "Corpo da requisição ausente ou malformado.");
}

#[tokio::test]
async fn test_create_user_missing_fields_are_listed() {
    let (status, body) = send_json(
        &app(),
        "POST",
        "/users",
        Some(json!({ "email": "test@gmail.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        400,
        "{name=O nome é obrigatório., password=A senha deve ter pelo menos 8 caracteres.}",
    );
}

#[tokio::test]
async fn test_create_user_blank_name_rejected() {
    let app = app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "   ", "email": "blank@gmail.com", "password": "12345678" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 400, "{name=O nome é obrigatório.}");

    let (status, _) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// =============================================================================
// GET /users/{id}
// =============================================================================

#[tokio::test]
async fn test_get_user_round_trip() {
    let app = app();
    let created = create_test_user(&app, "test@gmail.com").await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let (status, body) = send_json(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let uri = format!("/users/{}", uuid::Uuid::new_v4());

    let (status, body) = send_json(&app(), "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "Usuário não encontrado.");
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let (status, body) = send_json(&app(), "GET", "/users/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 400, "Parâmetro de URL inválido.");
}

// =============================================================================
// PATCH /users/{id}
// =============================================================================

#[tokio::test]
async fn test_update_user_all_fields_null() {
    let uri = format!("/users/{}", uuid::Uuid::new_v4());

    let (status, body) = send_json(
        &app(),
        "PATCH",
        &uri,
        Some(json!({ "name": null, "email": null })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        400,
        "Todos os campos estão nulos. Pelo menos um campo deve ser preenchido.",
    );
}

#[tokio::test]
async fn test_update_user_name_only() {
    let app = app();
    let created = create_test_user(&app, "test@gmail.com").await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let (status, body) = send_json(&app, "PATCH", &uri, Some(json!({ "name": "Renamed" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["nome"], "Renamed");
    assert_eq!(body["email"], "test@gmail.com");
}

#[tokio::test]
async fn test_update_user_not_found() {
    let uri = format!("/users/{}", uuid::Uuid::new_v4());

    let (status, body) = send_json(&app(), "PATCH", &uri, Some(json!({ "name": "Renamed" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "Usuário não encontrado.");
}

#[tokio::test]
async fn test_update_user_email_taken() {
    let app = app();
    let first = create_test_user(&app, "first@gmail.com").await;
    create_test_user(&app, "second@gmail.com").await;
    let uri = format!("/users/{}", first["id"].as_str().unwrap());

    let (status, body) = send_json(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "email": "second@gmail.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, 409, "Esse e-mail já existe.");
}

// =============================================================================
// DELETE /users/{id}
// =============================================================================

#[tokio::test]
async fn test_delete_user_unknown() {
    let uri = format!("/users/{}", uuid::Uuid::new_v4());

    let (status, body) = send_json(&app(), "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "Usuário não encontrado.");
}

#[tokio::test]
async fn test_delete_user_then_get_is_not_found() {
    let app = app();
    let created = create_test_user(&app, "test@gmail.com").await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Ancillary endpoints
// =============================================================================

#[tokio::test]
async fn test_health_with_memory_storage() {
    let (status, body) = send_json(&app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_openapi_document_lists_user_paths() {
    let (status, body) = send_json(&app(), "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users"].is_object());
    assert!(body["paths"]["/users/{id}"]["patch"].is_object());
}
