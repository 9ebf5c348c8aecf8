//! Message history and health endpoint tests.

mod common;

use common::{TestApp, unique_username};
use http::StatusCode;

use chathub_database::repositories::MessageRepository;
use chathub_entity::message::ChatMessage;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn message_history_requires_a_valid_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/messages", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/messages", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn message_history_returns_archived_messages() {
    let app = TestApp::new().await;
    let username = unique_username("grace");

    let login = app.register_and_login(&username, "secret123").await;
    let access_token = login["access_token"].as_str().unwrap();

    let repo = MessageRepository::new(app.db_pool.clone());
    let message = ChatMessage::new(&username, "hello from the archive");
    repo.insert(&message).await.expect("insert failed");

    let response = app
        .request("GET", "/api/messages", None, Some(access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let data = response.body["data"].as_array().expect("data is an array");
    let found = data
        .iter()
        .any(|m| m["from"] == username.as_str() && m["message"] == "hello from the archive");
    assert!(found, "inserted message missing from history");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn message_history_rejects_a_refresh_token() {
    let app = TestApp::new().await;
    let username = unique_username("heidi");

    let login = app.register_and_login(&username, "secret123").await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let response = app
        .request("GET", "/api/messages", None, Some(refresh_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn health_reports_database_connectivity() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
}
