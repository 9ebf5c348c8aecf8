//! End-to-end authentication flow tests: register, login, refresh, logout.

mod common;

use common::{TestApp, unique_username};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn full_session_lifecycle() {
    let app = TestApp::new().await;
    let username = unique_username("alice");

    let login = app.register_and_login(&username, "secret123").await;
    let access_token = login["access_token"].as_str().unwrap().to_string();
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    assert!(!access_token.is_empty());
    assert!(!refresh_token.is_empty());
    assert_ne!(access_token, refresh_token);
    assert_eq!(app.session_count_for_token(&access_token).await, 1);

    // Refresh replaces the stored access token with a fresh one.
    let response = app
        .request("POST", "/api/auth/refresh", None, Some(&refresh_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let new_access = response.body["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(new_access, access_token);
    assert_eq!(app.session_count_for_token(&access_token).await, 0);
    assert_eq!(app.session_count_for_token(&new_access).await, 1);

    // Logout deletes the session row.
    let response = app
        .request("POST", "/api/auth/logout", None, Some(&new_access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.session_count_for_token(&new_access).await, 0);

    // Repeated logout is a no-op success.
    let response = app
        .request("POST", "/api/auth/logout", None, Some(&new_access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn duplicate_username_is_rejected() {
    let app = TestApp::new().await;
    let username = unique_username("bob");

    let body = json!({
        "username": username,
        "password": "secret123",
        "full_name": "Bob Example",
    });
    let response = app
        .request("POST", "/api/auth/register", Some(body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/auth/register", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn short_password_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": unique_username("carol"),
                "password": "abc",
                "full_name": "Carol Example",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    let username = unique_username("dave");
    app.register_and_login(&username, "secret123").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": "wrong-pass" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": unique_username("nobody"), "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn refresh_rejects_an_access_token() {
    let app = TestApp::new().await;
    let username = unique_username("erin");

    let login = app.register_and_login(&username, "secret123").await;
    let access_token = login["access_token"].as_str().unwrap();

    let response = app
        .request("POST", "/api/auth/refresh", None, Some(access_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn refresh_after_logout_is_unauthorized() {
    let app = TestApp::new().await;
    let username = unique_username("frank");

    let login = app.register_and_login(&username, "secret123").await;
    let access_token = login["access_token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let response = app
        .request("POST", "/api/auth/logout", None, Some(access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The refresh token still decodes, but its session row is gone.
    let response = app
        .request("POST", "/api/auth/refresh", None, Some(refresh_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn garbage_refresh_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/auth/refresh", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
