//! Tests for the backend login client.
//!
//! These tests use a mock backend to verify request shape and the mapping
//! of backend answers to login results.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use marketplace_core::{Email, Role, UserId};
use marketplace_storefront::config::BackendConfig;
use marketplace_storefront::services::auth::{AuthClient, LoginError};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AuthClient {
    let config = BackendConfig::new(&server.uri(), Duration::from_secs(5)).unwrap();
    AuthClient::new(&config).unwrap()
}

fn credentials() -> (Email, SecretString) {
    (
        Email::parse("buyer@shop.test").unwrap(),
        SecretString::from("hunter2".to_string()),
    )
}

#[tokio::test]
async fn test_posts_json_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/log-in"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "buyer@shop.test",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "id": "u-1",
                "firstName": "A",
                "lastName": "B",
                "username": "ab",
                "email": "buyer@shop.test",
                "role": "user"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (email, password) = credentials();
    let user = client_for(&server).log_in(&email, &password).await.unwrap();

    assert_eq!(user.id, UserId::new("u-1"));
    assert_eq!(user.full_name(), "A B");
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn test_seller_role_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/log-in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "username": "shopkeeper", "role": "seller"}
        })))
        .mount(&server)
        .await;

    let (email, password) = credentials();
    let user = client_for(&server).log_in(&email, &password).await.unwrap();

    assert!(user.role.is_seller());
    assert_eq!(user.full_name(), "shopkeeper");
}

#[tokio::test]
async fn test_non_success_status_is_login_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/log-in"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let (email, password) = credentials();
    let err = client_for(&server)
        .log_in(&email, &password)
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::LoginFailed { status: 401 }));
    assert_eq!(
        err.to_string(),
        "Login failed. Please check your credentials."
    );
}

#[tokio::test]
async fn test_non_success_html_is_still_login_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/log-in"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>oops</h1>"))
        .mount(&server)
        .await;

    let (email, password) = credentials();
    let err = client_for(&server)
        .log_in(&email, &password)
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::LoginFailed { status: 500 }));
}

#[tokio::test]
async fn test_success_without_json_content_type_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/log-in"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .mount(&server)
        .await;

    let (email, password) = credentials();
    let err = client_for(&server)
        .log_in(&email, &password)
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::UnexpectedResponse));
    assert_eq!(err.to_string(), "Unexpected response from server");
}

#[tokio::test]
async fn test_json_without_user_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/log-in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let (email, password) = credentials();
    let err = client_for(&server)
        .log_in(&email, &password)
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::UnexpectedResponse));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 1.
    let config = BackendConfig::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let client = AuthClient::new(&config).unwrap();

    let (email, password) = credentials();
    let err = client.log_in(&email, &password).await.unwrap_err();

    assert!(matches!(err, LoginError::Network(_)));
}
