//! Integration tests for admin login and token gating.
//!
//! These tests require a running server backed by `MongoDB` and
//! `ADMIN_PASSWORD` in the environment; see the crate docs.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use orchard_integration_tests::{ADMIN_TOKEN_HEADER, admin_token, base_url};

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_login_returns_token_and_expiry() {
    let client = Client::new();
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap();

    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    // expires_at is ISO-8601
    assert!(body["expires_at"].as_str().unwrap().contains('T'));
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_login_rejects_wrong_credentials() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "username": "admin", "password": "definitely-wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_admin_route_without_token() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/api/admin/categories", base_url()))
        .json(&json!({ "name": "X", "slug": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Missing admin token");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_admin_route_with_garbage_token() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/api/admin/categories", base_url()))
        .header(ADMIN_TOKEN_HEADER, "not-a-real-token")
        .json(&json!({ "name": "X", "slug": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_token_authorizes_admin_routes() {
    let client = Client::new();
    let token = admin_token(&client).await;

    // An empty delivery payload is valid (all fields have defaults), so a
    // 201 here proves the token passed the gate.
    let resp = client
        .post(format!("{}/api/admin/delivery", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
}
