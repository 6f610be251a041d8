//! Integration tests for Orchard.
//!
//! # Running Tests
//!
//! ```bash
//! # Start MongoDB and the server
//! docker run -d -p 27017:27017 mongo
//! ADMIN_PASSWORD=... DATABASE_URL=mongodb://localhost:27017 DATABASE_NAME=orchard \
//!     cargo run -p orchard-server
//!
//! # Run the ignored tests against it
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! Environment:
//! - `ORCHARD_BASE_URL` - server under test (default: <http://127.0.0.1:8000>)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - must match the server's credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ORCHARD_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

/// Header carrying the admin bearer token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Log in with the credentials from the environment and return the token.
///
/// # Panics
///
/// Panics if the login request fails; the suite cannot run without a token.
pub async fn admin_token(client: &Client) -> String {
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");

    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to reach login endpoint");
    assert!(resp.status().is_success(), "login failed: {}", resp.status());

    let body: Value = resp.json().await.expect("login response was not JSON");
    body["token"]
        .as_str()
        .expect("login response had no token")
        .to_string()
}
