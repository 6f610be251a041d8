//! Integration tests for the catalog API (categories and products).
//!
//! These tests require:
//! - A running `MongoDB` instance
//! - The server running (cargo run -p orchard-server)
//! - `ADMIN_PASSWORD` in the environment, matching the server's
//!
//! Run with: cargo test -p orchard-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use orchard_integration_tests::{ADMIN_TOKEN_HEADER, admin_token, base_url};

/// A slug that cannot collide across test runs.
fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Test helper: create a category and return its document.
async fn create_category(client: &Client, token: &str, slug: &str) -> Value {
    let resp = client
        .post(format!("{}/api/admin/categories", base_url()))
        .header(ADMIN_TOKEN_HEADER, token)
        .json(&json!({ "name": "Test Category", "slug": slug }))
        .send()
        .await
        .expect("Failed to create category");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("category response was not JSON")
}

/// Test helper: create a product in a category and return its document.
async fn create_product(client: &Client, token: &str, category_slug: &str) -> Value {
    let resp = client
        .post(format!("{}/api/admin/products", base_url()))
        .header(ADMIN_TOKEN_HEADER, token)
        .json(&json!({
            "title": "Sneaker",
            "price": 49.99,
            "category_slug": category_slug,
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("product response was not JSON")
}

// ============================================================================
// Category Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_category_create_appears_in_list() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let slug = unique_slug("shoes");

    let created = create_category(&client, &token, &slug).await;
    assert!(created["id"].is_string());
    assert_eq!(created["slug"], slug.as_str());
    assert_eq!(created["is_active"], true);

    let resp = client
        .get(format!("{}/api/categories", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Vec<Value> = resp.json().await.unwrap();
    let found = list.iter().find(|c| c["slug"] == slug.as_str()).unwrap();
    assert_eq!(found["id"], created["id"]);
    assert_eq!(found["name"], "Test Category");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_duplicate_slug_conflict() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let slug = unique_slug("dup");

    create_category(&client, &token, &slug).await;

    let resp = client
        .post(format!("{}/api/admin/categories", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .json(&json!({ "name": "Duplicate", "slug": slug }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Slug already exists");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_category_empty_update_rejected() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let created = create_category(&client, &token, &unique_slug("empty-upd")).await;
    let id = created["id"].as_str().unwrap();

    let resp = client
        .put(format!("{}/api/admin/categories/{id}", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "No fields to update");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_category_update_stamps_updated_at() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let created = create_category(&client, &token, &unique_slug("upd")).await;
    let id = created["id"].as_str().unwrap();
    assert!(created.get("updated_at").is_none());

    let resp = client
        .put(format!("{}/api/admin/categories/{id}", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .json(&json!({ "name": "Renamed" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(updated["slug"], created["slug"]);
    assert!(updated["updated_at"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_category_delete_twice_reports_not_found() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let created = create_category(&client, &token, &unique_slug("del")).await;
    let id = created["id"].as_str().unwrap();

    let first = client
        .delete(format!("{}/api/admin/categories/{id}", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["success"], true);

    let second = client
        .delete(format!("{}/api/admin/categories/{id}", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_malformed_id_is_bad_request() {
    let client = Client::new();
    let token = admin_token(&client).await;

    let resp = client
        .delete(format!("{}/api/admin/categories/not-an-id", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Invalid id");
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_product_requires_existing_category() {
    let client = Client::new();
    let token = admin_token(&client).await;

    let resp = client
        .post(format!("{}/api/admin/products", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .json(&json!({
            "title": "Orphan",
            "price": 1.0,
            "category_slug": unique_slug("missing"),
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Category does not exist");
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_product_detail_and_not_found() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let slug = unique_slug("detail");
    create_category(&client, &token, &slug).await;
    let product = create_product(&client, &token, &slug).await;
    let id = product["id"].as_str().unwrap();

    let resp = client
        .get(format!("{}/api/products/{id}", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "Sneaker");

    // A well-formed id that matches nothing is 404
    let resp = client
        .get(format!(
            "{}/api/products/ffffffffffffffffffffffff",
            base_url()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_out_of_stock_products_hidden_from_list() {
    let client = Client::new();
    let token = admin_token(&client).await;
    let slug = unique_slug("stock");
    create_category(&client, &token, &slug).await;
    let product = create_product(&client, &token, &slug).await;
    let id = product["id"].as_str().unwrap();

    let in_list = |list: Vec<Value>| list.iter().any(|p| p["id"] == product["id"]);

    let list: Vec<Value> = client
        .get(format!("{}/api/products?category_slug={slug}", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(in_list(list));

    // Mark out of stock; it disappears from the public list
    let resp = client
        .put(format!("{}/api/admin/products/{id}", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .json(&json!({ "in_stock": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Vec<Value> = client
        .get(format!("{}/api/products?category_slug={slug}", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!in_list(list));
}

#[tokio::test]
#[ignore = "Requires running server and MongoDB"]
async fn test_category_delete_orphans_products() {
    // End-to-end: create category + product, delete the category, and the
    // product remains reachable under the orphaned slug (no cascade).
    let client = Client::new();
    let token = admin_token(&client).await;
    let slug = unique_slug("orphan");

    let category = create_category(&client, &token, &slug).await;
    let product = create_product(&client, &token, &slug).await;
    assert_eq!(product["category_slug"], category["slug"]);

    let category_id = category["id"].as_str().unwrap();
    let resp = client
        .delete(format!("{}/api/admin/categories/{category_id}", base_url()))
        .header(ADMIN_TOKEN_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Vec<Value> = client
        .get(format!("{}/api/products?category_slug={slug}", base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.iter().any(|p| p["id"] == product["id"]));
}
