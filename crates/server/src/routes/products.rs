//! Product handlers: public listing and detail, admin management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use orchard_core::DocumentId;

use super::DeleteResponse;
use crate::error::ApiError;
use crate::middleware::RequireAdmin;
use crate::models::parse_slug;
use crate::models::product::{Product, ProductInput, ProductUpdate};
use crate::state::AppState;

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/admin/products", post(create_product))
        .route(
            "/api/admin/products/{id}",
            put(update_product).delete(delete_product),
        )
}

/// Query parameters for the public product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category_slug: Option<String>,
}

/// List in-stock products, newest first, optionally filtered by category.
///
/// An empty `category_slug=` parameter means "no filter", matching the
/// behavior of treating it as absent.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    let filter = query
        .category_slug
        .as_deref()
        .filter(|slug| !slug.is_empty())
        .map(|slug| parse_slug(slug, "category_slug"))
        .transpose()?;

    Ok(Json(store.products().list_in_stock(filter.as_ref()).await?))
}

/// Fetch one product by id.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<Product>, ApiError> {
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    let product = store
        .products()
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    Ok(Json(product))
}

/// Create a product.
///
/// The referenced category must exist at create time; the reference is a
/// slug, not an id, and is deliberately not re-checked when categories are
/// later deleted.
pub async fn create_product(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = payload.validate()?;
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;

    store
        .categories()
        .find_by_slug(&product.category_slug)
        .await?
        .ok_or(ApiError::UnknownCategory)?;

    let created = store.products().insert(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Apply a partial update to a product.
///
/// A changed `category_slug` is re-checked against the category collection.
pub async fn update_product(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
    Json(payload): Json<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let changes = payload.validate()?;
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;

    if let Some(slug) = &changes.category_slug {
        store
            .categories()
            .find_by_slug(slug)
            .await?
            .ok_or(ApiError::UnknownCategory)?;
    }

    let updated = store
        .products()
        .update(&id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Product"))?;
    Ok(Json(updated))
}

/// Delete a product.
pub async fn delete_product(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    if store.products().delete(&id).await? {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::NotFound("Product"))
    }
}
