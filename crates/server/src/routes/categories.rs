//! Category handlers: public listing, admin management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use orchard_core::DocumentId;

use super::DeleteResponse;
use crate::error::ApiError;
use crate::middleware::RequireAdmin;
use crate::models::category::{Category, CategoryInput, CategoryUpdate};
use crate::state::AppState;

/// Build the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/admin/categories", post(create_category))
        .route(
            "/api/admin/categories/{id}",
            put(update_category).delete(delete_category),
        )
}

/// List all categories, newest first.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    Ok(Json(store.categories().list().await?))
}

/// Create a category.
///
/// Slug uniqueness is checked by the store's unique index at the insert
/// itself; a duplicate slug comes back as a 400 Conflict.
pub async fn create_category(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = payload.validate()?;
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    let created = store.categories().insert(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Apply a partial update to a category.
pub async fn update_category(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let changes = payload.validate()?;
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    let updated = store
        .categories()
        .update(&id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;
    Ok(Json(updated))
}

/// Delete a category.
///
/// Products referencing the slug are left in place (no cascade).
pub async fn delete_category(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    if store.categories().delete(&id).await? {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(ApiError::NotFound("Category"))
    }
}
