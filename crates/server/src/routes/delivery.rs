//! Delivery-charge handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::ApiError;
use crate::middleware::RequireAdmin;
use crate::models::delivery::{DeliveryCharge, DeliveryChargeInput};
use crate::state::AppState;

/// Build the delivery router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/delivery", get(get_delivery))
        .route("/api/admin/delivery", post(set_delivery))
}

/// The current delivery-charge table, or `null` if none was ever set.
pub async fn get_delivery(
    State(state): State<AppState>,
) -> Result<Json<Option<DeliveryCharge>>, ApiError> {
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    Ok(Json(store.delivery().latest().await?))
}

/// Set the delivery charges.
///
/// Always inserts a new table; the newest insertion becomes "current" for
/// subsequent reads. Existing tables are never mutated or deleted.
pub async fn set_delivery(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<DeliveryChargeInput>,
) -> Result<(StatusCode, Json<DeliveryCharge>), ApiError> {
    let table = payload.validate()?;
    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    let created = store.delivery().insert(table).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
