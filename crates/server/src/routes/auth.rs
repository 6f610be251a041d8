//! Admin login handler.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::session::AdminSession;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue an admin session token for a valid credential pair.
///
/// The token is an opaque random string; the session it names authorizes
/// its bearer until `expires_at`, after which a fresh login is required.
///
/// # Errors
///
/// Returns `ApiError::InvalidCredentials` (401) on a mismatch and
/// `ApiError::StoreUnavailable` (503) when the session cannot be persisted.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let admin = &state.config().admin;
    if payload.username != admin.username
        || payload.password != admin.password.expose_secret()
    {
        return Err(ApiError::InvalidCredentials);
    }

    let store = state.store().ok_or(ApiError::StoreUnavailable)?;
    let now = Utc::now();
    let session = AdminSession {
        token: Uuid::new_v4().simple().to_string(),
        created_at: now,
        expires_at: now + Duration::hours(admin.session_ttl_hours),
    };
    store.sessions().insert(&session).await?;

    tracing::info!("Admin session issued");
    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}
