//! Admin authorization extractor.
//!
//! Admin-only routes take [`RequireAdmin`] as an argument; the extractor
//! reads the bearer token from the `x-admin-token` header and checks it
//! against the session collection. Sessions are never renewed here: an
//! expired session stays expired until a fresh login.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     _admin: RequireAdmin,
//!     State(state): State<AppState>,
//! ) -> Result<Json<Something>, ApiError> {
//!     // only reached with a live admin session
//! }
//! ```

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

use crate::models::session::AdminSession;
use crate::state::AppState;

/// Request header carrying the admin bearer token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extractor that requires a live admin session.
pub struct RequireAdmin(pub AdminSession);

/// Rejection for admin-gated routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `x-admin-token` header on the request.
    MissingToken,
    /// No session matches the presented token.
    InvalidToken,
    /// The matching session is past its expiry.
    SessionExpired,
    /// The session collection cannot be consulted.
    StoreUnavailable,
}

impl AuthRejection {
    const fn status(self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    const fn detail(self) -> &'static str {
        match self {
            Self::MissingToken => "Missing admin token",
            Self::InvalidToken => "Invalid token",
            Self::SessionExpired => "Session expired",
            Self::StoreUnavailable => "Store unavailable",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthRejection::MissingToken)?;

        let store = state.store().ok_or(AuthRejection::StoreUnavailable)?;
        let session: AdminSession = store
            .sessions()
            .find_by_token(token)
            .await
            .map_err(|err| {
                tracing::error!("Session lookup failed: {err}");
                AuthRejection::StoreUnavailable
            })?
            .ok_or(AuthRejection::InvalidToken)?;

        if session.is_expired(Utc::now()) {
            return Err(AuthRejection::SessionExpired);
        }

        Ok(Self(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(AuthRejection::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthRejection::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthRejection::SessionExpired.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::StoreUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_rejection_details() {
        assert_eq!(AuthRejection::MissingToken.detail(), "Missing admin token");
        assert_eq!(AuthRejection::InvalidToken.detail(), "Invalid token");
        assert_eq!(AuthRejection::SessionExpired.detail(), "Session expired");
    }
}
