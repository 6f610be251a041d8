//! Unified error handling for the catalog API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Application-level error type for the catalog API.
///
/// Every failure is handled at the route boundary and converted into a
/// structured `{"detail": "..."}` response; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Inbound payload failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Admin login with a wrong credential pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Product payload references a category slug with no matching category.
    #[error("Category does not exist")]
    UnknownCategory,

    /// The document store was not available at startup.
    #[error("Store unavailable")]
    StoreUnavailable,

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server-side errors with Sentry
        if matches!(
            self,
            Self::Store(RepositoryError::Database(_) | RepositoryError::DataCorruption(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Catalog request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::UnknownCategory => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(err) => match err {
                RepositoryError::InvalidId | RepositoryError::Conflict(_) => {
                    StatusCode::BAD_REQUEST
                }
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        };

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Store(err) => match err {
                RepositoryError::InvalidId => "Invalid id".to_string(),
                RepositoryError::Conflict(message) => message.clone(),
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    "Internal server error".to_string()
                }
            },
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("Category");
        assert_eq!(err.to_string(), "Category not found");

        let err = ApiError::Validation(ValidationError::EmptyField("name"));
        assert_eq!(err.to_string(), "Field 'name' must not be empty");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            get_status(ApiError::Validation(ValidationError::EmptyUpdate)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(get_status(ApiError::NotFound("Product")), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(ApiError::UnknownCategory),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::StoreUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_repository_error_status_codes() {
        assert_eq!(
            get_status(ApiError::Store(RepositoryError::InvalidId)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Store(RepositoryError::Conflict(
                "Slug already exists".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Store(RepositoryError::DataCorruption(
                "bad".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
