//! Entity models and payload validation.
//!
//! Wire-facing entity structs plus the input DTOs accepted by the HTTP
//! surface. Validation happens here, before any store access: create
//! payloads validate into `New*` values, partial-update payloads validate
//! into `*Changes` field-update sets where every field is an `Option` and
//! only present fields participate in the merge.
//!
//! The store adapter in [`crate::db`] only ever sees already-validated
//! values.

pub mod category;
pub mod delivery;
pub mod product;
pub mod session;

use orchard_core::{Price, PriceError, Slug};
use thiserror::Error;

/// Payload constraint violations, naming the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field is empty or whitespace.
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// A numeric field is below zero.
    #[error("Field '{0}' must be non-negative")]
    NegativeNumber(&'static str),

    /// A numeric field is NaN or infinite.
    #[error("Field '{0}' must be a finite number")]
    NotFinite(&'static str),

    /// A URL field does not parse as a URL.
    #[error("Field '{0}' must be a well-formed URL")]
    MalformedUrl(&'static str),

    /// A slug field is not URL-safe.
    #[error("Field '{0}' must be a URL-safe slug")]
    MalformedSlug(&'static str),

    /// A partial-update payload with zero recognized fields.
    #[error("No fields to update")]
    EmptyUpdate,
}

/// Reject empty or whitespace-only strings.
pub(crate) fn require_non_empty(
    value: String,
    field: &'static str,
) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(value)
    }
}

pub(crate) fn parse_slug(value: &str, field: &'static str) -> Result<Slug, ValidationError> {
    Slug::parse(value).map_err(|_| ValidationError::MalformedSlug(field))
}

pub(crate) fn parse_price(value: f64, field: &'static str) -> Result<Price, ValidationError> {
    Price::parse(value).map_err(|err| match err {
        PriceError::Negative => ValidationError::NegativeNumber(field),
        PriceError::NotFinite => ValidationError::NotFinite(field),
    })
}

/// Check URL well-formedness; the original string is kept as-is.
pub(crate) fn require_well_formed_url(
    value: String,
    field: &'static str,
) -> Result<String, ValidationError> {
    url::Url::parse(&value).map_err(|_| ValidationError::MalformedUrl(field))?;
    Ok(value)
}
