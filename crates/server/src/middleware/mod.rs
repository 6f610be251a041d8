//! Request middleware and extractors.

pub mod auth;

pub use auth::{ADMIN_TOKEN_HEADER, RequireAdmin};
