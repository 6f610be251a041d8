//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                              - Liveness message
//! GET    /test                          - Store/config diagnostics
//!
//! # Auth
//! POST   /api/admin/login               - Admin login
//!
//! # Categories
//! GET    /api/categories                - List categories (public)
//! POST   /api/admin/categories          - Create category (admin)
//! PUT    /api/admin/categories/{id}     - Update category (admin)
//! DELETE /api/admin/categories/{id}     - Delete category (admin)
//!
//! # Products
//! GET    /api/products                  - List in-stock products (public)
//! GET    /api/products/{id}             - Product detail (public)
//! POST   /api/admin/products            - Create product (admin)
//! PUT    /api/admin/products/{id}       - Update product (admin)
//! DELETE /api/admin/products/{id}       - Delete product (admin)
//!
//! # Delivery charges
//! GET    /api/delivery                  - Current delivery charges (public)
//! POST   /api/admin/delivery            - Set delivery charges (admin)
//! ```

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub mod auth;
pub mod categories;
pub mod delivery;
pub mod health;
pub mod products;

/// Build the full application router.
#[must_use]
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(delivery::router())
}

/// Response for delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
