//! Orchard catalog backend library.
//!
//! This crate provides the backend functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `MongoDB` document store (categories, products, delivery charges,
//!   admin sessions)
//! - Token-based admin authorization via the `x-admin-token` header

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
