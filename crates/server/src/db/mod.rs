//! Document store adapter for `MongoDB`.
//!
//! # Collections
//!
//! - `category` - catalog categories (unique index on `slug`)
//! - `product` - catalog products
//! - `deliverycharge` - append-only delivery-charge tables
//! - `adminsession` - admin bearer-token sessions
//!
//! Documents cross this boundary as fixed-shape row types and leave it as
//! the wire structs from [`crate::models`]; identifiers leave it as opaque
//! [`DocumentId`] strings. Nothing outside this module touches `ObjectId`,
//! BSON timestamps, or raw documents.

pub mod categories;
pub mod delivery;
pub mod products;
pub mod sessions;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use secrecy::ExposeSecret;
use thiserror::Error;

use orchard_core::DocumentId;

use crate::config::StoreConfig;

pub use categories::CategoryRepository;
pub use delivery::DeliveryRepository;
pub use products::ProductRepository;
pub use sessions::SessionRepository;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver-level failure.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique-constraint violation (duplicate slug).
    #[error("{0}")]
    Conflict(String),

    /// Malformed document id string.
    #[error("invalid id")]
    InvalidId,
}

/// Handle to the document store.
#[derive(Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Build a store handle from connection parameters.
    ///
    /// The driver connects lazily, so this only fails on a malformed
    /// connection string; use [`Store::ping`] for a live check.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the connection string cannot be
    /// parsed.
    pub async fn connect(config: &StoreConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(config.url.expose_secret()).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        let client = Client::with_options(options)?;

        Ok(Self {
            db: client.database(&config.database),
        })
    }

    /// Create the indexes the application relies on.
    ///
    /// Slug uniqueness is enforced by a unique index on `category.slug`;
    /// a duplicate-slug write surfaces as a write error mapped to
    /// [`RepositoryError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the index cannot be created
    /// (e.g., the store is unreachable).
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.db
            .collection::<mongodb::bson::Document>(categories::COLLECTION)
            .create_index(index)
            .await?;
        Ok(())
    }

    /// Round-trip liveness probe.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the store is unreachable.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Collection names, for the diagnostic endpoint.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the store is unreachable.
    pub async fn collection_names(&self) -> Result<Vec<String>, mongodb::error::Error> {
        self.db.list_collection_names().await
    }

    /// Category repository.
    #[must_use]
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(&self.db)
    }

    /// Product repository.
    #[must_use]
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(&self.db)
    }

    /// Delivery-charge repository.
    #[must_use]
    pub fn delivery(&self) -> DeliveryRepository {
        DeliveryRepository::new(&self.db)
    }

    /// Admin session repository.
    #[must_use]
    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(&self.db)
    }
}

/// Parse a wire id into a store `ObjectId`.
///
/// Fails with [`RepositoryError::InvalidId`] before any store round-trip.
pub(crate) fn parse_object_id(id: &DocumentId) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| RepositoryError::InvalidId)
}

/// Whether a driver error is a unique-index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write)) if write.code == 11000
    )
}
