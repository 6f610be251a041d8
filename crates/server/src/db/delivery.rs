//! Delivery-charge repository.
//!
//! The collection is append-only: every "set" inserts a new document and
//! reads return whichever document was created last.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime as BsonDateTime, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use orchard_core::{DocumentId, Price};

use super::RepositoryError;
use crate::models::delivery::{DeliveryCharge, DeliveryRate, NewDeliveryCharge};

/// Collection name for delivery-charge tables.
pub(crate) const COLLECTION: &str = "deliverycharge";

/// Stored shape of a delivery-charge document.
#[derive(Debug, Serialize, Deserialize)]
struct DeliveryChargeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    rates: Vec<DeliveryRateDocument>,
    created_at: BsonDateTime,
}

/// Stored shape of one rate entry.
#[derive(Debug, Serialize, Deserialize)]
struct DeliveryRateDocument {
    location: String,
    charge: f64,
}

impl TryFrom<DeliveryChargeDocument> for DeliveryCharge {
    type Error = RepositoryError;

    fn try_from(doc: DeliveryChargeDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or_else(|| {
            RepositoryError::DataCorruption("delivery charge document without _id".to_string())
        })?;
        let rates = doc
            .rates
            .into_iter()
            .map(|rate| {
                Ok(DeliveryRate {
                    charge: Price::parse(rate.charge).map_err(|e| {
                        RepositoryError::DataCorruption(format!("invalid charge in store: {e}"))
                    })?,
                    location: rate.location,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Self {
            id: DocumentId::new(id.to_hex()),
            name: doc.name,
            notes: doc.notes,
            rates,
            created_at: doc.created_at.to_chrono(),
        })
    }
}

/// Repository for delivery-charge documents.
pub struct DeliveryRepository {
    collection: Collection<DeliveryChargeDocument>,
}

impl DeliveryRepository {
    pub(crate) fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// The most recently created table, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest(&self) -> Result<Option<DeliveryCharge>, RepositoryError> {
        let doc = self
            .collection
            .find_one(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;
        doc.map(TryInto::try_into).transpose()
    }

    /// Insert a new table, stamping its creation time.
    ///
    /// Existing tables are never mutated; the new document becomes the
    /// "current" one by virtue of its newer timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, table: NewDeliveryCharge) -> Result<DeliveryCharge, RepositoryError> {
        let document = DeliveryChargeDocument {
            id: None,
            name: table.name,
            notes: table.notes,
            rates: table
                .rates
                .into_iter()
                .map(|rate| DeliveryRateDocument {
                    location: rate.location,
                    charge: rate.charge.get(),
                })
                .collect(),
            created_at: BsonDateTime::now(),
        };

        let result = self.collection.insert_one(&document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::DataCorruption("store assigned a non-ObjectId id".to_string())
        })?;

        let stored = self
            .collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption("inserted delivery charge not found".to_string())
            })?;
        stored.try_into()
    }
}
