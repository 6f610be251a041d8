//! Delivery-charge entity and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orchard_core::{DocumentId, Price};

use super::{ValidationError, parse_price, require_non_empty};

/// Default name for a delivery-charge table.
pub const DEFAULT_DELIVERY_NAME: &str = "Standard Delivery";

/// One delivery charge for a location/zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRate {
    pub location: String,
    pub charge: Price,
}

/// A delivery-charge table.
///
/// Tables are append-only: "setting" the charges always inserts a new
/// document, and the publicly visible table is the most recently created
/// one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryCharge {
    pub id: DocumentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub rates: Vec<DeliveryRate>,
    pub created_at: DateTime<Utc>,
}

/// Set-delivery-charges payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryChargeInput {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub rates: Option<Vec<DeliveryRateInput>>,
}

/// One rate entry in a set-delivery-charges payload.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryRateInput {
    pub location: String,
    pub charge: f64,
}

/// A validated delivery-charge table ready for insertion.
#[derive(Debug, Clone)]
pub struct NewDeliveryCharge {
    pub name: String,
    pub notes: Option<String>,
    pub rates: Vec<DeliveryRate>,
}

impl DeliveryChargeInput {
    /// Validate the payload into an insertable table.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the offending field.
    pub fn validate(self) -> Result<NewDeliveryCharge, ValidationError> {
        let rates = self
            .rates
            .unwrap_or_default()
            .into_iter()
            .map(|rate| {
                Ok(DeliveryRate {
                    location: require_non_empty(rate.location, "location")?,
                    charge: parse_price(rate.charge, "charge")?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(NewDeliveryCharge {
            name: self
                .name
                .unwrap_or_else(|| DEFAULT_DELIVERY_NAME.to_string()),
            notes: self.notes,
            rates,
        })
    }
}
