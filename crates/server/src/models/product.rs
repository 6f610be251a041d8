//! Product entity and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orchard_core::{DocumentId, Price, Slug};

use super::{ValidationError, parse_price, parse_slug, require_non_empty, require_well_formed_url};

/// A catalog product.
///
/// `category_slug` references a [`super::category::Category`] by slug; the
/// reference is checked at create/update time but deliberately not on
/// category delete, so products can outlive their category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: DocumentId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub category_slug: Slug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create-product payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_slug: String,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
}

/// A validated product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_slug: Slug,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

impl ProductInput {
    /// Validate the payload into an insertable product.
    ///
    /// Category existence is a store-level check and happens in the handler,
    /// not here.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the offending field.
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        Ok(NewProduct {
            title: require_non_empty(self.title, "title")?,
            description: self.description,
            price: parse_price(self.price, "price")?,
            category_slug: parse_slug(&self.category_slug, "category_slug")?,
            image_url: self
                .image_url
                .map(|u| require_well_formed_url(u, "image_url"))
                .transpose()?,
            in_stock: self.in_stock.unwrap_or(true),
        })
    }
}

/// Partial-update payload for a product.
///
/// Absent and `null` fields do not participate in the merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_slug: Option<String>,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
}

/// Validated field-update set for a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_slug: Option<Slug>,
    pub image_url: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductUpdate {
    /// Validate the present fields into a field-update set.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyUpdate` when no recognized field is present,
    /// otherwise the first per-field violation.
    pub fn validate(self) -> Result<ProductChanges, ValidationError> {
        let changes = ProductChanges {
            title: self
                .title
                .map(|title| require_non_empty(title, "title"))
                .transpose()?,
            description: self.description,
            price: self
                .price
                .map(|price| parse_price(price, "price"))
                .transpose()?,
            category_slug: self
                .category_slug
                .as_deref()
                .map(|slug| parse_slug(slug, "category_slug"))
                .transpose()?,
            image_url: self
                .image_url
                .map(|u| require_well_formed_url(u, "image_url"))
                .transpose()?,
            in_stock: self.in_stock,
        };

        if changes.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(changes)
    }
}

impl ProductChanges {
    /// True when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_slug.is_none()
            && self.image_url.is_none()
            && self.in_stock.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            title: "Sneaker".to_string(),
            description: None,
            price: 49.99,
            category_slug: "shoes".to_string(),
            image_url: None,
            in_stock: None,
        }
    }

    #[test]
    fn test_create_defaults_in_stock() {
        let product = input().validate().unwrap();
        assert_eq!(product.title, "Sneaker");
        assert!(product.in_stock);
        assert_eq!(product.category_slug.as_str(), "shoes");
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let product = ProductInput {
            price: -5.0,
            ..input()
        };
        assert_eq!(
            product.validate(),
            Err(ValidationError::NegativeNumber("price"))
        );
    }

    #[test]
    fn test_create_accepts_zero_price() {
        let product = ProductInput { price: 0.0, ..input() };
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_malformed_image_url() {
        let product = ProductInput {
            image_url: Some("not a url".to_string()),
            ..input()
        };
        assert_eq!(
            product.validate(),
            Err(ValidationError::MalformedUrl("image_url"))
        );
    }

    #[test]
    fn test_create_keeps_image_url_verbatim() {
        let product = ProductInput {
            image_url: Some("https://cdn.example.com/sneaker.png".to_string()),
            ..input()
        };
        assert_eq!(
            product.validate().unwrap().image_url.as_deref(),
            Some("https://cdn.example.com/sneaker.png")
        );
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_eq!(
            ProductUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn test_update_single_field() {
        let changes = ProductUpdate {
            in_stock: Some(false),
            ..ProductUpdate::default()
        }
        .validate()
        .unwrap();

        assert_eq!(changes.in_stock, Some(false));
        assert!(changes.price.is_none());
    }

    #[test]
    fn test_update_rejects_bad_category_slug() {
        let update = ProductUpdate {
            category_slug: Some("NOPE".to_string()),
            ..ProductUpdate::default()
        };
        assert_eq!(
            update.validate(),
            Err(ValidationError::MalformedSlug("category_slug"))
        );
    }
}
