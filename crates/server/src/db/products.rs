//! Product repository.

use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use orchard_core::{DocumentId, Price, Slug};

use super::{RepositoryError, parse_object_id};
use crate::models::product::{NewProduct, Product, ProductChanges};

/// Collection name for products.
pub(crate) const COLLECTION: &str = "product";

// =============================================================================
// Document Row Type
// =============================================================================

/// Stored shape of a product document.
#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price: f64,
    category_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    in_stock: bool,
    created_at: BsonDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<BsonDateTime>,
}

impl TryFrom<ProductDocument> for Product {
    type Error = RepositoryError;

    fn try_from(doc: ProductDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or_else(|| {
            RepositoryError::DataCorruption("product document without _id".to_string())
        })?;
        let price = Price::parse(doc.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in store: {e}"))
        })?;
        let category_slug = Slug::parse(&doc.category_slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category slug in store: {e}"))
        })?;

        Ok(Self {
            id: DocumentId::new(id.to_hex()),
            title: doc.title,
            description: doc.description,
            price,
            category_slug,
            image_url: doc.image_url,
            in_stock: doc.in_stock,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.map(BsonDateTime::to_chrono),
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product documents.
pub struct ProductRepository {
    collection: Collection<ProductDocument>,
}

impl ProductRepository {
    pub(crate) fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// List products visible to the public, newest first.
    ///
    /// Excludes products whose `in_stock` is explicitly false; optionally
    /// filters by category slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored document is invalid.
    pub async fn list_in_stock(
        &self,
        category_slug: Option<&Slug>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut filter = doc! { "in_stock": { "$ne": false } };
        if let Some(slug) = category_slug {
            filter.insert("category_slug", slug.as_str());
        }

        let docs: Vec<ProductDocument> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(TryInto::try_into).collect()
    }

    /// Look a product up by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` on a malformed id, otherwise
    /// `RepositoryError::Database`.
    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Product>, RepositoryError> {
        let object_id = parse_object_id(id)?;
        let doc = self.collection.find_one(doc! { "_id": object_id }).await?;
        doc.map(TryInto::try_into).transpose()
    }

    /// Insert a new product, stamping its creation time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let document = ProductDocument {
            id: None,
            title: product.title,
            description: product.description,
            price: product.price.get(),
            category_slug: product.category_slug.into_inner(),
            image_url: product.image_url,
            in_stock: product.in_stock,
            created_at: BsonDateTime::now(),
            updated_at: None,
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
                RepositoryError::DataCorruption("inserted product not found".to_string())
            })?;
        stored.try_into()
    }

    /// Apply a partial update; the store stamps `updated_at` atomically.
    ///
    /// Returns `Ok(None)` when no document matches `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` on a malformed id, otherwise
    /// `RepositoryError::Database`.
    pub async fn update(
        &self,
        id: &DocumentId,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, RepositoryError> {
        let object_id = parse_object_id(id)?;
        let update = doc! {
            "$set": set_document(changes),
            "$currentDate": { "updated_at": true },
        };

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, update)
            .await?;
        if result.matched_count == 0 {
            return Ok(None);
        }

        let stored = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption("updated product not found".to_string())
            })?;
        stored.try_into().map(Some)
    }

    /// Delete a product; reports whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` on a malformed id, otherwise
    /// `RepositoryError::Database`.
    pub async fn delete(&self, id: &DocumentId) -> Result<bool, RepositoryError> {
        let object_id = parse_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// `$set` document with only the present fields.
fn set_document(changes: &ProductChanges) -> Document {
    let mut set = Document::new();
    if let Some(title) = &changes.title {
        set.insert("title", title);
    }
    if let Some(description) = &changes.description {
        set.insert("description", description);
    }
    if let Some(price) = changes.price {
        set.insert("price", price.get());
    }
    if let Some(slug) = &changes.category_slug {
        set.insert("category_slug", slug.as_str());
    }
    if let Some(image_url) = &changes.image_url {
        set.insert("image_url", image_url);
    }
    if let Some(in_stock) = changes.in_stock {
        set.insert("in_stock", in_stock);
    }
    set
}
