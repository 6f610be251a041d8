//! Category repository.

use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use orchard_core::{DocumentId, Slug};

use super::{RepositoryError, is_duplicate_key, parse_object_id};
use crate::models::category::{Category, CategoryChanges, NewCategory};

/// Collection name for categories.
pub(crate) const COLLECTION: &str = "category";

const DUPLICATE_SLUG: &str = "Slug already exists";

// =============================================================================
// Document Row Type
// =============================================================================

/// Stored shape of a category document.
#[derive(Debug, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    is_active: bool,
    created_at: BsonDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<BsonDateTime>,
}

impl TryFrom<CategoryDocument> for Category {
    type Error = RepositoryError;

    fn try_from(doc: CategoryDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or_else(|| {
            RepositoryError::DataCorruption("category document without _id".to_string())
        })?;
        let slug = Slug::parse(&doc.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in store: {e}"))
        })?;

        Ok(Self {
            id: DocumentId::new(id.to_hex()),
            name: doc.name,
            slug,
            description: doc.description,
            is_active: doc.is_active,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.map(BsonDateTime::to_chrono),
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for category documents.
pub struct CategoryRepository {
    collection: Collection<CategoryDocument>,
}

impl CategoryRepository {
    pub(crate) fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// List all categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored document is invalid.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let docs: Vec<CategoryDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(TryInto::try_into).collect()
    }

    /// Look a category up by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Category>, RepositoryError> {
        let doc = self
            .collection
            .find_one(doc! { "slug": slug.as_str() })
            .await?;
        doc.map(TryInto::try_into).transpose()
    }

    /// Insert a new category, stamping its creation time.
    ///
    /// The unique index on `slug` makes the insert itself the uniqueness
    /// check; a duplicate fails with [`RepositoryError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate slug, otherwise
    /// `RepositoryError::Database`.
    pub async fn insert(&self, category: NewCategory) -> Result<Category, RepositoryError> {
        let document = CategoryDocument {
            id: None,
            name: category.name,
            slug: category.slug.into_inner(),
            description: category.description,
            is_active: category.is_active,
            created_at: BsonDateTime::now(),
            updated_at: None,
        };

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_write_error)?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::DataCorruption("store assigned a non-ObjectId id".to_string())
        })?;

        let stored = self
            .collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption("inserted category not found".to_string())
            })?;
        stored.try_into()
    }

    /// Apply a partial update; the store stamps `updated_at` atomically.
    ///
    /// Returns `Ok(None)` when no document matches `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` on a malformed id,
    /// `RepositoryError::Conflict` when a slug change collides, otherwise
    /// `RepositoryError::Database`.
    pub async fn update(
        &self,
        id: &DocumentId,
        changes: &CategoryChanges,
    ) -> Result<Option<Category>, RepositoryError> {
        let object_id = parse_object_id(id)?;
        let update = doc! {
            "$set": set_document(changes),
            "$currentDate": { "updated_at": true },
        };

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, update)
            .await
            .map_err(map_write_error)?;
        if result.matched_count == 0 {
            return Ok(None);
        }

        let stored = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption("updated category not found".to_string())
            })?;
        stored.try_into().map(Some)
    }

    /// Delete a category; reports whether anything was removed.
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
fn set_document(changes: &CategoryChanges) -> Document {
    let mut set = Document::new();
    if let Some(name) = &changes.name {
        set.insert("name", name);
    }
    if let Some(slug) = &changes.slug {
        set.insert("slug", slug.as_str());
    }
    if let Some(description) = &changes.description {
        set.insert("description", description);
    }
    if let Some(is_active) = changes.is_active {
        set.insert("is_active", is_active);
    }
    set
}

fn map_write_error(err: mongodb::error::Error) -> RepositoryError {
    if is_duplicate_key(&err) {
        RepositoryError::Conflict(DUPLICATE_SLUG.to_string())
    } else {
        RepositoryError::Database(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stored_document() -> CategoryDocument {
        CategoryDocument {
            id: Some(ObjectId::new()),
            name: "Shoes".to_string(),
            slug: "shoes".to_string(),
            description: Some("Footwear".to_string()),
            is_active: true,
            created_at: BsonDateTime::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_wire_conversion() {
        let doc = stored_document();
        let hex = doc.id.unwrap().to_hex();

        let category: Category = doc.try_into().unwrap();
        assert_eq!(category.id.as_str(), hex);
        assert_eq!(category.slug.as_str(), "shoes");
    }

    #[test]
    fn test_wire_json_shape() {
        // The response renders the id as a string under `id` and timestamps
        // in ISO-8601; the native `_id` key never leaks.
        let category: Category = stored_document().try_into().unwrap();
        let json = serde_json::to_value(&category).unwrap();

        assert!(json.get("_id").is_none());
        assert!(json["id"].is_string());
        assert!(json["created_at"].as_str().unwrap().contains('T'));
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn test_missing_id_is_corruption() {
        let doc = CategoryDocument {
            id: None,
            ..stored_document()
        };
        assert!(matches!(
            Category::try_from(doc),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_set_document_only_present_fields() {
        let changes = CategoryChanges {
            name: Some("Boots".to_string()),
            is_active: Some(false),
            ..CategoryChanges::default()
        };

        let set = set_document(&changes);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("name").unwrap(), "Boots");
        assert!(!set.get_bool("is_active").unwrap());
        assert!(set.get("slug").is_none());
    }
}
