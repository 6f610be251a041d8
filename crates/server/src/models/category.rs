//! Category entity and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orchard_core::{DocumentId, Slug};

use super::{ValidationError, parse_slug, require_non_empty};

/// A catalog category.
///
/// The `slug` is the public-facing key; products reference it instead of
/// the internal id. Timestamps serialize as ISO-8601.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: DocumentId,
    pub name: String,
    pub slug: Slug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create-category payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// A validated category ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub is_active: bool,
}

impl CategoryInput {
    /// Validate the payload into an insertable category.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the offending field.
    pub fn validate(self) -> Result<NewCategory, ValidationError> {
        Ok(NewCategory {
            name: require_non_empty(self.name, "name")?,
            slug: parse_slug(&self.slug, "slug")?,
            description: self.description,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Partial-update payload for a category.
///
/// Absent and `null` fields do not participate in the merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated field-update set for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl CategoryUpdate {
    /// Validate the present fields into a field-update set.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyUpdate` when no recognized field is present,
    /// otherwise the first per-field violation.
    pub fn validate(self) -> Result<CategoryChanges, ValidationError> {
        let changes = CategoryChanges {
            name: self
                .name
                .map(|name| require_non_empty(name, "name"))
                .transpose()?,
            slug: self
                .slug
                .as_deref()
                .map(|slug| parse_slug(slug, "slug"))
                .transpose()?,
            description: self.description,
            is_active: self.is_active,
        };

        if changes.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(changes)
    }
}

impl CategoryChanges {
    /// True when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(name: &str, slug: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            is_active: None,
        }
    }

    #[test]
    fn test_create_defaults_active() {
        let category = input("Shoes", "shoes").validate().unwrap();
        assert_eq!(category.name, "Shoes");
        assert_eq!(category.slug.as_str(), "shoes");
        assert!(category.is_active);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        assert_eq!(
            input("", "shoes").validate(),
            Err(ValidationError::EmptyField("name"))
        );
    }

    #[test]
    fn test_create_rejects_bad_slug() {
        assert_eq!(
            input("Shoes", "Not A Slug").validate(),
            Err(ValidationError::MalformedSlug("slug"))
        );
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_eq!(
            CategoryUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let changes = CategoryUpdate {
            is_active: Some(false),
            ..CategoryUpdate::default()
        }
        .validate()
        .unwrap();

        assert_eq!(changes.is_active, Some(false));
        assert!(changes.name.is_none());
        assert!(changes.slug.is_none());
    }

    #[test]
    fn test_update_rejects_bad_present_field() {
        let update = CategoryUpdate {
            slug: Some("Bad Slug".to_string()),
            ..CategoryUpdate::default()
        };
        assert_eq!(
            update.validate(),
            Err(ValidationError::MalformedSlug("slug"))
        );
    }

    #[test]
    fn test_unknown_fields_do_not_count() {
        // A payload with only unrecognized keys deserializes to the default
        // update and is rejected as empty.
        let update: CategoryUpdate =
            serde_json::from_str(r#"{"colour": "red"}"#).unwrap();
        assert_eq!(update.validate(), Err(ValidationError::EmptyUpdate));
    }
}
