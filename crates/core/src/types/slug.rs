//! URL-safe slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-_]`.
    #[error("slug may only contain lowercase letters, digits, '-' and '_' (found {found:?})")]
    InvalidCharacter {
        /// First offending character.
        found: char,
    },
}

/// A URL-safe short string identifying a category.
///
/// Slugs are the public-facing key for categories and the reference key
/// products use instead of the internal document id.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - Only lowercase ASCII letters, digits, `-` and `_`
///
/// ## Examples
///
/// ```
/// use orchard_core::Slug;
///
/// // Valid slugs
/// assert!(Slug::parse("shoes").is_ok());
/// assert!(Slug::parse("winter-2026_sale").is_ok());
///
/// // Invalid slugs
/// assert!(Slug::parse("").is_err());        // empty
/// assert!(Slug::parse("Shoes").is_err());   // uppercase
/// assert!(Slug::parse("a b").is_err());     // whitespace
/// assert!(Slug::parse("café").is_err());    // non-ASCII
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 64 characters
    /// - Contains a character outside `[a-z0-9-_]`
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(found) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter { found });
        }

        Ok(Self(s.to_string()))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
