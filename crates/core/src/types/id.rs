//! Opaque document identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned document identifier.
///
/// Rendered on the wire as a plain string under the `id` key. The inner
/// representation is whatever the document store hands back (a 24-character
/// hex string for `MongoDB` object ids); nothing outside the store adapter
/// may parse or construct one by hand. The only supported operations are
/// equality and string conversion.
///
/// ## Examples
///
/// ```
/// use orchard_core::DocumentId;
///
/// let id = DocumentId::new("64b8f0a2c3d4e5f601234567".to_string());
/// assert_eq!(id.as_str(), "64b8f0a2c3d4e5f601234567");
/// assert_eq!(id.to_string(), "64b8f0a2c3d4e5f601234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from its string form.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the id as a string slice.
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

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
