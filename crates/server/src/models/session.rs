//! Admin session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted admin session.
///
/// Issued on successful login, checked on every admin-gated request. A
/// session is `Active` from creation until `expires_at` and `Expired`
/// afterwards; expiry is terminal and sessions are never renewed or purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Opaque bearer token.
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Whether the session has passed its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
