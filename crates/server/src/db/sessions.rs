//! Admin session repository.
//!
//! Sessions are written once at login and only ever read afterwards.
//! Expired sessions are rejected on lookup by the caller, not purged.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime as BsonDateTime, doc};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::RepositoryError;
use crate::models::session::AdminSession;

/// Collection name for admin sessions.
pub(crate) const COLLECTION: &str = "adminsession";

/// Stored shape of an admin session document.
#[derive(Debug, Serialize, Deserialize)]
struct AdminSessionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    token: String,
    created_at: BsonDateTime,
    expires_at: BsonDateTime,
}

impl From<AdminSessionDocument> for AdminSession {
    fn from(doc: AdminSessionDocument) -> Self {
        Self {
            token: doc.token,
            created_at: doc.created_at.to_chrono(),
            expires_at: doc.expires_at.to_chrono(),
        }
    }
}

/// Repository for admin session documents.
pub struct SessionRepository {
    collection: Collection<AdminSessionDocument>,
}

impl SessionRepository {
    pub(crate) fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Persist a freshly issued session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, session: &AdminSession) -> Result<(), RepositoryError> {
        let document = AdminSessionDocument {
            id: None,
            token: session.token.clone(),
            created_at: BsonDateTime::from_chrono(session.created_at),
            expires_at: BsonDateTime::from_chrono(session.expires_at),
        };
        self.collection.insert_one(&document).await?;
        Ok(())
    }

    /// Look a session up by its bearer token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<AdminSession>, RepositoryError> {
        let doc = self.collection.find_one(doc! { "token": token }).await?;
        Ok(doc.map(Into::into))
    }
}
