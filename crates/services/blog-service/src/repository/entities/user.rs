//! User document stored in the `users` collection.

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};

use domain::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub name: String,
    /// Argon2 hash
    pub password: String,
    #[serde(default)]
    pub posts: Vec<ObjectId>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Convert stored document to domain entity
impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id.to_hex(),
            email: doc.email,
            password_hash: doc.password,
            name: doc.name,
            posts: doc.posts.iter().map(|id| id.to_hex()).collect(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
