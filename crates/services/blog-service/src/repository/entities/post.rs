//! Post document stored in the `posts` collection.

use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};

use domain::Post;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Id of the creating user
    pub creator: ObjectId,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Convert stored document to domain entity
impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Post {
            id: doc.id.to_hex(),
            title: doc.title,
            content: doc.content,
            image_url: doc.image_url,
            creator_id: doc.creator.to_hex(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
