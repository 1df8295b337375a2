//! Post repository implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection,
};

use super::entities::{parse_id, parse_ids, PostDocument};
use common::AppResult;
use domain::{PageRequest, Post};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
///
/// Ids are hex strings; malformed ids match no document.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Total number of posts
    async fn count(&self) -> AppResult<u64>;

    /// One feed page, newest first
    async fn list(&self, page: PageRequest) -> AppResult<Vec<Post>>;

    /// Find post by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>>;

    /// Find all posts whose ID is in the list, oldest first
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Post>>;

    /// Create a new post
    async fn create(
        &self,
        title: String,
        content: String,
        image_url: String,
        creator_id: &str,
    ) -> AppResult<Post>;

    /// Replace title and content, and the image path when one is given.
    /// Returns `None` if the post no longer exists.
    async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> AppResult<Option<Post>>;

    /// Delete post by ID, returning whether a document was removed
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

/// MongoDB implementation of PostRepository
pub struct PostStore {
    collection: Collection<PostDocument>,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(collection: Collection<PostDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}, None).await?)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<Post>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .skip(page.skip())
            .limit(page.limit())
            .build();

        let docs: Vec<PostDocument> = self
            .collection
            .find(doc! {}, options)
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let result = self.collection.find_one(doc! { "_id": oid }, None).await?;
        Ok(result.map(Post::from))
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Post>> {
        let oids = parse_ids(ids);
        if oids.is_empty() {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder().sort(doc! { "createdAt": 1 }).build();
        let docs: Vec<PostDocument> = self
            .collection
            .find(doc! { "_id": { "$in": oids } }, options)
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(Post::from).collect())
    }

    async fn create(
        &self,
        title: String,
        content: String,
        image_url: String,
        creator_id: &str,
    ) -> AppResult<Post> {
        let creator = parse_id(creator_id).ok_or(common::AppError::InvalidUser)?;
        let now = super::now();
        let document = PostDocument {
            id: ObjectId::new(),
            title,
            content,
            image_url,
            creator,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document, None).await?;
        Ok(Post::from(document))
    }

    async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> AppResult<Option<Post>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut fields = Document::new();
        fields.insert("title", title);
        fields.insert("content", content);
        if let Some(image_url) = image_url {
            fields.insert("imageUrl", image_url);
        }
        fields.insert("updatedAt", mongodb::bson::DateTime::from_chrono(super::now()));

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let result = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": fields }, options)
            .await?;

        Ok(result.map(Post::from))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(doc! { "_id": oid }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
