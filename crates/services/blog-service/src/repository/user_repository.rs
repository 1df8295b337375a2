//! User repository implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    Collection,
};

use super::entities::{parse_id, parse_ids, UserDocument};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// A concurrent signup can slip past the email lookup; the unique index
/// on `email` still rejects it with this error.
fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// User repository trait for dependency injection.
///
/// Ids are hex strings; malformed ids match no document.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find all users whose ID is in the list
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user with an empty post list
    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User>;

    /// Append a post id to the user's post list
    async fn add_post(&self, user_id: &str, post_id: &str) -> AppResult<()>;

    /// Remove a post id from the user's post list
    async fn remove_post(&self, user_id: &str, post_id: &str) -> AppResult<()>;
}

/// MongoDB implementation of UserRepository
pub struct UserStore {
    collection: Collection<UserDocument>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let result = self.collection.find_one(doc! { "_id": oid }, None).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        let oids = parse_ids(ids);
        if oids.is_empty() {
            return Ok(Vec::new());
        }

        let docs: Vec<UserDocument> = self
            .collection
            .find(doc! { "_id": { "$in": oids } }, None)
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = self.collection.find_one(doc! { "email": email }, None).await?;
        Ok(result.map(User::from))
    }

    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User> {
        let now = super::now();
        let document = UserDocument {
            id: mongodb::bson::oid::ObjectId::new(),
            email,
            name,
            password: password_hash,
            posts: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.collection.insert_one(&document, None).await {
            if is_duplicate_key(&e) {
                return Err(AppError::conflict("User exists already"));
            }
            return Err(e.into());
        }
        Ok(User::from(document))
    }

    async fn add_post(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let (user_oid, post_oid) = parse_id(user_id)
            .zip(parse_id(post_id))
            .ok_or(AppError::InvalidUser)?;

        let result = self
            .collection
            .update_one(
                doc! { "_id": user_oid },
                doc! {
                    "$push": { "posts": post_oid },
                    "$set": { "updatedAt": mongodb::bson::DateTime::from_chrono(super::now()) },
                },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::InvalidUser);
        }

        Ok(())
    }

    async fn remove_post(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let (user_oid, post_oid) = parse_id(user_id)
            .zip(parse_id(post_id))
            .ok_or(AppError::InvalidUser)?;

        let result = self
            .collection
            .update_one(
                doc! { "_id": user_oid },
                doc! {
                    "$pull": { "posts": post_oid },
                    "$set": { "updatedAt": mongodb::bson::DateTime::from_chrono(super::now()) },
                },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::InvalidUser);
        }

        Ok(())
    }
}
