//! Post service - feed, post CRUD and ownership rules.
//!
//! Creating and deleting a post touches two collections (the post itself and
//! the creator's post list) without a transaction; a failure between the two
//! writes is logged and surfaced, not compensated.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{PageRequest, Post, PostInput, PostPage, PostWithCreator, User};

use crate::repository::{PostRepository, UserRepository};
use crate::storage::ImageStore;

const POST_NOT_FOUND: &str = "No post found!";

/// Post service trait for dependency injection.
///
/// `user_id` is the authenticated caller; authentication itself is checked
/// by the API layer.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a post owned by the caller
    async fn create_post(&self, user_id: &str, input: PostInput) -> AppResult<PostWithCreator>;

    /// One page of the feed, newest first, plus the total post count
    async fn list_posts(&self, page: PageRequest) -> AppResult<PostPage>;

    /// Single post with its creator
    async fn get_post(&self, id: &str) -> AppResult<PostWithCreator>;

    /// Replace a post's fields (creator only)
    async fn update_post(
        &self,
        user_id: &str,
        id: &str,
        input: PostInput,
    ) -> AppResult<PostWithCreator>;

    /// Delete a post and its image (creator only)
    async fn delete_post(&self, user_id: &str, id: &str) -> AppResult<()>;

    /// Posts on a user's post list
    async fn posts_of(&self, user: &User) -> AppResult<Vec<Post>>;
}

/// Concrete implementation of PostService using repositories.
pub struct PostManager {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    images: Arc<dyn ImageStore>,
}

impl PostManager {
    /// Create new post service instance
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            posts,
            users,
            images,
        }
    }

    /// Load a post that the caller is allowed to modify.
    async fn find_owned(&self, user_id: &str, id: &str) -> AppResult<Post> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_not_found(POST_NOT_FOUND)?;

        if !post.is_created_by(user_id) {
            tracing::debug!(post_id = %id, user_id = %user_id, "Rejected change by non-creator");
            return Err(AppError::Forbidden);
        }

        Ok(post)
    }

    async fn with_creator(&self, post: Post) -> AppResult<PostWithCreator> {
        let creator = self
            .users
            .find_by_id(&post.creator_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Creator {} of post {} is missing", post.creator_id, post.id))
            })?;

        Ok(PostWithCreator { post, creator })
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn create_post(&self, user_id: &str, input: PostInput) -> AppResult<PostWithCreator> {
        input.validate_input()?;

        let mut creator = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidUser)?;

        let post = self
            .posts
            .create(input.title, input.content, input.image_url, &creator.id)
            .await?;

        if let Err(e) = self.users.add_post(&creator.id, &post.id).await {
            tracing::error!(post_id = %post.id, user_id = %creator.id, "Post stored but not linked to its creator");
            return Err(e);
        }
        creator.posts.push(post.id.clone());

        tracing::info!(post_id = %post.id, user_id = %creator.id, "Post created");
        Ok(PostWithCreator { post, creator })
    }

    async fn list_posts(&self, page: PageRequest) -> AppResult<PostPage> {
        let total_posts = self.posts.count().await?;
        let posts = self.posts.list(page).await?;

        let mut creator_ids: Vec<String> = posts.iter().map(|p| p.creator_id.clone()).collect();
        creator_ids.sort();
        creator_ids.dedup();

        let creators: HashMap<String, User> = self
            .users
            .find_by_ids(&creator_ids)
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();

        let posts = posts
            .into_iter()
            .filter_map(|post| match creators.get(&post.creator_id) {
                Some(creator) => Some(PostWithCreator {
                    creator: creator.clone(),
                    post,
                }),
                None => {
                    tracing::warn!(post_id = %post.id, "Skipping post whose creator is missing");
                    None
                }
            })
            .collect();

        Ok(PostPage { posts, total_posts })
    }

    async fn get_post(&self, id: &str) -> AppResult<PostWithCreator> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_not_found(POST_NOT_FOUND)?;

        self.with_creator(post).await
    }

    async fn update_post(
        &self,
        user_id: &str,
        id: &str,
        input: PostInput,
    ) -> AppResult<PostWithCreator> {
        let existing = self.find_owned(user_id, id).await?;
        input.validate_input()?;

        let new_image = input.image_update().map(str::to_string);
        let updated = self
            .posts
            .update(id, input.title, input.content, new_image.clone())
            .await?
            .ok_or_not_found(POST_NOT_FOUND)?;

        if let Some(new_image) = new_image {
            if new_image != existing.image_url {
                self.images.clear_image(&existing.image_url).await;
            }
        }

        self.with_creator(updated).await
    }

    async fn delete_post(&self, user_id: &str, id: &str) -> AppResult<()> {
        let post = self.find_owned(user_id, id).await?;

        if !self.posts.delete(&post.id).await? {
            return Err(AppError::not_found(POST_NOT_FOUND));
        }

        // The post is gone at this point; a stale link on the creator is
        // skipped when listing, so the delete still succeeds.
        if let Err(e) = self.users.remove_post(user_id, &post.id).await {
            tracing::error!(
                post_id = %post.id,
                user_id = %user_id,
                error = %e,
                "Post deleted but still linked to its creator"
            );
        }

        self.images.clear_image(&post.image_url).await;

        tracing::info!(post_id = %post.id, user_id = %user_id, "Post deleted");
        Ok(())
    }

    async fn posts_of(&self, user: &User) -> AppResult<Vec<Post>> {
        self.posts.find_by_ids(&user.posts).await
    }
}
