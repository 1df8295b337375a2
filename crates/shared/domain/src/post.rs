//! Post domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::UNSET_IMAGE_URL;
use crate::error::DomainResult;
use crate::user::User;
use crate::validation::invalid_input;

/// Post domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Hex encoded document id
    pub id: String,
    pub title: String,
    pub content: String,
    /// Stored image path, relative to the image root
    pub image_url: String,
    /// Id of the user who created the post
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check if the given user created this post
    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }
}

/// A post together with its creator document.
#[derive(Debug, Clone)]
pub struct PostWithCreator {
    pub post: Post,
    pub creator: User,
}

/// One page of the post feed.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostWithCreator>,
    pub total_posts: u64,
}

/// Post create/update data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(min = 5, message = "Title is invalid"))]
    pub title: String,
    #[validate(length(min = 5, message = "Content is invalid"))]
    pub content: String,
    pub image_url: String,
}

impl PostInput {
    const FIELD_ORDER: &'static [&'static str] = &["title", "content"];

    /// Run every field check, reporting all failures at once.
    pub fn validate_input(&self) -> DomainResult<()> {
        self.validate()
            .map_err(|e| invalid_input(&e, Self::FIELD_ORDER))
    }

    /// New image path for an update, if the client picked one.
    pub fn image_update(&self) -> Option<&str> {
        let url = self.image_url.as_str();
        if url.is_empty() || url == UNSET_IMAGE_URL {
            None
        } else {
            Some(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MIN_POST_CONTENT_LENGTH, MIN_POST_TITLE_LENGTH};
    use crate::DomainError;

    fn input(title: &str, content: &str, image_url: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: content.to_string(),
            image_url: image_url.to_string(),
        }
    }

    fn messages(result: DomainResult<()>) -> Vec<String> {
        match result {
            Err(DomainError::InvalidInput(errors)) => {
                errors.into_iter().map(|e| e.message).collect()
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_title_boundary() {
        let short = "t".repeat(MIN_POST_TITLE_LENGTH - 1);
        let exact = "t".repeat(MIN_POST_TITLE_LENGTH);

        assert_eq!(
            messages(input(&short, "some content", "images/a.png").validate_input()),
            vec!["Title is invalid"]
        );
        assert!(input(&exact, "some content", "images/a.png")
            .validate_input()
            .is_ok());
    }

    #[test]
    fn test_content_boundary() {
        let short = "c".repeat(MIN_POST_CONTENT_LENGTH - 1);
        let exact = "c".repeat(MIN_POST_CONTENT_LENGTH);

        assert_eq!(
            messages(input("A title", &short, "images/a.png").validate_input()),
            vec!["Content is invalid"]
        );
        assert!(input("A title", &exact, "images/a.png")
            .validate_input()
            .is_ok());
    }

    #[test]
    fn test_empty_fields_reported_in_order() {
        assert_eq!(
            messages(input("", "", "").validate_input()),
            vec!["Title is invalid", "Content is invalid"]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // five multi-byte characters
        assert!(input("ééééé", "ééééé", "").validate_input().is_ok());
    }

    #[test]
    fn test_image_update() {
        assert_eq!(
            input("title", "content", "images/new.png").image_update(),
            Some("images/new.png")
        );
        assert_eq!(input("title", "content", "undefined").image_update(), None);
        assert_eq!(input("title", "content", "").image_update(), None);
    }

    #[test]
    fn test_is_created_by() {
        let now = Utc::now();
        let post = Post {
            id: "p1".to_string(),
            title: "A title".to_string(),
            content: "Some content".to_string(),
            image_url: "images/a.png".to_string(),
            creator_id: "u1".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert!(post.is_created_by("u1"));
        assert!(!post.is_created_by("u2"));
    }
}
