//! GraphQL object and input types.

use std::sync::Arc;

use async_graphql::{Context, InputObject, Object, Result, SimpleObject, ID};
use chrono::{DateTime, SecondsFormat, Utc};

use blog_service_lib::service::{AuthData, PostService};
use common::GraphQLResultExt;
use domain::{CreateUser, PostInput, PostWithCreator, User};

/// ISO-8601 with millisecond precision, e.g. `2024-01-01T10:00:00.000Z`.
fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A registered user. The password hash is never exposed.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Posts created by this user, oldest first.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let service = ctx.data::<Arc<dyn PostService>>()?;
        let posts = service.posts_of(&self.0).await.into_graphql()?;

        Ok(posts
            .into_iter()
            .map(|post| {
                PostObject(PostWithCreator {
                    post,
                    creator: self.0.clone(),
                })
            })
            .collect())
    }
}

/// A blog post with its creator.
pub struct PostObject(pub PostWithCreator);

#[Object(name = "Post")]
impl PostObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.post.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.post.title
    }

    async fn content(&self) -> &str {
        &self.0.post.content
    }

    async fn image_url(&self) -> &str {
        &self.0.post.image_url
    }

    async fn creator(&self) -> UserObject {
        UserObject(self.0.creator.clone())
    }

    async fn created_at(&self) -> String {
        iso_timestamp(&self.0.post.created_at)
    }

    async fn updated_at(&self) -> String {
        iso_timestamp(&self.0.post.updated_at)
    }
}

/// Login result.
#[derive(SimpleObject)]
#[graphql(name = "AuthData")]
pub struct AuthDataObject {
    pub token: String,
    pub user_id: String,
}

impl From<AuthData> for AuthDataObject {
    fn from(data: AuthData) -> Self {
        Self {
            token: data.token,
            user_id: data.user_id,
        }
    }
}

/// One page of the feed.
#[derive(SimpleObject)]
pub struct PostData {
    pub posts: Vec<PostObject>,
    pub total_posts: i32,
}

#[derive(InputObject)]
pub struct UserInputData {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<UserInputData> for CreateUser {
    fn from(input: UserInputData) -> Self {
        Self {
            email: input.email,
            name: input.name,
            password: input.password,
        }
    }
}

#[derive(InputObject)]
pub struct PostInputData {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl From<PostInputData> for PostInput {
    fn from(input: PostInputData) -> Self {
        Self {
            title: input.title,
            content: input.content,
            image_url: input.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_timestamp_uses_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        assert_eq!(iso_timestamp(&at), "2024-03-01T12:30:05.000Z");
    }

    #[test]
    fn test_post_input_conversion_keeps_image_url() {
        let input = PostInput::from(PostInputData {
            title: "Hello".to_string(),
            content: "World".to_string(),
            image_url: "undefined".to_string(),
        });
        assert_eq!(input.image_url, "undefined");
        assert_eq!(input.image_update(), None);
    }
}
