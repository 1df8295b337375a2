//! Mutation root.

use std::sync::Arc;

use async_graphql::{Context, Object, Result, ID};

use blog_service_lib::service::{AuthService, PostService};
use common::GraphQLResultExt;

use super::auth::AuthExt;
use super::types::{PostInputData, PostObject, UserInputData, UserObject};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new account.
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserInputData) -> Result<UserObject> {
        let auth = ctx.data::<Arc<dyn AuthService>>()?;
        let user = auth.create_user(user_input.into()).await.into_graphql()?;
        Ok(UserObject(user))
    }

    async fn create_post(&self, ctx: &Context<'_>, post_input: PostInputData) -> Result<PostObject> {
        let user_id = ctx.user_id()?;
        let service = ctx.data::<Arc<dyn PostService>>()?;
        let post = service
            .create_post(user_id, post_input.into())
            .await
            .into_graphql()?;
        Ok(PostObject(post))
    }

    /// Replace a post's fields. Only the creator may do this.
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInputData,
    ) -> Result<PostObject> {
        let user_id = ctx.user_id()?;
        let service = ctx.data::<Arc<dyn PostService>>()?;
        let post = service
            .update_post(user_id, &id, post_input.into())
            .await
            .into_graphql()?;
        Ok(PostObject(post))
    }

    /// Delete a post and its image. Only the creator may do this.
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let user_id = ctx.user_id()?;
        let service = ctx.data::<Arc<dyn PostService>>()?;
        service.delete_post(user_id, &id).await.into_graphql()?;
        Ok(true)
    }
}
