//! Query root.

use std::sync::Arc;

use async_graphql::{Context, Object, Result, ID};

use blog_service_lib::service::{AuthService, PostService};
use common::{AppError, GraphQLResultExt};
use domain::PageRequest;

use super::auth::AuthExt;
use super::types::{AuthDataObject, PostData, PostObject};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Exchange credentials for a token.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthDataObject> {
        let auth = ctx.data::<Arc<dyn AuthService>>()?;
        let data = auth.login(&email, &password).await.into_graphql()?;
        Ok(data.into())
    }

    /// Newest posts first, two per page.
    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<PostData> {
        ctx.user_id()?;
        let page = PageRequest::from_page(page)
            .map_err(AppError::from)
            .into_graphql()?;

        let service = ctx.data::<Arc<dyn PostService>>()?;
        let page = service.list_posts(page).await.into_graphql()?;

        Ok(PostData {
            total_posts: i32::try_from(page.total_posts).unwrap_or(i32::MAX),
            posts: page.posts.into_iter().map(PostObject).collect(),
        })
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<PostObject> {
        ctx.user_id()?;
        let service = ctx.data::<Arc<dyn PostService>>()?;
        let post = service.get_post(&id).await.into_graphql()?;
        Ok(PostObject(post))
    }
}
