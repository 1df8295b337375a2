//! Schema construction.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use blog_service_lib::service::{AuthService, PostService};

use super::{MutationRoot, QueryRoot};

/// Deepest selection accepted; `User.posts` and `Post.creator` nest freely.
pub const MAX_QUERY_DEPTH: usize = 8;

pub type BlogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the services resolvers read from the context.
pub fn build_schema(auth: Arc<dyn AuthService>, posts: Arc<dyn PostService>) -> BlogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth)
        .data(posts)
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}
