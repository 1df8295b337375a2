//! GraphQL endpoint and GraphiQL page.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse},
};

use crate::middleware::AuthContext;
use crate::state::AppState;

/// Execute a GraphQL request with the caller's auth context attached.
pub async fn graphql_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(auth);
    state.schema.execute(request).await.into()
}

/// Interactive GraphiQL explorer.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
