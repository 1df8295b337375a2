//! GraphQL schema: blog queries and mutations.

mod auth;
mod mutation;
mod query;
mod schema;
mod types;

pub use auth::AuthExt;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use schema::{build_schema, BlogSchema, MAX_QUERY_DEPTH};
pub use types::{AuthDataObject, PostData, PostInputData, PostObject, UserInputData, UserObject};
