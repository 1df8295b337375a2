//! Authentication helpers for resolvers.

use async_graphql::{Context, Result};

use common::{AppError, GraphQLResultExt};

use crate::middleware::{require_auth, AuthContext};

/// Extension trait to read the caller from the GraphQL context.
pub trait AuthExt {
    /// Id of the authenticated caller, or a 401 error.
    fn user_id(&self) -> Result<&str>;
}

impl<'a> AuthExt for Context<'a> {
    fn user_id(&self) -> Result<&str> {
        match self.data_opt::<AuthContext>() {
            Some(auth) => require_auth(auth).into_graphql(),
            None => Err(AppError::Unauthorized).into_graphql(),
        }
    }
}
