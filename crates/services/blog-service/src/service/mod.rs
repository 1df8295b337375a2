//! Business logic for accounts and posts.

mod auth_service;
mod post_service;

pub use auth_service::{AuthData, AuthService, Authenticator, Claims};
pub use post_service::{PostManager, PostService};
