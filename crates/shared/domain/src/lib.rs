//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod pagination;
pub mod password;
pub mod post;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use pagination::PageRequest;
pub use password::Password;
pub use post::{Post, PostInput, PostPage, PostWithCreator};
pub use user::{CreateUser, User};
pub use validation::FieldError;
