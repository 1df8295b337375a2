//! Infrastructure layer - database connection and collections.

mod db;

pub use db::{Database, POSTS_COLLECTION, USERS_COLLECTION};
