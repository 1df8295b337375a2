//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainResult;
use crate::validation::invalid_input;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Hex encoded document id
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    /// Ids of the posts this user created, oldest first
    pub posts: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User registration data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    /// User email address
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// User display name
    pub name: String,
    /// Plain text password (minimum 5 characters)
    #[validate(length(min = 5, message = "Password is too short"))]
    pub password: String,
}

impl CreateUser {
    const FIELD_ORDER: &'static [&'static str] = &["email", "password"];

    /// Run every field check, reporting all failures at once.
    pub fn validate_input(&self) -> DomainResult<()> {
        self.validate()
            .map_err(|e| invalid_input(&e, Self::FIELD_ORDER))
    }
}
