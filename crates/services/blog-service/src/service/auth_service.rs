//! Authentication service - registration, login and token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use common::{AppError, AppResult, JwtConfig};
use domain::{CreateUser, Password, User};

use crate::repository::UserRepository;

/// JWT claims payload: `{userId, email, exp, iat}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Returned after a successful login
#[derive(Debug, Clone, Serialize)]
pub struct AuthData {
    /// Signed JWT
    pub token: String,
    pub user_id: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Check credentials and issue a token
    async fn login(&self, email: &str, password: &str) -> AppResult<AuthData>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Generate JWT token for a user
    fn generate_token(&self, user: &User) -> AppResult<AuthData> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            user_id: user.id.clone(),
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )?;

        Ok(AuthData {
            token,
            user_id: user.id.clone(),
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        input.validate_input()?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("User exists already"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .users
            .create(input.email, password_hash, input.name)
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<AuthData> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::invalid_credentials("User not found"))?;

        if !Password::from_hash(user.password_hash.as_str()).verify(password) {
            return Err(AppError::invalid_credentials("Password is incorrect"));
        }

        self.generate_token(&user)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
