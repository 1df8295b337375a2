//! Shared fixtures for gateway integration tests.
//!
//! The real `Authenticator` and `PostManager` run on top of in-memory
//! repositories, so requests exercise the full resolver and service path
//! without a MongoDB server.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_graphql::Request;
use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};

use blog_service_lib::repository::{PostRepository, UserRepository};
use blog_service_lib::service::{AuthService, Authenticator, PostManager, PostService};
use blog_service_lib::storage::{ImageStore, LocalImageStore};
use common::{AppError, AppResult, JwtConfig};
use domain::{CreateUser, PageRequest, Post, User};
use gateway_lib::config::HttpConfig;
use gateway_lib::graphql::{build_schema, BlogSchema};
use gateway_lib::handlers::HealthProbe;
use gateway_lib::middleware::AuthContext;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

pub const SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const PASSWORD: &str = "secret";

// =============================================================================
// In-memory repositories
// =============================================================================

/// Hands out increasing ids and timestamps one millisecond apart.
#[derive(Default)]
struct Sequence(AtomicI64);

impl Sequence {
    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn timestamp(seq: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(seq)
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    seq: Sequence,
}

impl InMemoryUsers {
    pub fn get(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User> {
        let seq = self.seq.next();
        let user = User {
            id: format!("{:024x}", seq),
            email,
            password_hash,
            name,
            posts: Vec::new(),
            created_at: timestamp(seq),
            updated_at: timestamp(seq),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn add_post(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::InvalidUser)?;
        user.posts.push(post_id.to_string());
        Ok(())
    }

    async fn remove_post(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::InvalidUser)?;
        user.posts.retain(|id| id != post_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    posts: Mutex<Vec<Post>>,
    seq: Sequence,
}

impl InMemoryPosts {
    pub fn get(&self, id: &str) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn count(&self) -> AppResult<u64> {
        Ok(self.posts.lock().unwrap().len() as u64)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Vec<Post>> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        Ok(self.get(id))
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(posts)
    }

    async fn create(
        &self,
        title: String,
        content: String,
        image_url: String,
        creator_id: &str,
    ) -> AppResult<Post> {
        let seq = self.seq.next();
        let post = Post {
            id: format!("ff{:022x}", seq),
            title,
            content,
            image_url,
            creator_id: creator_id.to_string(),
            created_at: timestamp(seq),
            updated_at: timestamp(seq),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> AppResult<Option<Post>> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.title = title;
        post.content = content;
        if let Some(image_url) = image_url {
            post.image_url = image_url;
        }
        post.updated_at = post.updated_at + Duration::seconds(1);
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

/// Records image operations instead of touching the filesystem.
#[derive(Default)]
pub struct RecordingImages {
    cleared: Mutex<Vec<String>>,
}

impl RecordingImages {
    pub fn cleared(&self) -> Vec<String> {
        self.cleared.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for RecordingImages {
    async fn save_image(&self, file_name: &str, _bytes: Vec<u8>) -> AppResult<String> {
        Ok(format!("images/{}", file_name))
    }

    async fn clear_image(&self, image_url: &str) {
        self.cleared.lock().unwrap().push(image_url.to_string());
    }
}

/// Health probe with a fixed outcome.
pub struct StaticProbe(pub bool);

#[async_trait]
impl HealthProbe for StaticProbe {
    async fn check(&self) -> AppResult<()> {
        if self.0 {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }
}

// =============================================================================
// Test Harness
// =============================================================================

pub struct TestApp {
    pub schema: BlogSchema,
    pub auth: Arc<dyn AuthService>,
    pub posts_service: Arc<dyn PostService>,
    pub users: Arc<InMemoryUsers>,
    pub posts: Arc<InMemoryPosts>,
    pub images: Arc<RecordingImages>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let posts = Arc::new(InMemoryPosts::default());
        let images = Arc::new(RecordingImages::default());

        let auth: Arc<dyn AuthService> = Arc::new(Authenticator::new(
            users.clone(),
            JwtConfig::new(SECRET, 1).unwrap(),
        ));
        let posts_service: Arc<dyn PostService> =
            Arc::new(PostManager::new(posts.clone(), users.clone(), images.clone()));

        Self {
            schema: build_schema(auth.clone(), posts_service.clone()),
            auth,
            posts_service,
            users,
            posts,
            images,
        }
    }

    /// Execute a GraphQL document and return the serialized response.
    pub async fn execute(&self, query: &str, auth: AuthContext) -> serde_json::Value {
        let response = self.schema.execute(Request::new(query).data(auth)).await;
        serde_json::to_value(&response).unwrap()
    }

    /// Register a user directly through the auth service, returning its id.
    pub async fn signup(&self, email: &str) -> String {
        let user = self
            .auth
            .create_user(CreateUser {
                email: email.to_string(),
                name: "Max".to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();
        user.id
    }

    /// Log in and return a bearer token.
    pub async fn token(&self, email: &str) -> String {
        self.auth.login(email, PASSWORD).await.unwrap().token
    }

    /// Full HTTP router over this app's services.
    pub fn router(&self, probe: StaticProbe, image_root: &Path) -> Router {
        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(image_root));
        let http = HttpConfig {
            image_root: image_root.to_path_buf(),
            ..HttpConfig::default()
        };
        let state = AppState::new(
            self.schema.clone(),
            self.auth.clone(),
            images,
            Arc::new(probe),
            http,
        );
        create_router(state)
    }
}

/// Status code carried in the first GraphQL error.
pub fn error_status(response: &serde_json::Value) -> Option<u64> {
    response["errors"][0]["extensions"]["status"].as_u64()
}

pub fn error_message(response: &serde_json::Value) -> Option<&str> {
    response["errors"][0]["message"].as_str()
}
