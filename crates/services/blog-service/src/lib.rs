//! Blog Service Library
//!
//! Accounts, posts and post images over MongoDB. The gateway crate embeds
//! this library and exposes it through GraphQL.

pub mod infra;
pub mod repository;
pub mod service;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use common::{AppResult, DatabaseConfig, JwtConfig};

use crate::infra::Database;
use crate::repository::{PostStore, UserStore};
use crate::service::{AuthService, Authenticator, PostManager, PostService};
use crate::storage::{ImageStore, LocalImageStore};

/// Wired services shared by every request.
#[derive(Clone)]
pub struct BlogServices {
    pub auth: Arc<dyn AuthService>,
    pub posts: Arc<dyn PostService>,
    pub images: Arc<dyn ImageStore>,
    pub database: Database,
}

impl BlogServices {
    /// Connect to the database and build all services.
    pub async fn connect(
        database: &DatabaseConfig,
        jwt: JwtConfig,
        image_root: impl Into<PathBuf>,
    ) -> AppResult<Self> {
        let db = Database::connect(database).await?;

        let users = Arc::new(UserStore::new(db.users()));
        let posts = Arc::new(PostStore::new(db.posts()));
        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(image_root));

        let auth = Arc::new(Authenticator::new(users.clone(), jwt));
        let post_service = Arc::new(PostManager::new(posts, users, images.clone()));

        Ok(Self {
            auth,
            posts: post_service,
            images,
            database: db,
        })
    }
}

/// Create collections' indexes (for CLI commands).
pub async fn init_database(config: &DatabaseConfig) -> AppResult<()> {
    let db = Database::connect_without_indexes(config).await?;
    db.ping().await?;
    db.ensure_indexes().await?;
    info!("Indexes ensured on database {}", config.name);
    Ok(())
}
