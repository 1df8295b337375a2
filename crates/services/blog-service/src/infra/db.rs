//! Database connection and initialization.

use mongodb::{
    bson::doc,
    options::IndexOptions,
    Client, Collection, Database as MongoDatabase, IndexModel,
};

use common::{AppResult, DatabaseConfig};

use crate::repository::entities::{PostDocument, UserDocument};

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Collection holding post documents
pub const POSTS_COLLECTION: &str = "posts";

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    db: MongoDatabase,
}

impl Database {
    /// Connect and make sure the required indexes exist.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let database = Self::connect_without_indexes(config).await?;
        database.ensure_indexes().await?;
        tracing::info!("Database connected and indexes ensured");

        Ok(database)
    }

    /// Connect without touching indexes.
    pub async fn connect_without_indexes(config: &DatabaseConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.name);
        tracing::debug!("Using database {}", config.name);
        Ok(Self { db })
    }

    /// Typed user collection.
    pub fn users(&self) -> Collection<UserDocument> {
        self.db.collection(USERS_COLLECTION)
    }

    /// Typed post collection.
    pub fn posts(&self) -> Collection<PostDocument> {
        self.db.collection(POSTS_COLLECTION)
    }

    /// Create the unique email index and the feed ordering index.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users().create_index(unique_email, None).await?;

        let newest_first = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .build();
        self.posts().create_index(newest_first, None).await?;

        Ok(())
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
