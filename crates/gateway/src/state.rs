//! Application state for dependency injection.

use std::sync::Arc;

use blog_service_lib::service::AuthService;
use blog_service_lib::storage::ImageStore;

use crate::config::HttpConfig;
use crate::graphql::BlogSchema;
use crate::handlers::HealthProbe;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub schema: BlogSchema,
    pub auth: Arc<dyn AuthService>,
    pub images: Arc<dyn ImageStore>,
    pub health: Arc<dyn HealthProbe>,
    pub http: HttpConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        schema: BlogSchema,
        auth: Arc<dyn AuthService>,
        images: Arc<dyn ImageStore>,
        health: Arc<dyn HealthProbe>,
        http: HttpConfig,
    ) -> Self {
        Self {
            schema,
            auth,
            images,
            health,
            http,
        }
    }
}
