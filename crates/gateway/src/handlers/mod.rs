//! HTTP handlers.

mod graphql_handler;
mod health_handler;
mod image_handler;

pub use graphql_handler::{graphiql, graphql_handler};
pub use health_handler::{health_check, health_routes, HealthProbe, HealthResponse};
pub use image_handler::{upload_image, ImageUploadResponse};
