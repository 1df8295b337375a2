//! Blog API Gateway Library
//!
//! HTTP surface of the blog: the GraphQL endpoint, image uploads and static
//! image serving over the services in `blog-service`.

pub mod config;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use blog_service_lib::BlogServices;

use crate::config::GatewayConfig;
use crate::graphql::build_schema;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let services = BlogServices::connect(
        &config.database,
        config.jwt.clone(),
        config.http.image_root.clone(),
    )
    .await?;
    info!("Connected to MongoDB database {}", config.database.name);

    let schema = build_schema(services.auth.clone(), services.posts.clone());
    let state = AppState::new(
        schema,
        services.auth,
        services.images,
        Arc::new(services.database),
        config.http.clone(),
    );

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Gateway listening on {}", addr);
    info!("GraphiQL available at http://{}/graphql", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Ensure database indexes exist, then exit.
pub async fn init_database(config: &GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    blog_service_lib::init_database(&config.database).await?;
    Ok(())
}
