//! Route configuration.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
};

use domain::IMAGE_SUBDIR;

use crate::handlers::{graphiql, graphql_handler, health_routes, upload_image};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let image_dir = state.http.image_root.join(IMAGE_SUBDIR);

    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route(
            "/post-image",
            put(upload_image).layer(DefaultBodyLimit::max(state.http.max_upload_bytes)),
        )
        // Sets the auth context, never rejects
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        // Health check (no auth)
        .nest("/health", health_routes())
        .nest_service("/images", ServeDir::new(image_dir))
        .layer(cors_layer(&state))
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origin = match &state.http.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
