//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Root of the planet collection.
pub const PLANETS_PATH: &str = "/api/v1/planets";

/// Request bodies larger than this are refused unless configured otherwise.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// `Location` of a planet: the by-name lookup for `name`.
pub fn planet_location(name: &str) -> String {
    format!("{}/{}", PLANETS_PATH, urlencoding::encode(name))
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    create_router_with_body_limit(state, DEFAULT_BODY_LIMIT)
}

/// Same as [`create_router`] with an explicit request body limit.
pub fn create_router_with_body_limit(state: AppState, body_limit: usize) -> Router {
    // CORS configuration - permissive, the API carries no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let collection = || get(handlers::list_planets).post(handlers::create_planet);

    // Name-keyed reads/deletes and id-keyed writes share one path segment.
    let planets = Router::new()
        .route(PLANETS_PATH, collection())
        .route(&format!("{}/", PLANETS_PATH), collection())
        .route(
            &format!("{}/page,size", PLANETS_PATH),
            get(handlers::list_planets_paged),
        )
        .route(
            &format!("{}/{{planet}}", PLANETS_PATH),
            get(handlers::get_planet)
                .put(handlers::update_planet)
                .delete(handlers::delete_planet)
                .patch(handlers::patch_planet),
        )
        .route(
            &format!("{}/{{planet}}/{{moon}}", PLANETS_PATH),
            get(handlers::get_moon),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(planets)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
