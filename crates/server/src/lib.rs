//! Vitrine Server library.
//!
//! This crate provides the showroom backend as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires it to a listener.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API under `/api`
//! - WebSocket channel at `/ws` relaying interaction events
//! - In-memory everything: mock catalog, capped analytics log, session
//!   registry - the server runs with no external dependencies at all

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod routes;
pub mod services;
pub mod socket;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use state::AppState;

/// Build the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route("/health", get(routes::health))
        .route("/ws", get(socket::ws_handler))
        .nest("/api", routes::api_routes())
        .fallback(routes::not_found)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured client origin, with credentials.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match config.client_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(client_url = %config.client_url, error = %e, "invalid CLIENT_URL, CORS origin not set");
            cors
        }
    }
}
