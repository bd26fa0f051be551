//! HTTP route handlers for the showroom API.
//!
//! Every endpoint responds with the `{success, data?, error?, message?}`
//! envelope; listings add `{items, total, page, limit, hasNext, hasPrev}`.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Health check
//! GET  /ws                             - WebSocket upgrade
//!
//! # Products
//! GET  /api/products                   - Paginated product listing
//! GET  /api/products/categories        - Distinct categories
//! GET  /api/products/trending          - Trending products
//! GET  /api/products/{id}              - Single product
//! GET  /api/products/{id}/analytics    - Per-product aggregates
//! GET  /api/products/{id}/similar      - Similar products
//!
//! # Orders (mock)
//! POST /api/orders                     - Create order
//! GET  /api/orders/{id}                - Retrieve order
//!
//! # Users
//! GET  /api/users/{id}/recommendations - Personalized recommendations
//! PUT  /api/users/{id}/preferences     - Update preferences
//!
//! # Auth (mock)
//! POST /api/auth/login                 - Login
//! POST /api/auth/register              - Register
//! POST /api/auth/logout                - Logout
//!
//! # Analytics
//! GET  /api/analytics/dashboard        - Last-24h aggregates
//! GET  /api/analytics/users/{id}       - User behavior summary
//!
//! # Store configuration
//! GET  /api/store3d/config             - Showroom configuration
//! PUT  /api/store3d/config             - Update showroom configuration
//! ```

pub mod analytics;
pub mod auth;
pub mod orders;
pub mod products;
pub mod store3d;
pub mod users;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use vitrine_core::ApiResponse;

use crate::middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/trending", get(products::trending))
        .route("/{id}", get(products::show))
        .route("/{id}/analytics", get(products::analytics))
        .route("/{id}/similar", get(products::similar))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/{id}", get(orders::show))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/recommendations", get(users::recommendations))
        .route("/{id}/preferences", put(users::update_preferences))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the analytics routes router.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(analytics::dashboard))
        .route("/users/{id}", get(analytics::user_behavior))
}

/// Create the store configuration routes router.
pub fn store3d_routes() -> Router<AppState> {
    Router::new().route(
        "/config",
        get(store3d::show_config).put(store3d::update_config),
    )
}

/// Create the `/api` router with rate limiting applied.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
        .nest("/auth", auth_routes())
        .nest("/analytics", analytics_routes())
        .nest("/store3d", store3d_routes())
        .layer(middleware::api_rate_limiter())
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: String,
}

/// Liveness health check endpoint.
///
/// The server has no external dependencies, so liveness is the whole story.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        uptime: state.uptime().as_secs_f64(),
        environment: state.config().environment.clone(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse {
            success: false,
            data: None,
            error: None,
            message: Some("Route not found".to_owned()),
        }),
    )
}
