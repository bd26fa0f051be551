//! Integration tests for Vitrine.
//!
//! # Test Categories
//!
//! - `http_api` - Envelope, pagination, and error taxonomy over the router
//! - `realtime` - Client socket channel against a live server
//! - `cart_properties` - Cart/session invariants across crates
//!
//! The helpers here spin up the real router - either in-process for
//! `oneshot` requests or bound to a loopback listener for socket tests.
//! Nothing external is required.

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::http::Request;

use vitrine_server::config::ServerConfig;
use vitrine_server::state::AppState;

/// Build an app router plus its state for in-process requests.
#[must_use]
pub fn test_app() -> (Router, AppState) {
    let state = AppState::new(ServerConfig::default());
    let app = vitrine_server::router(state.clone());
    (app, state)
}

/// Bind the app to an ephemeral loopback port and serve it in the
/// background. Returns the bound address and the shared state.
///
/// # Panics
///
/// Panics when the listener cannot be bound.
pub async fn spawn_server() -> (SocketAddr, AppState) {
    let (app, state) = test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("test server error");
    });

    (addr, state)
}

/// Build a GET request with the forwarded-for header the rate limiter keys
/// on.
///
/// # Panics
///
/// Panics on an invalid URI.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::empty())
        .expect("request")
}

/// Build a JSON request with the given method and body.
///
/// # Panics
///
/// Panics on an invalid URI.
#[must_use]
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "127.0.0.1")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics when the body is not valid JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
