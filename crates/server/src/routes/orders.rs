//! Order route handlers.
//!
//! Orders are mock-only: creation echoes the submitted payload with generated
//! bookkeeping fields, retrieval returns a canned record. Nothing persists.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use vitrine_core::ApiResponse;

use crate::state::AppState;

/// `POST /api/orders` - create a mock order.
#[instrument(skip(_state, order_data))]
pub async fn create(
    State(_state): State<AppState>,
    Json(order_data): Json<Value>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let now = Utc::now();
    let mut order = match order_data {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("payload".to_owned(), other);
            map
        }
    };
    order.insert("id".to_owned(), json!(Uuid::new_v4().to_string()));
    order.insert("status".to_owned(), json!("pending"));
    order.insert("createdAt".to_owned(), json!(now));
    order.insert("updatedAt".to_owned(), json!(now));

    (
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            Value::Object(order),
            "Order created successfully",
        )),
    )
}

/// `GET /api/orders/{id}` - retrieve a mock order.
#[instrument(skip(_state))]
pub async fn show(
    State(_state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<Value>> {
    let now = Utc::now();
    Json(ApiResponse::ok(json!({
        "id": id,
        "status": "completed",
        "total": "299.99",
        "items": [],
        "createdAt": now,
        "updatedAt": now,
    })))
}
