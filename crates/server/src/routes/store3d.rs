//! Showroom configuration route handlers.

use axum::{Json, extract::State};
use serde_json::Value;
use tracing::instrument;

use vitrine_core::{ApiResponse, Store3dConfig};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /api/store3d/config` - current showroom configuration.
#[instrument(skip(state))]
pub async fn show_config(State(state): State<AppState>) -> Json<ApiResponse<Store3dConfig>> {
    Json(ApiResponse::ok(state.store3d()))
}

/// `PUT /api/store3d/config` - merge an update into the configuration.
///
/// Top-level fields present in the body replace the stored ones; omitted
/// fields are kept. The merged result must still be a valid configuration.
#[instrument(skip(state, update))]
pub async fn update_config(
    State(state): State<AppState>,
    Json(update): Json<Value>,
) -> Result<Json<ApiResponse<Store3dConfig>>> {
    let Value::Object(update) = update else {
        return Err(AppError::Validation(
            "Configuration update must be an object".to_owned(),
        ));
    };

    let current = state.store3d();
    let mut merged = serde_json::to_value(&current)
        .map_err(|e| AppError::Internal(format!("failed to serialize configuration: {e}")))?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in update {
            fields.insert(key, value);
        }
    }

    let config: Store3dConfig = serde_json::from_value(merged)
        .map_err(|e| AppError::Validation(format!("Invalid configuration: {e}")))?;
    state.set_store3d(config.clone());

    Ok(Json(ApiResponse::ok_with_message(
        config,
        "Store configuration updated successfully",
    )))
}
