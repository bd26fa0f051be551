//! User route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use vitrine_core::{ApiResponse, Product, UserId, UserPreferences};

use crate::state::AppState;

/// `GET /api/users/{id}/recommendations` - personalized recommendations.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<Vec<Product>>> {
    let products = state
        .recommender()
        .recommendations(&UserId::new(id))
        .await;
    Json(ApiResponse::ok(products))
}

/// `PUT /api/users/{id}/preferences` - update preferences.
///
/// Mock update: the preferences are logged and echoed back; nothing persists.
#[instrument(skip(_state, preferences))]
pub async fn update_preferences(
    State(_state): State<AppState>,
    Path(id): Path<String>,
    Json(preferences): Json<UserPreferences>,
) -> Json<ApiResponse<UserPreferences>> {
    tracing::info!(user_id = %id, "updated user preferences");
    Json(ApiResponse::ok_with_message(
        preferences,
        "Preferences updated successfully",
    ))
}
