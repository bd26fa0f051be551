//! Analytics route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use vitrine_core::{ApiResponse, SessionId, UserBehavior, UserId};

use crate::services::analytics::DashboardData;
use crate::state::AppState;

/// Query parameters for user behavior lookups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorQuery {
    pub session_id: Option<String>,
}

/// `GET /api/analytics/dashboard` - last-24h aggregates.
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Json<ApiResponse<DashboardData>> {
    Json(ApiResponse::ok(state.analytics().dashboard().await))
}

/// `GET /api/analytics/users/{id}` - one user's behavior summary.
///
/// `data` is `null` when the user has no recorded events.
#[instrument(skip(state))]
pub async fn user_behavior(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<BehaviorQuery>,
) -> Json<ApiResponse<Option<UserBehavior>>> {
    let session_id = query.session_id.map(SessionId::new);
    let behavior = state
        .analytics()
        .user_behavior(&UserId::new(id), session_id.as_ref())
        .await;
    Json(ApiResponse::ok(behavior))
}
