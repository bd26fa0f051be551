//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use vitrine_core::{ApiResponse, Page, Product, ProductId};

use crate::catalog::ListQuery;
use crate::error::{AppError, Result};
use crate::services::analytics::ProductAnalytics;
use crate::state::AppState;

/// `GET /api/products` - paginated, filterable listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Page<Product>>> {
    Json(ApiResponse::ok(state.catalog().list(&query)))
}

/// `GET /api/products/categories` - distinct categories, `All` first.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(state.catalog().categories()))
}

/// `GET /api/products/trending` - trending products.
#[instrument(skip(state))]
pub async fn trending(State(state): State<AppState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::ok(state.recommender().trending().await))
}

/// `GET /api/products/{id}` - single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = state
        .catalog()
        .get(&ProductId::new(id))
        .cloned()
        .ok_or_else(|| AppError::NotFound("Product".to_owned()))?;
    Ok(Json(ApiResponse::ok(product)))
}

/// `GET /api/products/{id}/analytics` - per-product aggregates.
#[instrument(skip(state))]
pub async fn analytics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<ProductAnalytics>> {
    let analytics = state.analytics().product_analytics(&ProductId::new(id)).await;
    Json(ApiResponse::ok(analytics))
}

/// `GET /api/products/{id}/similar` - similar products.
#[instrument(skip(state))]
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<Vec<Product>>> {
    let products = state.recommender().similar(&ProductId::new(id)).await;
    Json(ApiResponse::ok(products))
}
