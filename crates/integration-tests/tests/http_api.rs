//! HTTP API tests: envelope shape, pagination, and the error taxonomy.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use vitrine_integration_tests::{body_json, get, json_request, test_app};

#[tokio::test]
async fn test_health_reports_ok() {
    let (app, _state) = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "development");
    assert!(body["uptime"].as_f64().is_some());
}

#[tokio::test]
async fn test_products_listing_envelope_and_pagination() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(get("/api/products?page=1&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["total"], 5);
    assert_eq!(data["page"], 1);
    assert_eq!(data["limit"], 2);
    assert_eq!(data["hasNext"], true);
    assert_eq!(data["hasPrev"], false);
}

#[tokio::test]
async fn test_products_filter_by_category() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(get("/api/products?category=Furniture"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|p| p["category"] == "Furniture"));
}

#[tokio::test]
async fn test_product_show_found_and_missing() {
    let (app, _state) = test_app();
    let response = app.clone().oneshot(get("/api/products/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Modern Sofa");
    assert_eq!(body["data"]["model3D"]["format"], "glb");

    let response = app.oneshot(get("/api/products/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_product_categories() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(get("/api/products/categories"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"], json!(["All", "Furniture", "Electronics"]));
}

#[tokio::test]
async fn test_trending_products() {
    let (app, _state) = test_app();
    let response = app.oneshot(get("/api/products/trending")).await.unwrap();
    let body = body_json(response).await;
    let items = body["data"].as_array().unwrap();
    assert!(!items.is_empty());
}

#[tokio::test]
async fn test_similar_products_share_category() {
    let (app, _state) = test_app();
    let response = app.oneshot(get("/api/products/1/similar")).await.unwrap();
    let body = body_json(response).await;
    let items = body["data"].as_array().unwrap();
    assert!(items.iter().all(|p| p["category"] == "Furniture"));
    assert!(items.iter().all(|p| p["id"] != "1"));
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({"email": "demo@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn test_login_returns_mock_user_and_token() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({"email": "demo@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "demo@example.com");
    assert_eq!(body["data"]["user"]["name"], "Demo User");
    assert_eq!(body["data"]["token"], "mock-jwt-token");
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"email": "a@b.c", "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email, password, and name are required");
}

#[tokio::test]
async fn test_register_creates_mock_user() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            &json!({"email": "new@example.com", "password": "pw", "name": "New User"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["user"]["name"], "New User");
    assert_eq!(body["message"], "Registration successful");
}

#[tokio::test]
async fn test_unknown_route_fallback_shape() {
    let (app, _state) = test_app();
    let response = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_orders_create_echoes_payload() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/orders",
            &json!({"items": [{"productId": "1", "quantity": 2}], "total": "1799.98"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["total"], "1799.98");
    assert!(body["data"]["id"].as_str().is_some());
}

#[tokio::test]
async fn test_orders_show_returns_mock_record() {
    let (app, _state) = test_app();
    let response = app.oneshot(get("/api/orders/abc-1")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], "abc-1");
    assert_eq!(body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_user_recommendations() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(get("/api/users/u1/recommendations"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["3", "4"]);
}

#[tokio::test]
async fn test_update_preferences_echoes() {
    let (app, _state) = test_app();
    let preferences = json!({
        "favoriteCategories": ["Electronics"],
        "priceRange": {"min": "10", "max": "500"},
        "style": ["modern"],
        "notifications": {"email": true, "push": false},
        "privacy": {"shareData": false, "trackBehavior": true}
    });
    let response = app
        .oneshot(json_request("PUT", "/api/users/u1/preferences", &preferences))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Preferences updated successfully");
    assert_eq!(body["data"]["favoriteCategories"], json!(["Electronics"]));
}

#[tokio::test]
async fn test_analytics_dashboard_empty() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(get("/api/analytics/dashboard"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["totalEvents"], 0);
    assert_eq!(body["data"]["uniqueUsers"], 0);
    assert_eq!(body["data"]["conversionRate"], 0.0);
}

#[tokio::test]
async fn test_analytics_unknown_user_is_null() {
    let (app, _state) = test_app();
    let response = app.oneshot(get("/api/analytics/users/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_store3d_config_get_and_merge_update() {
    let (app, _state) = test_app();

    let response = app
        .clone()
        .oneshot(get("/api/store3d/config"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Virtual Showroom");
    assert_eq!(body["data"]["layout"], "showroom");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/store3d/config",
            &json!({"name": "Night Gallery", "layout": "gallery"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Store configuration updated successfully");

    // Merged: updated fields replaced, untouched fields kept.
    let response = app.oneshot(get("/api/store3d/config")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Night Gallery");
    assert_eq!(body["data"]["layout"], "gallery");
    assert_eq!(body["data"]["camera"]["fov"], 75.0);
    assert_eq!(body["data"]["theme"]["lighting"], "warm");
}

#[tokio::test]
async fn test_store3d_rejects_invalid_update() {
    let (app, _state) = test_app();
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/store3d/config",
            &json!({"layout": "spaceship"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}
