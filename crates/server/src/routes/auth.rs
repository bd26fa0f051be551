//! Mock authentication route handlers.
//!
//! No credential is ever verified and no session is created: login and
//! registration hand out a canned profile plus a placeholder token so the
//! client flows can be exercised end to end.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use vitrine_core::{
    ApiResponse, NotificationSettings, PriceRange, PrivacySettings, User, UserId, UserPreferences,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Placeholder bearer token returned by the mock flows.
const MOCK_TOKEN: &str = "mock-jwt-token";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Authenticated payload: the user plus their token.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// `POST /api/auth/login` - mock login.
#[instrument(skip(_state, request))]
pub async fn login(
    State(_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthPayload>>> {
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::Validation(
            "Email and password are required".to_owned(),
        ));
    };
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_owned(),
        ));
    }

    let now = Utc::now();
    let user = User {
        id: UserId::new("1"),
        email,
        name: "Demo User".to_owned(),
        avatar: Some("/avatars/demo.jpg".to_owned()),
        preferences: UserPreferences {
            favorite_categories: vec!["Electronics".to_owned(), "Furniture".to_owned()],
            price_range: PriceRange {
                min: Decimal::new(50, 0),
                max: Decimal::new(1000, 0),
            },
            style: vec!["modern".to_owned(), "minimalist".to_owned()],
            notifications: NotificationSettings {
                email: true,
                push: true,
            },
            privacy: PrivacySettings {
                share_data: true,
                track_behavior: true,
            },
        },
        shopping_history: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    Ok(Json(ApiResponse::ok_with_message(
        AuthPayload {
            user,
            token: MOCK_TOKEN.to_owned(),
        },
        "Login successful",
    )))
}

/// `POST /api/auth/register` - mock registration.
#[instrument(skip(_state, request))]
pub async fn register(
    State(_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>)> {
    let (Some(email), Some(password), Some(name)) = (request.email, request.password, request.name)
    else {
        return Err(AppError::Validation(
            "Email, password, and name are required".to_owned(),
        ));
    };
    if email.is_empty() || password.is_empty() || name.is_empty() {
        return Err(AppError::Validation(
            "Email, password, and name are required".to_owned(),
        ));
    }

    let now = Utc::now();
    let user = User {
        id: UserId::new(Uuid::new_v4().to_string()),
        email,
        name,
        avatar: None,
        preferences: UserPreferences {
            notifications: NotificationSettings {
                email: true,
                push: false,
            },
            ..UserPreferences::default()
        },
        shopping_history: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            AuthPayload {
                user,
                token: MOCK_TOKEN.to_owned(),
            },
            "Registration successful",
        )),
    ))
}

/// `POST /api/auth/logout` - mock logout.
#[instrument(skip(_state))]
pub async fn logout(State(_state): State<AppState>) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message_only("Logout successful"))
}
