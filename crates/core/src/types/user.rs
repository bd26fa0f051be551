//! User profile and preference types.
//!
//! Users are mock entities in this demo: the auth endpoints hand out a canned
//! profile and no credential is ever verified.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::cart::ShoppingSession;
use crate::types::id::UserId;

/// Preferred price band, derived from browsing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Notification opt-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
}

/// Privacy opt-ins governing analytics collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub share_data: bool,
    pub track_behavior: bool,
}

/// A user's shopping preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub favorite_categories: Vec<String>,
    pub price_range: PriceRange,
    pub style: Vec<String>,
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            favorite_categories: Vec::new(),
            price_range: PriceRange {
                min: Decimal::ZERO,
                max: Decimal::new(1000, 0),
            },
            style: Vec::new(),
            notifications: NotificationSettings::default(),
            privacy: PrivacySettings::default(),
        }
    }
}

/// A shopper's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub preferences: UserPreferences,
    pub shopping_history: Vec<ShoppingSession>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
