//! Cart items and shopping sessions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{ProductId, SessionId, UserId};
use crate::types::price::CurrencyCode;

/// Optional per-item customization chosen at add-to-cart time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engraving: Option<String>,
}

/// A single cart line.
///
/// Owned exclusively by its session: created on add-to-cart, mutated on
/// quantity change, removed on zero quantity or explicit removal. Quantity is
/// always at least 1 for an entry that exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
    pub added_at: DateTime<Utc>,
}

/// Shopping session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Checkout,
    Completed,
    Abandoned,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Checkout => write!(f, "checkout"),
            Self::Completed => write!(f, "completed"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "checkout" => Ok(Self::Checkout),
            "completed" => Ok(Self::Completed),
            "abandoned" => Ok(Self::Abandoned),
            _ => Err(format!("invalid session status: {s}")),
        }
    }
}

/// A browser-tab-scoped shopping context.
///
/// Created on app load, mutated on every cart operation. Sessions are never
/// explicitly closed in this demo; the status enum exists for the full
/// lifecycle but only `active` is reached by the current flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingSession {
    pub id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub currency: CurrencyCode,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingSession {
    /// Create a fresh, empty session with a generated ID.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::generate(),
            user_id: None,
            items: Vec::new(),
            total: Decimal::ZERO,
            currency: CurrencyCode::USD,
            status: SessionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for ShoppingSession {
    fn default() -> Self {
        Self::new()
    }
}
