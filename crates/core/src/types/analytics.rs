//! Interaction telemetry types.
//!
//! Analytics events are disposable: append-only, capped in memory server-side,
//! and never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::id::{SessionId, UserId};

/// Request-level context attached to an event when known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// A single tagged telemetry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Event name, e.g. `view_product` or `cart_update`.
    pub event_type: String,
    /// Free-form event properties (product IDs, totals, durations, ...).
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

impl AnalyticsEvent {
    /// Create an event with empty properties, stamped now.
    #[must_use]
    pub fn new(event_type: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            event_type: event_type.into(),
            properties: Map::new(),
            user_id: None,
            session_id,
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    /// Attach a user to the event.
    #[must_use]
    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Add a property, skipping `Null` values to keep payloads compact.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        if !value.is_null() {
            self.properties.insert(key.into(), value);
        }
        self
    }

    /// Read a string property, if present.
    #[must_use]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// Aggregated counters over one user's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorSummary {
    /// Milliseconds between the user's first and last event.
    pub total_time_ms: i64,
    /// Distinct products viewed.
    pub products_viewed: usize,
    pub items_added_to_cart: usize,
    pub checkout_attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_value: Option<Decimal>,
}

/// One user's event history plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBehavior {
    pub user_id: UserId,
    /// Specific session ID, or `all` when aggregated across sessions.
    pub session_id: String,
    pub events: Vec<AnalyticsEvent>,
    pub summary: BehaviorSummary,
}
