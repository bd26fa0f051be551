//! Socket event protocol.
//!
//! Both directions use tagged JSON frames: `{"type": "...", "payload": {...}}`
//! with snake_case event names. Delivery is fire-and-forget, at-most-once;
//! no event carries an acknowledgment or idempotency key, and duplicate
//! delivery after a reconnect is possible and unhandled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::cart::CartItem;
use crate::types::id::{ProductId, SessionId, UserId};
use crate::types::product::{Product, Vector3};

/// A discrete user action emitted for analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionAction {
    ViewProduct,
    AddToCart,
    RemoveFromCart,
    Checkout,
    Navigate,
}

impl InteractionAction {
    /// The event-type string used when recording this action.
    #[must_use]
    pub const fn as_event_type(self) -> &'static str {
        match self {
            Self::ViewProduct => "view_product",
            Self::AddToCart => "add_to_cart",
            Self::RemoveFromCart => "remove_from_cart",
            Self::Checkout => "checkout",
            Self::Navigate => "navigate",
        }
    }
}

/// Point-in-time copy of a cart, shipped alongside cart events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub item_count: u32,
}

/// Events sent from a browser tab to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Bind this connection to a logical shopping session.
    ///
    /// Must be re-sent after a reconnect: a new socket is a brand-new
    /// unjoined entity and the prior association is lost.
    #[serde(rename_all = "camelCase")]
    JoinSession {
        session_id: SessionId,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
    },
    /// A discrete interaction, relayed to the session room and recorded.
    #[serde(rename_all = "camelCase")]
    UserInteraction {
        session_id: SessionId,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        action: InteractionAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        product_id: Option<ProductId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<Vector3>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_ms: Option<i64>,
    },
    /// Full cart snapshot after a client-side mutation.
    #[serde(rename_all = "camelCase")]
    CartUpdate {
        session_id: SessionId,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        cart: CartSnapshot,
    },
    /// Ask the server for current stock of a product.
    #[serde(rename_all = "camelCase")]
    InventoryCheck { product_id: ProductId },
    /// Customer support chat message.
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        session_id: SessionId,
        message: String,
    },
    /// Support agent reply routed to a customer session.
    #[serde(rename_all = "camelCase")]
    SupportResponse {
        session_id: SessionId,
        message: String,
    },
    /// Start a flash sale broadcast to everyone.
    #[serde(rename_all = "camelCase")]
    FlashSaleTrigger {
        product_id: ProductId,
        discount_percent: u8,
        duration_secs: u64,
    },
}

/// Events pushed from the server to browser tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Another tab joined this session.
    #[serde(rename_all = "camelCase")]
    UserJoined {
        session_id: SessionId,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        timestamp: DateTime<Utc>,
    },
    /// A tab left this session.
    #[serde(rename_all = "camelCase")]
    UserLeft {
        session_id: SessionId,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        timestamp: DateTime<Utc>,
    },
    /// Recommendations for the newly joined user.
    #[serde(rename_all = "camelCase")]
    PersonalizedRecommendations { products: Vec<Product> },
    /// Someone in the session interacted with a product.
    #[serde(rename_all = "camelCase")]
    ProductInteraction {
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        action: InteractionAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        product_id: Option<ProductId>,
        timestamp: DateTime<Utc>,
    },
    /// Cart state from another tab/device of the same user.
    #[serde(rename_all = "camelCase")]
    CartSync { cart: CartSnapshot },
    /// Current stock for a product.
    #[serde(rename_all = "camelCase")]
    InventoryUpdate {
        product_id: ProductId,
        inventory: u32,
    },
    /// A flash sale started.
    #[serde(rename_all = "camelCase")]
    FlashSale {
        product_id: ProductId,
        discount_percent: u8,
        ends_at: DateTime<Utc>,
    },
    /// The flash sale timer expired.
    #[serde(rename_all = "camelCase")]
    FlashSaleEnded { product_id: ProductId },
    /// Support agent message delivered to a customer session.
    #[serde(rename_all = "camelCase")]
    SupportMessage {
        message: String,
        timestamp: DateTime<Utc>,
    },
    /// Customer chat message delivered to the support room.
    #[serde(rename_all = "camelCase")]
    CustomerMessage {
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        session_id: SessionId,
        message: String,
        timestamp: DateTime<Utc>,
    },
}
