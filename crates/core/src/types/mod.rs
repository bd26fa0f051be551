//! Core type definitions.
//!
//! # Organization
//!
//! - [`id`] - Type-safe ID newtypes (`ProductId`, `SessionId`, ...)
//! - [`price`] - Currency codes
//! - [`product`] - Product catalog entities and 3D model references
//! - [`cart`] - Cart items and shopping sessions
//! - [`user`] - User profile and preferences
//! - [`analytics`] - Interaction events and behavior summaries
//! - [`store3d`] - Virtual showroom scene configuration
//! - [`envelope`] - HTTP response envelope and pagination
//! - [`events`] - Socket event protocol (client and server sides)

pub mod analytics;
pub mod cart;
pub mod envelope;
pub mod events;
pub mod id;
pub mod price;
pub mod product;
pub mod store3d;
pub mod user;

pub use analytics::{AnalyticsEvent, BehaviorSummary, EventMetadata, UserBehavior};
pub use cart::{CartItem, Customization, SessionStatus, ShoppingSession};
pub use envelope::{ApiResponse, Page};
pub use events::{CartSnapshot, ClientEvent, InteractionAction, ServerEvent};
pub use id::{OrderId, ProductId, SessionId, UserId};
pub use price::CurrencyCode;
pub use product::{Model3d, ModelFormat, Product, Vector3};
pub use store3d::{
    Ambiance, CameraConfig, EnvironmentConfig, InteractionZone, Lighting, Store3dConfig,
    StoreLayout, StoreTheme, ZoneKind,
};
pub use user::{
    NotificationSettings, PriceRange, PrivacySettings, User, UserPreferences,
};
