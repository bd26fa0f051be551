//! Virtual showroom scene configuration.
//!
//! The server only stores and serves this configuration; interpreting it is
//! the renderer's job.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Vector3;

/// Overall floor-plan style of the showroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreLayout {
    Showroom,
    Gallery,
    Mall,
    Custom,
}

/// Scene lighting temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    Warm,
    Cool,
    Neutral,
}

/// Visual ambiance preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ambiance {
    Modern,
    Classic,
    Futuristic,
}

/// Color and mood settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTheme {
    pub primary_color: String,
    pub secondary_color: String,
    pub lighting: Lighting,
    pub ambiance: Ambiance,
}

/// Initial camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub position: Vector3,
    pub target: Vector3,
    pub fov: f64,
}

/// Environment texture references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skybox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walls: Option<Vec<String>>,
}

/// What an interaction zone does when entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    ProductDisplay,
    Checkout,
    Information,
    Navigation,
}

/// A walkable region of the scene that triggers actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionZone {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    pub position: Vector3,
    pub size: Vector3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<ProductId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub actions: Vec<String>,
}

/// Full showroom configuration served to (and updatable by) clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store3dConfig {
    pub id: String,
    pub name: String,
    pub layout: StoreLayout,
    pub theme: StoreTheme,
    pub camera: CameraConfig,
    pub environment: EnvironmentConfig,
    pub interaction_zones: Vec<InteractionZone>,
}
