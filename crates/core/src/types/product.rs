//! Product catalog entities.
//!
//! Products are immutable after creation in this demo - there is no CRUD
//! persistence behind the catalog, only fixture data served read-only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::CurrencyCode;

/// A point or direction in showroom space.
///
/// Carried as data for the client renderer; the server never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Supported 3D model file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Glb,
    Gltf,
    Fbx,
}

/// Reference to a product's 3D model asset and its placement in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model3d {
    /// Asset URL, relative to the static file root.
    pub url: String,
    pub format: ModelFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vector3>,
}

/// A product in the showroom catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub category: String,
    pub images: Vec<String>,
    /// Optional 3D model; products without one render as a placeholder.
    #[serde(rename = "model3D", skip_serializing_if = "Option::is_none")]
    pub model_3d: Option<Model3d>,
    pub inventory: u32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Modern Sofa".to_owned(),
            description: "Comfortable 3-seater sofa".to_owned(),
            price: Decimal::new(89_999, 2),
            currency: CurrencyCode::USD,
            category: "Furniture".to_owned(),
            images: vec!["/images/sofa1.jpg".to_owned()],
            model_3d: Some(Model3d {
                url: "/models/sofa.glb".to_owned(),
                format: ModelFormat::Glb,
                scale: Some(1.0),
                position: Some(Vector3::new(0.0, 0.0, 0.0)),
                rotation: None,
            }),
            inventory: 10,
            tags: vec!["furniture".to_owned(), "modern".to_owned()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_wire_names_are_camel_case() {
        let json = serde_json::to_value(sample_product()).expect("serialize");
        assert!(json.get("model3D").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("model_3d").is_none());
    }

    #[test]
    fn test_model_format_lowercase() {
        let json = serde_json::to_string(&ModelFormat::Glb).expect("serialize");
        assert_eq!(json, "\"glb\"");
    }
}
