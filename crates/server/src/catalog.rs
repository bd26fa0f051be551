//! Mock product catalog and showroom fixture data.
//!
//! The catalog is read-only after construction - there is no persistence
//! behind it. Listing applies category/search filters, sorting, and
//! pagination over the in-memory vector.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use vitrine_core::{
    Ambiance, CameraConfig, CurrencyCode, EnvironmentConfig, InteractionZone, Lighting, Model3d,
    ModelFormat, Page, Product, ProductId, Store3dConfig, StoreLayout, StoreTheme, Vector3,
    ZoneKind,
};

/// Default page size for product listings.
const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Listing query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build the demo catalog from fixture data.
    #[must_use]
    pub fn with_mock_products() -> Self {
        Self {
            products: mock_products(),
        }
    }

    /// Build a catalog from explicit products (tests).
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, unfiltered.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up one product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Distinct categories with `All` first.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec!["All".to_owned()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Filter, sort, and paginate the catalog.
    #[must_use]
    pub fn list(&self, query: &ListQuery) -> Page<Product> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);

        let mut filtered: Vec<Product> = self
            .products
            .iter()
            .filter(|p| match query.category.as_deref() {
                Some(category) if category != "All" => p.category == category,
                _ => true,
            })
            .filter(|p| match query.search.as_deref() {
                Some(search) => {
                    let needle = search.to_lowercase();
                    p.name.to_lowercase().contains(&needle)
                        || p.description.to_lowercase().contains(&needle)
                        || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
                }
                None => true,
            })
            .cloned()
            .collect();

        sort_products(&mut filtered, query);

        Page::paginate(filtered, page, limit)
    }
}

fn sort_products(products: &mut [Product], query: &ListQuery) {
    match query.sort_by.as_deref().unwrap_or("name") {
        "price" => products.sort_by(|a, b| a.price.cmp(&b.price)),
        "category" => products.sort_by(|a, b| a.category.cmp(&b.category)),
        "createdAt" => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        // Unknown keys fall back to name, the original default.
        _ => products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
    if query.sort_order.as_deref() == Some("desc") {
        products.reverse();
    }
}

// =============================================================================
// Fixture data
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    category: &str,
    images: &[&str],
    model_3d: Option<Model3d>,
    inventory: u32,
    tags: &[&str],
) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        currency: CurrencyCode::USD,
        category: category.to_owned(),
        images: images.iter().map(|&s| s.to_owned()).collect(),
        model_3d,
        inventory,
        tags: tags.iter().map(|&s| s.to_owned()).collect(),
        created_at: now,
        updated_at: now,
    }
}

fn model(url: &str, scale: f64, position: Vector3) -> Model3d {
    Model3d {
        url: url.to_owned(),
        format: ModelFormat::Glb,
        scale: Some(scale),
        position: Some(position),
        rotation: Some(Vector3::default()),
    }
}

/// The demo product fixtures.
fn mock_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Modern Sofa",
            "Comfortable 3-seater sofa perfect for any living room",
            Decimal::new(89_999, 2),
            "Furniture",
            &["/images/sofa1.jpg"],
            Some(model("/models/sofa.glb", 1.0, Vector3::new(0.0, 0.0, 0.0))),
            10,
            &["furniture", "living-room", "modern"],
        ),
        product(
            "2",
            "Wireless Headphones",
            "Premium noise-canceling wireless headphones",
            Decimal::new(29_999, 2),
            "Electronics",
            &["/images/headphones1.jpg"],
            Some(model(
                "/models/headphones.glb",
                0.5,
                Vector3::new(2.0, 1.0, 0.0),
            )),
            25,
            &["electronics", "audio", "wireless"],
        ),
        product(
            "3",
            "Smart Watch",
            "Advanced fitness tracking smartwatch",
            Decimal::new(19_999, 2),
            "Electronics",
            &["/images/smartwatch1.jpg"],
            Some(model(
                "/models/smartwatch.glb",
                0.8,
                Vector3::new(-2.0, 1.0, 2.0),
            )),
            15,
            &["electronics", "wearable", "fitness"],
        ),
        product(
            "4",
            "Coffee Table",
            "Modern glass coffee table",
            Decimal::new(44_999, 2),
            "Furniture",
            &["/images/table1.jpg"],
            Some(model(
                "/models/table.glb",
                1.2,
                Vector3::new(2.0, 0.0, -2.0),
            )),
            8,
            &["furniture", "living-room", "modern"],
        ),
        product(
            "5",
            "Smart Speaker",
            "Popular voice-controlled smart speaker",
            Decimal::new(7_999, 2),
            "Electronics",
            &["/images/speaker1.jpg"],
            None,
            20,
            &["electronics", "trending", "popular"],
        ),
    ]
}

/// The default showroom scene configuration.
#[must_use]
pub fn mock_store_config() -> Store3dConfig {
    Store3dConfig {
        id: "default-store".to_owned(),
        name: "Virtual Showroom".to_owned(),
        layout: StoreLayout::Showroom,
        theme: StoreTheme {
            primary_color: "#3b82f6".to_owned(),
            secondary_color: "#6b7280".to_owned(),
            lighting: Lighting::Warm,
            ambiance: Ambiance::Modern,
        },
        camera: CameraConfig {
            position: Vector3::new(0.0, 5.0, 10.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            fov: 75.0,
        },
        environment: EnvironmentConfig {
            skybox: Some("/textures/skybox.hdr".to_owned()),
            ground: Some("/textures/floor.jpg".to_owned()),
            walls: None,
        },
        interaction_zones: vec![InteractionZone {
            id: "checkout-zone".to_owned(),
            kind: ZoneKind::Checkout,
            position: Vector3::new(5.0, 0.0, 5.0),
            size: Vector3::new(2.0, 2.0, 2.0),
            product_ids: None,
            content: Some("Complete your purchase here".to_owned()),
            actions: vec!["checkout".to_owned(), "view_cart".to_owned()],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_fixture_products() {
        let catalog = Catalog::with_mock_products();
        assert_eq!(catalog.products().len(), 5);
        assert!(catalog.get(&ProductId::new("1")).is_some());
        assert!(catalog.get(&ProductId::new("404")).is_none());
    }

    #[test]
    fn test_categories_all_first_distinct() {
        let catalog = Catalog::with_mock_products();
        assert_eq!(catalog.categories(), &["All", "Furniture", "Electronics"]);
    }

    #[test]
    fn test_list_filters_by_category() {
        let catalog = Catalog::with_mock_products();
        let page = catalog.list(&ListQuery {
            category: Some("Furniture".to_owned()),
            ..ListQuery::default()
        });
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|p| p.category == "Furniture"));
    }

    #[test]
    fn test_list_category_all_matches_everything() {
        let catalog = Catalog::with_mock_products();
        let page = catalog.list(&ListQuery {
            category: Some("All".to_owned()),
            ..ListQuery::default()
        });
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_list_search_matches_tags_case_insensitive() {
        let catalog = Catalog::with_mock_products();
        let page = catalog.list(&ListQuery {
            search: Some("WIRELESS".to_owned()),
            ..ListQuery::default()
        });
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Wireless Headphones");
    }

    #[test]
    fn test_list_sorts_by_price_desc() {
        let catalog = Catalog::with_mock_products();
        let page = catalog.list(&ListQuery {
            sort_by: Some("price".to_owned()),
            sort_order: Some("desc".to_owned()),
            ..ListQuery::default()
        });
        assert_eq!(page.items[0].name, "Modern Sofa");
        let prices: Vec<Decimal> = page.items.iter().map(|p| p.price).collect();
        let mut sorted = prices.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_list_pagination_flags() {
        let catalog = Catalog::with_mock_products();
        let page = catalog.list(&ListQuery {
            page: Some(2),
            limit: Some(2),
            ..ListQuery::default()
        });
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let catalog = Catalog::with_mock_products();
        let page = catalog.list(&ListQuery::default());
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names, sorted);
    }
}
