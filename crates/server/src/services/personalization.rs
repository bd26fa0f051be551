//! Personalization behind a swappable interface.
//!
//! Call sites only see the [`Recommender`] trait, so a real recommendation
//! engine can replace [`MockRecommender`] without touching them. The mock
//! returns fixed slices of the catalog and caches results with a 1-hour TTL,
//! mirroring what a remote engine's client would do.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use vitrine_core::{Product, ProductId, UserId};

use crate::catalog::Catalog;

const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Maximum recommendations returned at once.
const MAX_RECOMMENDATIONS: usize = 3;

/// Product IDs the mock always recommends.
const RECOMMENDED_IDS: &[&str] = &["3", "4"];

/// Tag that marks a product as trending in the fixture data.
const TRENDING_TAG: &str = "trending";

/// Source of product recommendations.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Personalized recommendations for a user.
    async fn recommendations(&self, user_id: &UserId) -> Vec<Product>;

    /// Currently trending products.
    async fn trending(&self) -> Vec<Product>;

    /// Products similar to the given one.
    async fn similar(&self, product_id: &ProductId) -> Vec<Product>;

    /// Feed an interaction back into the engine.
    fn record_interaction(&self, user_id: &UserId, product_id: &ProductId);
}

/// Rule-free mock recommender over the fixture catalog.
pub struct MockRecommender {
    catalog: Catalog,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl MockRecommender {
    /// Create a mock recommender over the given catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cache: Cache::builder()
                .max_capacity(1000)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    async fn cached(
        &self,
        key: String,
        compute: impl FnOnce(&Catalog) -> Vec<Product>,
    ) -> Vec<Product> {
        if let Some(hit) = self.cache.get(&key).await {
            return hit.as_ref().clone();
        }
        let products = compute(&self.catalog);
        self.cache.insert(key, Arc::new(products.clone())).await;
        products
    }
}

#[async_trait]
impl Recommender for MockRecommender {
    async fn recommendations(&self, user_id: &UserId) -> Vec<Product> {
        self.cached(format!("recommendations:{user_id}"), |catalog| {
            let mut products: Vec<Product> = RECOMMENDED_IDS
                .iter()
                .filter_map(|id| catalog.get(&ProductId::new(*id)).cloned())
                .collect();
            products.truncate(MAX_RECOMMENDATIONS);
            products
        })
        .await
    }

    async fn trending(&self) -> Vec<Product> {
        self.cached("trending:products".to_owned(), |catalog| {
            catalog
                .products()
                .iter()
                .filter(|p| p.tags.iter().any(|t| t == TRENDING_TAG))
                .cloned()
                .collect()
        })
        .await
    }

    async fn similar(&self, product_id: &ProductId) -> Vec<Product> {
        self.cached(format!("similar:{product_id}"), |catalog| {
            let Some(product) = catalog.get(product_id) else {
                return Vec::new();
            };
            catalog
                .products()
                .iter()
                .filter(|p| p.category == product.category && &p.id != product_id)
                .cloned()
                .collect()
        })
        .await
    }

    fn record_interaction(&self, user_id: &UserId, product_id: &ProductId) {
        // A real engine would refresh this user's model here.
        tracing::debug!(user_id = %user_id, product_id = %product_id, "interaction recorded");
    }
}
