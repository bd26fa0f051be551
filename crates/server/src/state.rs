//! Application state shared across handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use vitrine_core::Store3dConfig;

use crate::catalog::{self, Catalog};
use crate::config::ServerConfig;
use crate::registry::{INACTIVE_THRESHOLD, SWEEP_INTERVAL, SessionRegistry};
use crate::services::{AnalyticsService, MockRecommender, Recommender};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the session registry, and the services. Everything mutable lives
/// behind explicit locks owned here - no module-level state anywhere.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
    store3d: RwLock<Store3dConfig>,
    registry: SessionRegistry,
    analytics: AnalyticsService,
    recommender: Arc<dyn Recommender>,
    started_at: Instant,
}

impl AppState {
    /// Create application state with the fixture catalog and mock services.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let catalog = Catalog::with_mock_products();
        let recommender: Arc<dyn Recommender> = Arc::new(MockRecommender::new(catalog.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store3d: RwLock::new(catalog::mock_store_config()),
                registry: SessionRegistry::new(),
                analytics: AnalyticsService::new(),
                recommender,
                catalog,
                started_at: Instant::now(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the session registry.
    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.inner.registry
    }

    /// Get a reference to the analytics service.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsService {
        &self.inner.analytics
    }

    /// Get a reference to the recommendation engine.
    #[must_use]
    pub fn recommender(&self) -> &Arc<dyn Recommender> {
        &self.inner.recommender
    }

    /// Current showroom configuration.
    #[must_use]
    pub fn store3d(&self) -> Store3dConfig {
        self.inner.store3d.read().clone()
    }

    /// Replace the showroom configuration.
    pub fn set_store3d(&self, config: Store3dConfig) {
        *self.inner.store3d.write() = config;
    }

    /// Time since this state was constructed.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }

    /// Spawn the periodic registry sweep.
    ///
    /// The sweep is the system's only resource-reclamation mechanism: every
    /// [`SWEEP_INTERVAL`] it drops connections idle beyond
    /// [`INACTIVE_THRESHOLD`].
    pub fn start_registry_sweeper(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = state.registry().sweep(INACTIVE_THRESHOLD);
                if removed > 0 {
                    tracing::info!(removed, "registry sweep reclaimed connections");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_cheap_to_clone_and_shares_registry() {
        let state = AppState::new(ServerConfig::default());
        let clone = state.clone();

        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        state.registry().join(
            crate::registry::ConnId::generate(),
            vitrine_core::SessionId::new("s1"),
            None,
            tx,
        );
        assert_eq!(clone.registry().connection_count(), 1);
    }

    #[test]
    fn test_store3d_replace() {
        let state = AppState::new(ServerConfig::default());
        let mut config = state.store3d();
        config.name = "Renamed".to_owned();
        state.set_store3d(config);
        assert_eq!(state.store3d().name, "Renamed");
    }
}
