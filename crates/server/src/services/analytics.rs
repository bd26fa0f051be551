//! In-memory analytics: event log and naive aggregates.
//!
//! Events are disposable telemetry. The log is append-only and capped: once
//! full, the oldest entries are silently discarded rather than rejecting new
//! writes. Nothing is ever persisted.
//!
//! Aggregates are recomputed by scanning the log and cached with short TTLs.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use moka::future::Cache;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use vitrine_core::{AnalyticsEvent, BehaviorSummary, ProductId, SessionId, UserBehavior, UserId};

/// Maximum events retained in memory.
pub const EVENT_LOG_CAP: usize = 1000;

/// Product views by one user that mark them as high-intent.
const HIGH_INTENT_VIEWS: usize = 5;

/// How long after an add-to-cart the abandonment check fires.
const ABANDONMENT_CHECK_DELAY: Duration = Duration::from_secs(15 * 60);

const BEHAVIOR_CACHE_TTL: Duration = Duration::from_secs(30 * 60);
const DASHBOARD_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// A ranked event type.
#[derive(Debug, Clone, Serialize)]
pub struct TopEvent {
    pub event: String,
    pub count: usize,
}

/// A ranked product by view count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: String,
    pub views: usize,
}

/// Dashboard aggregates over the last 24 hours.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_events: usize,
    pub unique_users: usize,
    pub unique_sessions: usize,
    pub top_events: Vec<TopEvent>,
    pub top_products: Vec<TopProduct>,
    /// Checkouts per product view, in percent.
    pub conversion_rate: f64,
    /// Mean session duration in milliseconds.
    pub average_session_duration: f64,
    pub timestamp: DateTime<Utc>,
}

/// Views per hour-of-day bucket.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyViews {
    pub hour: u32,
    pub views: usize,
}

/// Per-product aggregates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalytics {
    pub product_id: ProductId,
    pub total_views: usize,
    pub total_add_to_carts: usize,
    /// Add-to-carts per view, in percent.
    pub conversion_rate: f64,
    /// Mean `duration` property over view events, in milliseconds.
    pub average_view_duration: f64,
    pub unique_viewers: usize,
    pub views_by_hour: Vec<HourlyViews>,
    pub timestamp: DateTime<Utc>,
}

struct AnalyticsInner {
    events: Mutex<VecDeque<AnalyticsEvent>>,
    behavior_cache: Cache<String, UserBehavior>,
    dashboard_cache: Cache<String, DashboardData>,
    product_cache: Cache<String, ProductAnalytics>,
}

/// Owned analytics service; cheap to clone, injected through `AppState`.
#[derive(Clone)]
pub struct AnalyticsService {
    inner: Arc<AnalyticsInner>,
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsService {
    /// Create an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AnalyticsInner {
                events: Mutex::new(VecDeque::with_capacity(EVENT_LOG_CAP)),
                behavior_cache: cache(BEHAVIOR_CACHE_TTL),
                dashboard_cache: cache(DASHBOARD_CACHE_TTL),
                product_cache: cache(PRODUCT_CACHE_TTL),
            }),
        }
    }

    /// Append an event to the log and run real-time processing.
    ///
    /// The log cap is enforced here: over capacity, the oldest entries are
    /// dropped without signaling the writer.
    pub fn track(&self, event: AnalyticsEvent) {
        tracing::info!(
            event_type = %event.event_type,
            user_id = event.user_id.as_ref().map_or("anonymous", UserId::as_str),
            "analytics event tracked"
        );

        {
            let mut events = self.inner.events.lock();
            events.push_back(event.clone());
            while events.len() > EVENT_LOG_CAP {
                events.pop_front();
            }
        }

        self.process_real_time(&event);
    }

    /// Immediate insights on the freshly tracked event.
    fn process_real_time(&self, event: &AnalyticsEvent) {
        if event.event_type == "view_product"
            && let Some(user_id) = &event.user_id
        {
            let views = {
                let events = self.inner.events.lock();
                events
                    .iter()
                    .filter(|e| e.user_id.as_ref() == Some(user_id))
                    .filter(|e| e.event_type == "view_product")
                    .count()
            };
            if views >= HIGH_INTENT_VIEWS {
                tracing::info!(user_id = %user_id, views, "high-intent user detected");
            }
        }

        if event.event_type == "add_to_cart"
            && event.user_id.is_some()
            && let Ok(handle) = tokio::runtime::Handle::try_current()
        {
            let service = self.clone();
            let user_id = event.user_id.clone();
            let after = event.timestamp;
            // Fire-once timer; cannot be cancelled once scheduled.
            handle.spawn(async move {
                tokio::time::sleep(ABANDONMENT_CHECK_DELAY).await;
                service.check_abandonment(user_id.as_ref(), after);
            });
        }
    }

    fn check_abandonment(&self, user_id: Option<&UserId>, after: DateTime<Utc>) {
        let events = self.inner.events.lock();
        let followed_up = has_follow_up(events.iter(), user_id, after);
        drop(events);
        if !followed_up && let Some(user_id) = user_id {
            tracing::info!(user_id = %user_id, "potential cart abandonment detected");
        }
    }

    /// Behavior summary for one user, optionally narrowed to a session.
    ///
    /// Returns `None` when the user has no recorded events.
    pub async fn user_behavior(
        &self,
        user_id: &UserId,
        session_id: Option<&SessionId>,
    ) -> Option<UserBehavior> {
        let session_label = session_id.map_or("all", SessionId::as_str).to_owned();
        let key = format!("behavior:{user_id}:{session_label}");
        if let Some(hit) = self.inner.behavior_cache.get(&key).await {
            return Some(hit);
        }

        let events: Vec<AnalyticsEvent> = {
            let log = self.inner.events.lock();
            log.iter()
                .filter(|e| e.user_id.as_ref() == Some(user_id))
                .filter(|e| session_id.is_none_or(|s| &e.session_id == s))
                .cloned()
                .collect()
        };
        if events.is_empty() {
            return None;
        }

        let behavior = UserBehavior {
            user_id: user_id.clone(),
            session_id: session_label,
            summary: summarize(&events),
            events,
        };
        self.inner
            .behavior_cache
            .insert(key, behavior.clone())
            .await;
        Some(behavior)
    }

    /// Dashboard aggregates over the last 24 hours.
    pub async fn dashboard(&self) -> DashboardData {
        let key = "dashboard".to_owned();
        if let Some(hit) = self.inner.dashboard_cache.get(&key).await {
            return hit;
        }

        let now = Utc::now();
        let window_start = now - chrono::Duration::hours(24);
        let recent: Vec<AnalyticsEvent> = {
            let log = self.inner.events.lock();
            log.iter()
                .filter(|e| e.timestamp >= window_start)
                .cloned()
                .collect()
        };

        let dashboard = DashboardData {
            total_events: recent.len(),
            unique_users: recent
                .iter()
                .filter_map(|e| e.user_id.as_ref())
                .collect::<HashSet<_>>()
                .len(),
            unique_sessions: recent
                .iter()
                .map(|e| &e.session_id)
                .collect::<HashSet<_>>()
                .len(),
            top_events: top_events(&recent),
            top_products: top_products(&recent),
            conversion_rate: percentage(
                count_events(&recent, "checkout"),
                count_events(&recent, "view_product"),
            ),
            average_session_duration: average_session_duration(&recent),
            timestamp: now,
        };
        self.inner
            .dashboard_cache
            .insert(key, dashboard.clone())
            .await;
        dashboard
    }

    /// Aggregates for one product.
    pub async fn product_analytics(&self, product_id: &ProductId) -> ProductAnalytics {
        let key = format!("product:analytics:{product_id}");
        if let Some(hit) = self.inner.product_cache.get(&key).await {
            return hit;
        }

        let events: Vec<AnalyticsEvent> = {
            let log = self.inner.events.lock();
            log.iter()
                .filter(|e| e.property_str("productId") == Some(product_id.as_str()))
                .cloned()
                .collect()
        };

        let views = count_events(&events, "view_product");
        let add_to_carts = count_events(&events, "add_to_cart");
        let analytics = ProductAnalytics {
            product_id: product_id.clone(),
            total_views: views,
            total_add_to_carts: add_to_carts,
            conversion_rate: percentage(add_to_carts, views),
            average_view_duration: average_view_duration(&events),
            unique_viewers: events
                .iter()
                .filter_map(|e| e.user_id.as_ref())
                .collect::<HashSet<_>>()
                .len(),
            views_by_hour: views_by_hour(&events),
            timestamp: Utc::now(),
        };
        self.inner
            .product_cache
            .insert(key, analytics.clone())
            .await;
        analytics
    }

    /// Number of events currently retained.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.inner.events.lock().len()
    }
}

fn cache<V: Clone + Send + Sync + 'static>(ttl: Duration) -> Cache<String, V> {
    Cache::builder().max_capacity(1000).time_to_live(ttl).build()
}

// =============================================================================
// Aggregate helpers
// =============================================================================

/// Did the user check out or remove from cart after `after`?
fn has_follow_up<'a>(
    events: impl Iterator<Item = &'a AnalyticsEvent>,
    user_id: Option<&UserId>,
    after: DateTime<Utc>,
) -> bool {
    events.filter(|e| e.user_id.as_ref() == user_id).any(|e| {
        e.timestamp > after && (e.event_type == "checkout" || e.event_type == "remove_from_cart")
    })
}

fn summarize(events: &[AnalyticsEvent]) -> BehaviorSummary {
    BehaviorSummary {
        total_time_ms: total_time_ms(events),
        products_viewed: events
            .iter()
            .filter(|e| e.event_type == "view_product")
            .filter_map(|e| e.property_str("productId"))
            .collect::<HashSet<_>>()
            .len(),
        items_added_to_cart: count_events(events, "add_to_cart"),
        checkout_attempts: count_events(events, "checkout"),
        purchase_value: purchase_value(events),
    }
}

/// Milliseconds between the first and last event.
fn total_time_ms(events: &[AnalyticsEvent]) -> i64 {
    let first = events.iter().map(|e| e.timestamp).min();
    let last = events.iter().map(|e| e.timestamp).max();
    match (first, last) {
        (Some(first), Some(last)) if events.len() >= 2 => (last - first).num_milliseconds(),
        _ => 0,
    }
}

fn count_events(events: &[AnalyticsEvent], event_type: &str) -> usize {
    events.iter().filter(|e| e.event_type == event_type).count()
}

fn purchase_value(events: &[AnalyticsEvent]) -> Option<Decimal> {
    let totals: Vec<Decimal> = events
        .iter()
        .filter(|e| e.event_type == "checkout")
        .filter_map(|e| decimal_property(e, "total"))
        .collect();
    if totals.is_empty() {
        None
    } else {
        Some(totals.into_iter().sum())
    }
}

/// Read a property as a decimal, accepting both string and number encodings.
fn decimal_property(event: &AnalyticsEvent, key: &str) -> Option<Decimal> {
    match event.properties.get(key)? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        _ => None,
    }
}

fn top_events(events: &[AnalyticsEvent]) -> Vec<TopEvent> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in events {
        *counts.entry(event.event_type.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<TopEvent> = counts
        .into_iter()
        .map(|(event, count)| TopEvent {
            event: event.to_owned(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.event.cmp(&b.event)));
    ranked.truncate(10);
    ranked
}

fn top_products(events: &[AnalyticsEvent]) -> Vec<TopProduct> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in events.iter().filter(|e| e.event_type == "view_product") {
        if let Some(product_id) = event.property_str("productId") {
            *counts.entry(product_id).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<TopProduct> = counts
        .into_iter()
        .map(|(product_id, views)| TopProduct {
            product_id: product_id.to_owned(),
            views,
        })
        .collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views).then(a.product_id.cmp(&b.product_id)));
    ranked.truncate(10);
    ranked
}

fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)] // Event counts stay far below f64 precision
        let ratio = numerator as f64 / denominator as f64;
        ratio * 100.0
    }
}

fn average_session_duration(events: &[AnalyticsEvent]) -> f64 {
    let mut sessions: HashMap<&SessionId, (DateTime<Utc>, DateTime<Utc>, usize)> = HashMap::new();
    for event in events {
        sessions
            .entry(&event.session_id)
            .and_modify(|(first, last, count)| {
                *first = (*first).min(event.timestamp);
                *last = (*last).max(event.timestamp);
                *count += 1;
            })
            .or_insert((event.timestamp, event.timestamp, 1));
    }
    let durations: Vec<i64> = sessions
        .values()
        .filter(|(_, _, count)| *count >= 2)
        .map(|(first, last, _)| (*last - *first).num_milliseconds())
        .collect();
    if durations.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)] // Durations stay far below f64 precision
        let mean = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
        mean
    }
}

fn average_view_duration(events: &[AnalyticsEvent]) -> f64 {
    let durations: Vec<f64> = events
        .iter()
        .filter(|e| e.event_type == "view_product")
        .filter_map(|e| e.properties.get("duration").and_then(Value::as_f64))
        .collect();
    if durations.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)] // Event counts stay far below f64 precision
        let mean = durations.iter().sum::<f64>() / durations.len() as f64;
        mean
    }
}

/// View counts bucketed by hour of day (0..=23).
fn views_by_hour(events: &[AnalyticsEvent]) -> Vec<HourlyViews> {
    (0..24)
        .map(|hour| HourlyViews {
            hour,
            views: events
                .iter()
                .filter(|e| e.event_type == "view_product")
                .filter(|e| e.timestamp.hour() == hour)
                .count(),
        })
        .collect()
}
