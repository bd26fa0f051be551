//! Business logic services.
//!
//! - [`analytics`] - In-memory interaction event log and aggregates
//! - [`personalization`] - Recommendation interface and its mock implementation

pub mod analytics;
pub mod personalization;

pub use analytics::AnalyticsService;
pub use personalization::{MockRecommender, Recommender};
