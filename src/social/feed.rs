//! Feed Ranking Engine
//!
//! Filters feed items by content type and orders them by one of three
//! strategies:
//!
//! - **recent**: newest first by `created_at`
//! - **popular**: highest `like_count + comment_count` first
//! - **relevant**: highest blended score first, where
//!   `score = engagement_weight * (likes + comments) + age_weight * age_ms`
//!
//! With the default weights (0.7 / 0.3) the age term carries a positive sign,
//! so at equal engagement an older item outranks a newer one.
//!
//! All orderings use a stable sort: ties keep their input order.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::time::Duration;
use tracing::debug;

use super::metrics::PerformanceTimer;
use super::models::{FeedFilter, FeedItem, SortBy};

/// Weights for the `relevant` blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceWeights {
    pub engagement: f64,
    pub age: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            engagement: 0.7,
            age: 0.3,
        }
    }
}

/// Stateless feed ranker
#[derive(Debug, Clone)]
pub struct FeedRanker {
    weights: RelevanceWeights,
    slow_threshold: Duration,
}

impl Default for FeedRanker {
    fn default() -> Self {
        Self {
            weights: RelevanceWeights::default(),
            slow_threshold: Duration::from_millis(50),
        }
    }
}

impl FeedRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: RelevanceWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    pub fn weights(&self) -> RelevanceWeights {
        self.weights
    }

    /// Filter and order `items`, measuring age against the current time
    pub fn apply_filter(&self, items: &[FeedItem], filter: &FeedFilter) -> Vec<FeedItem> {
        self.apply_filter_at(items, filter, Utc::now())
    }

    /// Same as [`FeedRanker::apply_filter`] with an explicit reference time
    pub fn apply_filter_at(
        &self,
        items: &[FeedItem],
        filter: &FeedFilter,
        now: DateTime<Utc>,
    ) -> Vec<FeedItem> {
        let _timer = PerformanceTimer::new("apply_filter").with_slow_threshold(self.slow_threshold);

        let mut retained: Vec<FeedItem> = items
            .iter()
            .filter(|item| {
                filter.content_types.is_empty() || filter.content_types.contains(&item.content_type)
            })
            .cloned()
            .collect();

        match filter.sort_by {
            SortBy::Recent => retained.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Popular => retained.sort_by(|a, b| b.engagement().cmp(&a.engagement())),
            SortBy::Relevant => {
                let mut scored: Vec<(FeedItem, f64)> = retained
                    .into_iter()
                    .map(|item| {
                        let score = relevance_score(&item, now, &self.weights);
                        (item, score)
                    })
                    .collect();
                scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
                retained = scored.into_iter().map(|(item, _)| item).collect();
            }
        }

        debug!(
            "Ranked {} of {} feed items by {}",
            retained.len(),
            items.len(),
            filter.sort_by
        );

        retained
    }
}

/// Blended engagement/age score used by `relevant` ordering
pub fn relevance_score(item: &FeedItem, now: DateTime<Utc>, weights: &RelevanceWeights) -> f64 {
    let age_ms = (now - item.created_at).num_milliseconds() as f64;
    weights.engagement * item.engagement() as f64 + weights.age * age_ms
}

/// Filter and order feed items with the default weights
pub fn apply_filter(items: &[FeedItem], filter: &FeedFilter) -> Vec<FeedItem> {
    FeedRanker::default().apply_filter(items, filter)
}
