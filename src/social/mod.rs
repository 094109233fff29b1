//! Social Module
//!
//! Pure, synchronous building blocks for the SoulGraph community features.
//! Nothing here performs I/O or keeps state between calls: the API layer
//! loads records, passes them through these functions and persists the
//! returned values.
//!
//! ## Components
//!
//! 1. **Factories** - Build posts, likes, comments, threads, messages, follows,
//!    notifications, profiles and users with fresh ids and timestamps
//! 2. **Validation** - Content length and shape predicates
//! 3. **Updaters** - Copy-on-write transforms (follow stats, reactions, read
//!    receipts, badges, interests, profile merges)
//! 4. **Relationships** - Follow/unfollow over two users plus notification gating
//! 5. **Feed** - Content-type filtering and recent/popular/relevant ordering
//! 6. **Relevance** - Profile compatibility scoring and connection suggestions

pub mod factories;
pub mod feed;
pub mod metrics;
pub mod models;
pub mod relationships;
pub mod relevance;
pub mod updaters;
pub mod validation;

// Re-export the types that are actually used externally
pub use feed::{apply_filter, FeedRanker, RelevanceWeights};
pub use models::*;
pub use relevance::{score, suggest_connections, Suggestion};
