//! Recommendation Engine - book-grounded, prioritized advice
//!
//! Every rule is evaluated independently; all that match produce a
//! recommendation. Results are grouped into four buckets:
//!
//! - **urgent** - high priority saving or behavior advice
//! - **important** - any other high priority advice
//! - **suggested** - medium priority advice
//! - **educational** - low priority advice
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prosper_core::recommend::RecommendationEngine;
//!
//! let engine = RecommendationEngine::new(&rules);
//! let recs = engine.generate(&txs, &profile, Some(&goals), now);
//! for rec in &recs.urgent {
//!     println!("{}", rec.title);
//! }
//! ```

pub mod engine;
pub mod types;

pub use engine::{categorize, RecommendationEngine};
pub use types::{
    Bucket, Difficulty, PersonalizedRecommendations, Recommendation, RecommendationCategory,
};
