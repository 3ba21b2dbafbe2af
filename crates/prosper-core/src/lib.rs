//! Prosper Core Library
//!
//! Rule-based financial coaching grounded in three books:
//! - Asset/liability classification of transactions
//! - Scorers for Rich Dad Poor Dad, The Psychology of Money and
//!   The Richest Man in Babylon
//! - Prioritized, book-referenced recommendations
//! - Monthly statistics, debt progress and daily tips
//! - A data source trait with a JSON/YAML snapshot implementation
//! - CSV transaction import

pub mod advisor;
pub mod analysis;
pub mod context;
pub mod error;
pub mod import;
pub mod models;
pub mod recommend;
pub mod rules;
pub mod source;

/// Fixture builders with a fixed clock
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::Advisor;
pub use analysis::{
    daily_tip, filter_by_period, personalized_tips, validate_inputs, AnalysisReport, Analyzer,
    Classifier, DailyTip, DebtProgress, MonthlyStats, Scorecard,
};
pub use context::ChatContext;
pub use error::{Error, Result};
pub use models::{
    BookReference, Classification, DateRange, EmotionalState, FinancialGoal, GoalStatus, Period,
    Priority, Transaction, TransactionType, UserFinancialProfile,
};
pub use recommend::{
    PersonalizedRecommendations, Recommendation, RecommendationCategory, RecommendationEngine,
};
pub use rules::Rules;
pub use source::{FinanceSource, Snapshot, SnapshotFormat, SnapshotSource, UserRecord};
