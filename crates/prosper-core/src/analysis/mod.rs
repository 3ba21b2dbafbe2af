//! Analysis Engine - rule-based financial scoring
//!
//! Scores a set of transactions against the teachings of three books. All
//! scorers are pure functions over a read-only transaction slice, the user
//! profile and the loaded [`Rules`](crate::rules::Rules).
//!
//! ## Scorers
//!
//! - **Classifier** - asset / liability / neutral label per transaction
//! - **Rich Dad Poor Dad** - asset/liability ratio, education spending
//! - **The Psychology of Money** - emotional spending, impulsive purchases,
//!   weekly consistency
//! - **The Richest Man in Babylon** - ten-percent rule, discipline, wealth
//!   protection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prosper_core::analysis::Analyzer;
//! use prosper_core::{Period, Rules};
//!
//! let rules = Rules::default();
//! let analyzer = Analyzer::new(&rules);
//! let report = analyzer.generate_complete_analysis(&txs, &profile, Period::Monthly, now);
//! ```

pub mod babylon;
pub mod classifier;
pub mod engine;
pub mod psychology;
pub mod rich_dad;
pub mod stats;
pub mod tips;
pub mod types;

pub use babylon::Babylon;
pub use classifier::{ClassificationReason, Classifier};
pub use engine::{filter_by_period, validate_inputs, Analyzer};
pub use psychology::{week_key, Psychology};
pub use rich_dad::RichDad;
pub use stats::{DebtProgress, MonthlyStats};
pub use tips::{daily_tip, personalized_tips, DailyTip};
pub use types::{
    AnalysisReport, AssetLiabilityRatio, Consistency, ConsistencyTier, Discipline,
    DisciplineTier, EducationSpending, EducationTier, EmotionalSpending, EmotionalTier,
    FinancialTrend, ImpulseTier, ImpulsiveBehavior, RatioTier, RiskLevel, SavingsTier, Scorecard,
    TenPercentRule, TrendDirection, WealthProtection,
};

use crate::models::Transaction;

fn expenses(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|tx| tx.is_expense())
}

fn total_expenses(transactions: &[Transaction]) -> f64 {
    expenses(transactions).map(|tx| tx.amount).sum()
}

fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.is_income())
        .map(|tx| tx.amount)
        .sum()
}

/// `part / whole * 100`, or 0 when `whole` is not positive
fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
