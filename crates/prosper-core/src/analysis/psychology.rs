//! The Psychology of Money scorers
//!
//! - Emotional spending: money spent while stressed, sad, excited or anxious
//! - Impulsive behavior: emotional purchases that are large or unplanned
//! - Consistency: how steady weekly spending is

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::models::Transaction;
use crate::rules::{EmotionalRules, ImpulsiveRules, Rules};

use super::types::{
    Consistency, ConsistencyTier, EmotionalSpending, EmotionalTier, ImpulseTier,
    ImpulsiveBehavior,
};
use super::{expenses, percentage, total_expenses};

/// Weekly bucket key: `{year}-W{ceil(day_of_month / 7)}`
///
/// This is a week-of-month bucket, not an ISO week: the same day of month in
/// different months of one year lands in the same bucket.
pub fn week_key(date: DateTime<Utc>) -> String {
    format!("{}-W{}", date.year(), date.day().div_ceil(7))
}

pub struct Psychology<'a> {
    emotional: &'a EmotionalRules,
    impulsive: &'a ImpulsiveRules,
}

impl<'a> Psychology<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            emotional: &rules.emotional,
            impulsive: &rules.impulsive,
        }
    }

    pub fn emotional_spending(&self, transactions: &[Transaction]) -> EmotionalSpending {
        let mut patterns: BTreeMap<_, f64> = BTreeMap::new();
        let mut emotional_spending = 0.0;

        let emotional = expenses(transactions)
            .filter(|tx| self.emotional.states.contains(&tx.emotional_state));
        for tx in emotional {
            emotional_spending += tx.amount;
            *patterns.entry(tx.emotional_state).or_insert(0.0) += tx.amount;
        }

        let percentage = percentage(emotional_spending, total_expenses(transactions));
        debug!(emotional_spending, percentage, "Emotional spending");

        EmotionalSpending {
            emotional_spending,
            percentage,
            patterns,
            tier: EmotionalTier::from_percentage(percentage),
        }
    }

    /// An expense is impulsive when made in a volatile mood and either
    /// expensive or described in very few characters
    pub fn is_impulsive(&self, tx: &Transaction) -> bool {
        let rules = self.impulsive;
        let volatile = rules.states.contains(&tx.emotional_state);
        let high_value = tx.amount > rules.amount_threshold;
        let vague = tx.description.chars().count() < rules.min_description_length;

        tx.is_expense() && volatile && (high_value || vague)
    }

    pub fn impulsive_behavior(&self, transactions: &[Transaction]) -> ImpulsiveBehavior {
        let (impulsive_count, impulsive_amount) = transactions
            .iter()
            .filter(|tx| self.is_impulsive(tx))
            .fold((0usize, 0.0), |(count, amount), tx| (count + 1, amount + tx.amount));

        ImpulsiveBehavior {
            impulsive_count,
            impulsive_amount,
            tier: ImpulseTier::from_count(impulsive_count),
        }
    }

    /// Score week-to-week spending variance, 100 meaning perfectly steady
    ///
    /// Uses the population standard deviation of weekly sums relative to their
    /// mean. With fewer than two buckets the score is 100 and the tier is
    /// `InsufficientData`.
    pub fn consistency(&self, transactions: &[Transaction]) -> Consistency {
        // Ordered buckets keep the float sums reproducible across calls
        let mut weekly: BTreeMap<String, f64> = BTreeMap::new();
        for tx in expenses(transactions) {
            *weekly.entry(week_key(tx.date)).or_insert(0.0) += tx.amount;
        }

        let weekly_buckets = weekly.len();
        if weekly_buckets < 2 {
            return Consistency {
                consistency_score: 100.0,
                weekly_buckets,
                tier: ConsistencyTier::InsufficientData,
            };
        }

        let values: Vec<f64> = weekly.into_values().collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let variation = if mean == 0.0 { 0.0 } else { std_dev / mean };
        let consistency_score = (100.0 - variation * 100.0).clamp(0.0, 100.0);

        debug!(weekly_buckets, mean, std_dev, consistency_score, "Spending consistency");

        Consistency {
            consistency_score,
            weekly_buckets,
            tier: ConsistencyTier::from_score(consistency_score),
        }
    }
}
