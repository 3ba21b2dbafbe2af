//! Advisor - fetches a user's data from a source and runs the engines
//!
//! Data from a [`FinanceSource`] is validated before any scoring, so callers
//! get `Error::InvalidData` instead of a misleading report.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::analysis::{daily_tip, validate_inputs, AnalysisReport, Analyzer, Scorecard};
use crate::context::ChatContext;
use crate::error::{Error, Result};
use crate::models::{DateRange, FinancialGoal, Period, Transaction, UserFinancialProfile};
use crate::recommend::{PersonalizedRecommendations, Recommendation, RecommendationEngine};
use crate::rules::Rules;
use crate::source::FinanceSource;

/// A user's validated data
struct UserData {
    profile: UserFinancialProfile,
    transactions: Vec<Transaction>,
    goals: Vec<FinancialGoal>,
}

pub struct Advisor<'a, S: FinanceSource> {
    source: &'a S,
    rules: &'a Rules,
}

impl<'a, S: FinanceSource> Advisor<'a, S> {
    pub fn new(source: &'a S, rules: &'a Rules) -> Self {
        Self { source, rules }
    }

    async fn fetch(&self, user_id: &str, range: Option<DateRange>) -> Result<UserData> {
        let profile = self.source.get_profile(user_id).await?;
        let transactions = self.source.list_transactions(user_id, range).await?;
        let goals = self.source.list_goals(user_id).await?;

        validate_inputs(&transactions, &profile, &goals)?;
        debug!(
            user = user_id,
            transactions = transactions.len(),
            goals = goals.len(),
            "Fetched user data"
        );

        Ok(UserData {
            profile,
            transactions,
            goals,
        })
    }

    /// Period report for one user
    pub async fn analyze(
        &self,
        user_id: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<AnalysisReport> {
        let data = self
            .fetch(user_id, Some(DateRange::since(period.start(now))))
            .await?;
        Ok(Analyzer::new(self.rules).generate_complete_analysis(
            &data.transactions,
            &data.profile,
            period,
            now,
        ))
    }

    /// Every scorer result over all of the user's transactions
    pub async fn scorecard(&self, user_id: &str) -> Result<Scorecard> {
        let data = self.fetch(user_id, None).await?;
        Ok(Analyzer::new(self.rules).scorecard(&data.transactions, &data.profile))
    }

    /// Recommendations over all of the user's transactions and goals
    pub async fn recommend(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PersonalizedRecommendations> {
        let data = self.fetch(user_id, None).await?;
        Ok(RecommendationEngine::new(self.rules).generate(
            &data.transactions,
            &data.profile,
            Some(&data.goals),
            now,
        ))
    }

    /// Advice for a single stored transaction
    pub async fn review_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Recommendation>> {
        let data = self.fetch(user_id, None).await?;
        let tx = data
            .transactions
            .iter()
            .find(|tx| tx.id == transaction_id)
            .ok_or_else(|| Error::NotFound(format!("transaction '{}'", transaction_id)))?;

        Ok(RecommendationEngine::new(self.rules).transaction_recommendation(tx, &data.profile))
    }

    /// Report, recommendations and today's tip, ready for a chat prompt
    pub async fn chat_context(
        &self,
        user_id: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<ChatContext> {
        let report = self.analyze(user_id, period, now).await?;
        let recommendations = self.recommend(user_id, now).await?;
        Ok(ChatContext::new(report, recommendations).with_daily_tip(daily_tip(now.date_naive())))
    }
}
