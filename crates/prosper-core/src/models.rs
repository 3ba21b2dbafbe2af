//! Domain models for Prosper

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Direction of money flow for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" | "credit" => Ok(Self::Income),
            "expense" | "despesa" | "debit" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wealth-building (asset) vs wealth-draining (liability) tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Asset,
    Liability,
    Neutral,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Neutral => "neutral",
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "neutral" => Ok(Self::Neutral),
            _ => Err(format!("Unknown classification: {}", s)),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the user felt when the transaction happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Happy,
    Sad,
    Stressed,
    #[default]
    Neutral,
    Excited,
    Anxious,
    Motivated,
    Satisfied,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
            Self::Neutral => "neutral",
            Self::Excited => "excited",
            Self::Anxious => "anxious",
            Self::Motivated => "motivated",
            Self::Satisfied => "satisfied",
        }
    }
}

impl std::str::FromStr for EmotionalState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "stressed" => Ok(Self::Stressed),
            "" | "neutral" => Ok(Self::Neutral),
            "excited" => Ok(Self::Excited),
            "anxious" => Ok(Self::Anxious),
            "motivated" => Ok(Self::Motivated),
            "satisfied" => Ok(Self::Satisfied),
            _ => Err(format!("Unknown emotional state: {}", s)),
        }
    }
}

impl std::fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    /// Always non-negative; direction comes from `transaction_type`
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    /// Stored classification; when absent the classifier decides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default)]
    pub emotional_state: EmotionalState,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Reject shapes the analysis engine cannot score meaningfully
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "transaction '{}' has invalid amount {}",
                self.label(),
                self.amount
            )));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        if self.id.is_empty() {
            &self.description
        } else {
            &self.id
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FinancialKnowledge {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorPattern {
    Impulsive,
    #[default]
    Analytical,
    Emotional,
}

/// Per-user financial profile supplied with every analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFinancialProfile {
    pub monthly_income: f64,
    #[serde(default)]
    pub savings_goal: f64,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub financial_knowledge: FinancialKnowledge,
    #[serde(default)]
    pub behavior_pattern: BehaviorPattern,
    /// Outstanding debt, used by debt progress tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_debt: Option<f64>,
}

impl UserFinancialProfile {
    pub fn new(monthly_income: f64) -> Self {
        Self {
            monthly_income,
            savings_goal: 0.0,
            risk_tolerance: RiskTolerance::default(),
            financial_knowledge: FinancialKnowledge::default(),
            behavior_pattern: BehaviorPattern::default(),
            current_debt: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.monthly_income.is_finite() || self.monthly_income <= 0.0 {
            return Err(Error::InvalidData(format!(
                "monthly income must be positive, got {}",
                self.monthly_income
            )));
        }
        if !self.savings_goal.is_finite() || self.savings_goal < 0.0 {
            return Err(Error::InvalidData(format!(
                "savings goal must be non-negative, got {}",
                self.savings_goal
            )));
        }
        if let Some(debt) = self.current_debt {
            if !debt.is_finite() || debt < 0.0 {
                return Err(Error::InvalidData(format!(
                    "current debt must be non-negative, got {}",
                    debt
                )));
            }
        }
        Ok(())
    }
}

/// Priority shared by goals and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

/// A savings target with a deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl FinancialGoal {
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Amount still missing to reach the target (never negative)
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "goal '{}' target must be positive, got {}",
                self.title, self.target_amount
            )));
        }
        if !self.current_amount.is_finite() || self.current_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "goal '{}' current amount must be non-negative, got {}",
                self.title, self.current_amount
            )));
        }
        Ok(())
    }
}

/// Analysis window, always anchored at "now" with no end boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Inclusive start boundary of this period relative to `now`
    ///
    /// Daily, monthly and yearly snap to UTC calendar boundaries; weekly is a
    /// trailing 7x24h window.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let midnight = |date: NaiveDate| Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
        let today = now.date_naive();
        match self {
            Self::Daily => midnight(today),
            Self::Weekly => now - Duration::days(7),
            Self::Monthly => midnight(today.with_day(1).unwrap_or(today)),
            Self::Yearly => midnight(today.with_ordinal(1).unwrap_or(today)),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(format!(
                "Unknown period: {}. Available: daily, weekly, monthly, yearly",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three books the advice is grounded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookReference {
    #[serde(rename = "pai_rico_pai_pobre")]
    PaiRico,
    #[serde(rename = "psicologia_financeira")]
    Psicologia,
    #[serde(rename = "homem_mais_rico_babilonia")]
    Babilonia,
}

impl BookReference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaiRico => "pai_rico_pai_pobre",
            Self::Psicologia => "psicologia_financeira",
            Self::Babilonia => "homem_mais_rico_babilonia",
        }
    }

    /// Title of the book as shown to users
    pub fn title(&self) -> &'static str {
        match self {
            Self::PaiRico => "Rich Dad Poor Dad",
            Self::Psicologia => "The Psychology of Money",
            Self::Babilonia => "The Richest Man in Babylon",
        }
    }

    pub fn all() -> &'static [BookReference] {
        &[Self::PaiRico, Self::Psicologia, Self::Babilonia]
    }
}

impl std::fmt::Display for BookReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open timestamp range used when listing transactions from a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Everything from `start` onwards, with no end boundary
    pub fn since(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && self.end.map_or(true, |end| at < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_period_start_boundaries() {
        let now = at(2026, 10, 17, 15);
        assert_eq!(Period::Daily.start(now), at(2026, 10, 17, 0));
        assert_eq!(Period::Weekly.start(now), at(2026, 10, 10, 15));
        assert_eq!(Period::Monthly.start(now), at(2026, 10, 1, 0));
        assert_eq!(Period::Yearly.start(now), at(2026, 1, 1, 0));
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!(Period::from_str("weekly").unwrap(), Period::Weekly);
        assert_eq!(Period::from_str("Year").unwrap(), Period::Yearly);
        assert!(Period::from_str("fortnightly").is_err());
    }

    #[test]
    fn test_transaction_validate_rejects_negative_amount() {
        let tx = Transaction {
            id: "t1".into(),
            amount: -5.0,
            transaction_type: TransactionType::Expense,
            category: "food".into(),
            description: "lunch".into(),
            date: at(2026, 1, 1, 0),
            classification: None,
            emotional_state: EmotionalState::Neutral,
            is_recurring: false,
        };
        assert!(matches!(tx.validate(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_profile_validate() {
        assert!(UserFinancialProfile::new(5000.0).validate().is_ok());
        assert!(UserFinancialProfile::new(0.0).validate().is_err());
        assert!(UserFinancialProfile::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_transaction_deserialize_defaults() {
        let tx: Transaction = serde_json::from_str(
            r#"{"amount": 120.5, "type": "income", "date": "2026-03-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(tx.is_income());
        assert_eq!(tx.emotional_state, EmotionalState::Neutral);
        assert_eq!(tx.classification, None);
        assert!(tx.description.is_empty());
    }

    #[test]
    fn test_book_reference_wire_names() {
        let json = serde_json::to_string(&BookReference::Babilonia).unwrap();
        assert_eq!(json, "\"homem_mais_rico_babilonia\"");
    }

    #[test]
    fn test_goal_remaining_never_negative() {
        let goal = FinancialGoal {
            id: "g".into(),
            title: "Trip".into(),
            target_amount: 100.0,
            current_amount: 150.0,
            deadline: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            status: GoalStatus::Active,
            priority: Priority::Low,
        };
        assert_eq!(goal.remaining(), 0.0);
    }
}
