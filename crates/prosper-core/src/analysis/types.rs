//! Result types for the analysis engine

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{EmotionalState, Period};

/// Asset-to-liability ratio tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioTier {
    TooManyLiabilities,
    Improving,
    Good,
}

impl RatioTier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            Self::TooManyLiabilities
        } else if ratio < 1.0 {
            Self::Improving
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooManyLiabilities => "too_many_liabilities",
            Self::Improving => "improving",
            Self::Good => "good",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::TooManyLiabilities => {
                "You are buying too many liabilities! Focus on acquiring assets that generate income."
            }
            Self::Improving => {
                "Good progress! Keep raising the share of assets relative to liabilities."
            }
            Self::Good => {
                "Excellent! You are putting assets before liabilities, just as Rich Dad teaches."
            }
        }
    }
}

/// Result of the asset/liability ratio scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLiabilityRatio {
    pub assets_total: f64,
    pub liabilities_total: f64,
    /// `+inf` when there are assets but no liabilities, `0` when both are zero
    pub ratio: f64,
    pub tier: RatioTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationTier {
    Low,
    Medium,
    Good,
}

impl EducationTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 1.0 {
            Self::Low
        } else if percentage < 3.0 {
            Self::Medium
        } else {
            Self::Good
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Invest more in financial education! Rich Dad calls it the best investment.",
            Self::Medium => {
                "Good investment in education! Keep learning to grow your financial intelligence."
            }
            Self::Good => "Excellent! You understand that education is your most important asset.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationSpending {
    pub education_spending: f64,
    /// Share of total expense spending, 0-100
    pub percentage: f64,
    pub tier: EducationTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalTier {
    HighConcern,
    Moderate,
    Fine,
}

impl EmotionalTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 30.0 {
            Self::HighConcern
        } else if percentage >= 15.0 {
            Self::Moderate
        } else {
            Self::Fine
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::HighConcern => {
                "Careful! Lots of emotional spending. Take a 24-hour pause before purchases."
            }
            Self::Moderate => "Some emotional spending detected. Practice mindfulness before buying.",
            Self::Fine => "Good emotional control over your spending! Keep it up.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalSpending {
    pub emotional_spending: f64,
    pub percentage: f64,
    /// Summed amount per emotional state
    pub patterns: BTreeMap<EmotionalState, f64>,
    pub tier: EmotionalTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseTier {
    StrongPattern,
    Some,
    Fine,
}

impl ImpulseTier {
    pub fn from_count(count: usize) -> Self {
        if count > 5 {
            Self::StrongPattern
        } else if count >= 2 {
            Self::Some
        } else {
            Self::Fine
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::StrongPattern => {
                "Impulsive pattern detected! Keep a wish list and wait 24 hours before buying."
            }
            Self::Some => "Some impulsive purchases. Ask yourself \"Do I really need this?\" first.",
            Self::Fine => "Good impulse control! You think before you spend.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpulsiveBehavior {
    pub impulsive_count: usize,
    pub impulsive_amount: f64,
    pub tier: ImpulseTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyTier {
    /// Fewer than two weekly buckets; the score is a placeholder 100
    InsufficientData,
    Excellent,
    Good,
    Erratic,
}

impl ConsistencyTier {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            Self::Excellent
        } else if score > 60.0 {
            Self::Good
        } else {
            Self::Erratic
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::InsufficientData => "Not enough data to analyze spending consistency.",
            Self::Excellent => "Excellent spending consistency! You have good financial control.",
            Self::Good => "Good consistency. Try to keep a steadier spending pattern.",
            Self::Erratic => "Spending varies a lot. Build a monthly budget and stick to it.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consistency {
    /// 0-100; exactly 100 when fewer than two weekly buckets exist
    pub consistency_score: f64,
    pub weekly_buckets: usize,
    pub tier: ConsistencyTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsTier {
    Urgent,
    GettingThere,
    Good,
    Excellent,
}

impl SavingsTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate < 5.0 {
            Self::Urgent
        } else if rate < 10.0 {
            Self::GettingThere
        } else if rate < 20.0 {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Urgent => {
                "Urgent! You are not saving. Start by keeping at least 5% and raise it gradually."
            }
            Self::GettingThere => "You are saving, but not 10% yet. Keep increasing it!",
            Self::Good => "Congratulations! You follow the 10% rule. Consider raising it to 15-20%.",
            Self::Excellent => "Excellent! You are a true disciple of Babylon!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenPercentRule {
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings_amount: f64,
    /// Percentage of income kept; 0 when there is no income
    pub savings_rate: f64,
    pub is_following_rule: bool,
    pub tier: SavingsTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineTier {
    Excellent,
    Good,
    NeedsWork,
}

impl DisciplineTier {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            Self::Excellent
        } else if score > 60.0 {
            Self::Good
        } else {
            Self::NeedsWork
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent discipline! You have the self-control of Babylon's wise men.",
            Self::Good => "Good discipline. Keep focusing on essentials and skipping the unnecessary.",
            Self::NeedsWork => {
                "Work on your discipline. Remember: \"A part of all I earn is mine to keep\"."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    /// Clamped to 0-100
    pub discipline_score: f64,
    pub unnecessary_percentage: f64,
    pub investment_percentage: f64,
    pub tier: DisciplineTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 10.0 {
            Self::High
        } else if percentage >= 5.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::High => {
                "High risk! You are speculating too much. Protect your wealth with safe investments."
            }
            Self::Medium => "Moderate risk. Be careful and never risk more than you can lose.",
            Self::Low => "Good! You protect your wealth as Babylon teaches.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthProtection {
    pub risky_amount: f64,
    pub risk_percentage: f64,
    pub risk_level: RiskLevel,
}

/// Every scorer output for one transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub asset_liability: AssetLiabilityRatio,
    pub education: EducationSpending,
    pub emotional: EmotionalSpending,
    pub impulsive: ImpulsiveBehavior,
    pub consistency: Consistency,
    pub ten_percent: TenPercentRule,
    pub discipline: Discipline,
    pub wealth_protection: WealthProtection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTrend {
    pub category: String,
    pub direction: TrendDirection,
    pub percentage: f64,
    pub description: String,
}

/// Combined report for one analysis period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub period: Period,
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings_rate: f64,
    pub assets_purchased: f64,
    pub liabilities_purchased: f64,
    /// Mean of the discipline and consistency scores
    pub behavior_score: f64,
    /// Ratio, emotional and ten-percent advice, in that order
    pub recommendations: Vec<String>,
    pub trends: Vec<FinancialTrend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_tier_boundaries() {
        assert_eq!(RatioTier::from_ratio(0.0), RatioTier::TooManyLiabilities);
        assert_eq!(RatioTier::from_ratio(0.5), RatioTier::Improving);
        assert_eq!(RatioTier::from_ratio(0.99), RatioTier::Improving);
        assert_eq!(RatioTier::from_ratio(1.0), RatioTier::Good);
        assert_eq!(RatioTier::from_ratio(f64::INFINITY), RatioTier::Good);
    }

    #[test]
    fn test_savings_tier_boundaries() {
        assert_eq!(SavingsTier::from_rate(-20.0), SavingsTier::Urgent);
        assert_eq!(SavingsTier::from_rate(5.0), SavingsTier::GettingThere);
        assert_eq!(SavingsTier::from_rate(10.0), SavingsTier::Good);
        assert_eq!(SavingsTier::from_rate(20.0), SavingsTier::Excellent);
    }

    #[test]
    fn test_impulse_and_emotional_tiers() {
        assert_eq!(ImpulseTier::from_count(1), ImpulseTier::Fine);
        assert_eq!(ImpulseTier::from_count(2), ImpulseTier::Some);
        assert_eq!(ImpulseTier::from_count(5), ImpulseTier::Some);
        assert_eq!(ImpulseTier::from_count(6), ImpulseTier::StrongPattern);

        assert_eq!(EmotionalTier::from_percentage(14.9), EmotionalTier::Fine);
        assert_eq!(EmotionalTier::from_percentage(30.0), EmotionalTier::Moderate);
        assert_eq!(EmotionalTier::from_percentage(30.1), EmotionalTier::HighConcern);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_percentage(4.99), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(10.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_percentage(10.5), RiskLevel::High);
    }
}
