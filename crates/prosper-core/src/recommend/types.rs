//! Core types for the recommendation engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{BookReference, Priority};

/// What area of the user's finances a recommendation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Spending,
    Saving,
    Investing,
    Education,
    Behavior,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Spending => "spending",
            RecommendationCategory::Saving => "saving",
            RecommendationCategory::Investing => "investing",
            RecommendationCategory::Education => "education",
            RecommendationCategory::Behavior => "behavior",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecommendationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spending" => Ok(RecommendationCategory::Spending),
            "saving" => Ok(RecommendationCategory::Saving),
            "investing" => Ok(RecommendationCategory::Investing),
            "education" => Ok(RecommendationCategory::Education),
            "behavior" => Ok(RecommendationCategory::Behavior),
            _ => Err(format!("Unknown recommendation category: {}", s)),
        }
    }
}

/// How hard the action steps are to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single piece of advice with concrete steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable identifier, e.g. `babilonia_ten_percent_rule` or
    /// `goal_adjustment_{goal_id}`
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub book_reference: BookReference,
    pub action_steps: Vec<String>,
    pub expected_impact: String,
    pub timeframe: String,
    pub difficulty: Difficulty,
}

/// Which output bucket a recommendation lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Urgent,
    Important,
    Suggested,
    Educational,
}

impl Bucket {
    /// First matching rule wins:
    /// 1. high priority saving/behavior -> urgent
    /// 2. any other high priority -> important
    /// 3. medium -> suggested
    /// 4. low, or education -> educational
    pub fn for_recommendation(rec: &Recommendation) -> Self {
        let saving_or_behavior = matches!(
            rec.category,
            RecommendationCategory::Saving | RecommendationCategory::Behavior
        );

        match rec.priority {
            Priority::High if saving_or_behavior => Bucket::Urgent,
            Priority::High => Bucket::Important,
            Priority::Medium => Bucket::Suggested,
            Priority::Low => Bucket::Educational,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Urgent => "urgent",
            Bucket::Important => "important",
            Bucket::Suggested => "suggested",
            Bucket::Educational => "educational",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommendations grouped by urgency, each list in generation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedRecommendations {
    pub urgent: Vec<Recommendation>,
    pub important: Vec<Recommendation>,
    pub suggested: Vec<Recommendation>,
    pub educational: Vec<Recommendation>,
}

impl PersonalizedRecommendations {
    pub fn push(&mut self, rec: Recommendation) {
        match Bucket::for_recommendation(&rec) {
            Bucket::Urgent => self.urgent.push(rec),
            Bucket::Important => self.important.push(rec),
            Bucket::Suggested => self.suggested.push(rec),
            Bucket::Educational => self.educational.push(rec),
        }
    }

    /// Buckets in display order, paired with their names
    pub fn buckets(&self) -> [(Bucket, &[Recommendation]); 4] {
        [
            (Bucket::Urgent, self.urgent.as_slice()),
            (Bucket::Important, self.important.as_slice()),
            (Bucket::Suggested, self.suggested.as_slice()),
            (Bucket::Educational, self.educational.as_slice()),
        ]
    }

    /// Every recommendation, most urgent first
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.urgent
            .iter()
            .chain(&self.important)
            .chain(&self.suggested)
            .chain(&self.educational)
    }

    /// The single most pressing recommendation, if any
    pub fn top(&self) -> Option<&Recommendation> {
        self.iter().next()
    }

    pub fn len(&self) -> usize {
        self.urgent.len() + self.important.len() + self.suggested.len() + self.educational.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
