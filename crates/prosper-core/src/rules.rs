//! Rule tables for the analysis engine
//!
//! Keyword lists, category lists and thresholds used by the classifier, the
//! three book scorers and the recommendation engine. Rules are resolved once
//! at startup with a two-layer lookup:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/prosper/config/rules.toml)
//! 2. Built-in defaults (the `Default` impls below)
//!
//! Every section is `#[serde(default)]`, so an override file only needs the
//! keys it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::EmotionalState;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Case-insensitive substring match of any keyword against `text`
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && text.contains(&keyword.to_lowercase()))
}

/// Exact category membership
pub fn in_category(category: &str, categories: &[String]) -> bool {
    categories.iter().any(|c| c == category)
}

/// Asset/liability classifier tables (Rich Dad Poor Dad)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub asset_keywords: Vec<String>,
    pub liability_keywords: Vec<String>,
    pub asset_categories: Vec<String>,
    pub liability_categories: Vec<String>,
    /// Share of monthly income above which an unmatched purchase is a liability
    pub large_purchase_income_share: f64,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            asset_keywords: strings(&[
                "investimento",
                "curso",
                "livro",
                "ação",
                "fundo",
                "imóvel",
                "negócio",
            ]),
            liability_keywords: strings(&["financiamento", "prestação", "cartão", "empréstimo"]),
            asset_categories: strings(&["investment", "education", "business", "real_estate"]),
            liability_categories: strings(&["luxury", "entertainment", "debt", "unnecessary"]),
            large_purchase_income_share: 0.15,
        }
    }
}

/// Financial education spending tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRules {
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for EducationRules {
    fn default() -> Self {
        Self {
            categories: strings(&["education", "books", "courses"]),
            keywords: strings(&["curso", "livro", "educação", "treinamento", "workshop"]),
        }
    }
}

/// Emotional spending tables (The Psychology of Money)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionalRules {
    pub states: Vec<EmotionalState>,
}

impl Default for EmotionalRules {
    fn default() -> Self {
        Self {
            states: vec![
                EmotionalState::Stressed,
                EmotionalState::Sad,
                EmotionalState::Excited,
                EmotionalState::Anxious,
            ],
        }
    }
}

/// Impulsive purchase detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulsiveRules {
    pub states: Vec<EmotionalState>,
    /// Amounts strictly above this are high-value
    pub amount_threshold: f64,
    /// Descriptions strictly shorter than this (in characters) are vague
    pub min_description_length: usize,
}

impl Default for ImpulsiveRules {
    fn default() -> Self {
        Self {
            states: vec![
                EmotionalState::Excited,
                EmotionalState::Stressed,
                EmotionalState::Anxious,
            ],
            amount_threshold: 200.0,
            min_description_length: 10,
        }
    }
}

/// Discipline scoring tables (The Richest Man in Babylon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisciplineRules {
    pub unnecessary_categories: Vec<String>,
    pub investment_categories: Vec<String>,
    /// Bonus points per percent of spending that went to investment categories
    pub investment_bonus_weight: f64,
}

impl Default for DisciplineRules {
    fn default() -> Self {
        Self {
            unnecessary_categories: strings(&["luxury", "entertainment", "impulse"]),
            investment_categories: strings(&["investment", "education", "business"]),
            investment_bonus_weight: 0.5,
        }
    }
}

/// Wealth protection (speculation exposure) tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRules {
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self {
            categories: strings(&["gambling", "speculation", "high_risk_investment"]),
            keywords: strings(&["aposta", "jogo", "especulação", "day trade"]),
        }
    }
}

/// Thresholds that trigger recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRules {
    /// Education spending below this share of monthly income triggers advice
    pub education_income_share: f64,
    /// Emotional spending above this share of monthly income triggers advice
    pub emotional_income_share: f64,
    pub min_consistency_score: f64,
    pub min_discipline_score: f64,
    /// Goals needing more than this share of monthly income per month
    pub goal_income_share: f64,
    /// Single expenses above this share of monthly income get reviewed
    pub transaction_income_share: f64,
    pub transaction_emotional_states: Vec<EmotionalState>,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            education_income_share: 0.03,
            emotional_income_share: 0.20,
            min_consistency_score: 70.0,
            min_discipline_score: 80.0,
            goal_income_share: 0.30,
            transaction_income_share: 0.10,
            transaction_emotional_states: vec![
                EmotionalState::Excited,
                EmotionalState::Stressed,
                EmotionalState::Sad,
            ],
        }
    }
}

/// Monthly statistics and debt tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsRules {
    pub debt_payment_categories: Vec<String>,
}

impl Default for StatsRules {
    fn default() -> Self {
        Self {
            debt_payment_categories: strings(&["debt_payment", "Pagamento de Dívida"]),
        }
    }
}

/// All rule tables used by the engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub classifier: ClassifierRules,
    pub education: EducationRules,
    pub emotional: EmotionalRules,
    pub impulsive: ImpulsiveRules,
    pub discipline: DisciplineRules,
    pub risk: RiskRules,
    pub recommendations: RecommendationRules,
    pub stats: StatsRules,
}

impl Rules {
    /// Resolve rules: explicit path, then data dir override, then defaults
    ///
    /// An explicit path that does not exist is an error; a missing data dir
    /// override silently falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::NotFound(format!(
                    "rules file {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match default_rules_path() {
            Some(default_path) if default_path.exists() => Self::from_file(&default_path),
            _ => {
                debug!("Using built-in rule tables");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let rules = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded rule overrides");
        Ok(rules)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: Rules = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Check numeric thresholds are usable
    pub fn validate(&self) -> Result<()> {
        let shares = [
            (
                "classifier.large_purchase_income_share",
                self.classifier.large_purchase_income_share,
            ),
            (
                "recommendations.education_income_share",
                self.recommendations.education_income_share,
            ),
            (
                "recommendations.emotional_income_share",
                self.recommendations.emotional_income_share,
            ),
            (
                "recommendations.goal_income_share",
                self.recommendations.goal_income_share,
            ),
            (
                "recommendations.transaction_income_share",
                self.recommendations.transaction_income_share,
            ),
            (
                "discipline.investment_bonus_weight",
                self.discipline.investment_bonus_weight,
            ),
            ("impulsive.amount_threshold", self.impulsive.amount_threshold),
        ];
        for (name, value) in shares {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            (
                "recommendations.min_consistency_score",
                self.recommendations.min_consistency_score,
            ),
            (
                "recommendations.min_discipline_score",
                self.recommendations.min_discipline_score,
            ),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Default rules override path
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("prosper").join("config").join("rules.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_rules_file_matches_defaults() {
        let shipped = include_str!("../../../config/rules.toml");
        let rules = Rules::from_toml_str(shipped).unwrap();
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let rules = Rules::from_toml_str(
            r#"
            [impulsive]
            amount_threshold = 500.0
            "#,
        )
        .unwrap();

        assert_eq!(rules.impulsive.amount_threshold, 500.0);
        assert_eq!(rules.impulsive.min_description_length, 10);
        assert_eq!(rules.classifier, ClassifierRules::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let result = Rules::from_toml_str(
            r#"
            [recommendations]
            min_discipline_score = 140.0
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Rules::load(Some(Path::new("/nonexistent/prosper/rules.toml")));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        fs::write(&path, "[risk]\nkeywords = [\"cassino\"]\n").unwrap();

        let rules = Rules::load(Some(&path)).unwrap();
        assert_eq!(rules.risk.keywords, vec!["cassino".to_string()]);
        assert_eq!(rules.risk.categories, RiskRules::default().categories);
    }

    #[test]
    fn test_contains_any_is_case_insensitive() {
        let keywords = strings(&["curso", "ação"]);
        assert!(contains_any("CURSO de Rust", &keywords));
        assert!(contains_any("Compra de AÇÃO", &keywords));
        assert!(!contains_any("mercado", &keywords));
        assert!(!contains_any("", &keywords));
    }
}
