//! Asset / liability classifier
//!
//! Labels a transaction as wealth-building (asset), wealth-draining
//! (liability) or neutral. The checks run in a fixed precedence order and the
//! first one that matches wins:
//! 1. Asset keyword in the description
//! 2. Liability keyword in the description
//! 3. Asset category
//! 4. Liability category
//! 5. Amount above a share of monthly income (liability)
//! 6. Neutral

use serde::{Deserialize, Serialize};

use crate::models::{Classification, Transaction, UserFinancialProfile};
use crate::rules::{contains_any, in_category, ClassifierRules, Rules};

/// Which rule decided a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationReason {
    AssetKeyword,
    LiabilityKeyword,
    AssetCategory,
    LiabilityCategory,
    LargePurchase,
    NoMatch,
    /// Classification was already stored on the transaction
    Stored,
}

impl ClassificationReason {
    pub fn classification(&self) -> Option<Classification> {
        match self {
            Self::AssetKeyword | Self::AssetCategory => Some(Classification::Asset),
            Self::LiabilityKeyword | Self::LiabilityCategory | Self::LargePurchase => {
                Some(Classification::Liability)
            }
            Self::NoMatch => Some(Classification::Neutral),
            Self::Stored => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetKeyword => "asset keyword",
            Self::LiabilityKeyword => "liability keyword",
            Self::AssetCategory => "asset category",
            Self::LiabilityCategory => "liability category",
            Self::LargePurchase => "large purchase",
            Self::NoMatch => "no match",
            Self::Stored => "stored",
        }
    }
}

pub struct Classifier<'a> {
    rules: &'a ClassifierRules,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            rules: &rules.classifier,
        }
    }

    /// Classify from keywords, category and amount, ignoring any stored label
    pub fn classify(&self, tx: &Transaction, profile: &UserFinancialProfile) -> Classification {
        self.reason(tx, profile)
            .classification()
            .unwrap_or(Classification::Neutral)
    }

    /// The rule that decides the classification of `tx`
    pub fn reason(&self, tx: &Transaction, profile: &UserFinancialProfile) -> ClassificationReason {
        let rules = self.rules;
        let large_purchase = profile.monthly_income * rules.large_purchase_income_share;

        if contains_any(&tx.description, &rules.asset_keywords) {
            return ClassificationReason::AssetKeyword;
        }
        if contains_any(&tx.description, &rules.liability_keywords) {
            return ClassificationReason::LiabilityKeyword;
        }
        if in_category(&tx.category, &rules.asset_categories) {
            return ClassificationReason::AssetCategory;
        }
        if in_category(&tx.category, &rules.liability_categories) {
            return ClassificationReason::LiabilityCategory;
        }
        if tx.amount > large_purchase {
            return ClassificationReason::LargePurchase;
        }
        ClassificationReason::NoMatch
    }

    /// Stored classification when present, otherwise the rule result
    pub fn effective(&self, tx: &Transaction, profile: &UserFinancialProfile) -> Classification {
        tx.classification
            .unwrap_or_else(|| self.classify(tx, profile))
    }

    /// Like [`Classifier::reason`], but reports `Stored` for pre-labelled transactions
    pub fn effective_reason(
        &self,
        tx: &Transaction,
        profile: &UserFinancialProfile,
    ) -> ClassificationReason {
        if tx.classification.is_some() {
            ClassificationReason::Stored
        } else {
            self.reason(tx, profile)
        }
    }

    /// Overwrite the stored classification on every transaction
    pub fn apply(&self, transactions: &mut [Transaction], profile: &UserFinancialProfile) {
        for tx in transactions.iter_mut() {
            tx.classification = Some(self.classify(tx, profile));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, profile};

    #[test]
    fn test_asset_keyword_beats_liability_category() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let tx = expense(50.0, "luxury", "Livro de investimentos");

        assert_eq!(
            classifier.reason(&tx, &profile(5000.0)),
            ClassificationReason::AssetKeyword
        );
        assert_eq!(classifier.classify(&tx, &profile(5000.0)), Classification::Asset);
    }

    #[test]
    fn test_liability_keyword_beats_asset_category() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let tx = expense(300.0, "education", "Parcela do CARTÃO");

        assert_eq!(
            classifier.reason(&tx, &profile(5000.0)),
            ClassificationReason::LiabilityKeyword
        );
    }

    #[test]
    fn test_asset_keyword_inside_liability_word() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        // "prestação" contains the asset keyword "ação", which is checked first
        let tx = expense(300.0, "debt", "prestação do carro");

        assert_eq!(classifier.classify(&tx, &profile(5000.0)), Classification::Asset);
    }

    #[test]
    fn test_category_rules() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let p = profile(5000.0);

        assert_eq!(
            classifier.classify(&expense(10.0, "real_estate", "down payment"), &p),
            Classification::Asset
        );
        assert_eq!(
            classifier.classify(&expense(10.0, "entertainment", "cinema night"), &p),
            Classification::Liability
        );
    }

    #[test]
    fn test_large_purchase_threshold_is_strict() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let p = profile(1000.0);

        // 15% of 1000 = 150
        assert_eq!(
            classifier.classify(&expense(150.0, "groceries", "supermarket run"), &p),
            Classification::Neutral
        );
        assert_eq!(
            classifier.reason(&expense(150.01, "groceries", "supermarket run"), &p),
            ClassificationReason::LargePurchase
        );
    }

    #[test]
    fn test_empty_description_does_not_match_keywords() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let tx = expense(20.0, "food", "");

        assert_eq!(
            classifier.reason(&tx, &profile(5000.0)),
            ClassificationReason::NoMatch
        );
    }

    #[test]
    fn test_effective_prefers_stored_label() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let mut tx = expense(20.0, "luxury", "watch");
        tx.classification = Some(Classification::Asset);

        assert_eq!(classifier.effective(&tx, &profile(5000.0)), Classification::Asset);
        assert_eq!(classifier.classify(&tx, &profile(5000.0)), Classification::Liability);
    }

    #[test]
    fn test_apply_overwrites_labels() {
        let rules = Rules::default();
        let classifier = Classifier::new(&rules);
        let mut txs = vec![expense(20.0, "luxury", "watch")];
        txs[0].classification = Some(Classification::Asset);

        classifier.apply(&mut txs, &profile(5000.0));
        assert_eq!(txs[0].classification, Some(Classification::Liability));
    }
}
