//! Rich Dad Poor Dad scorers
//!
//! - Asset/liability ratio: how much of the spending builds wealth
//! - Financial education: how much of the spending goes to learning

use tracing::debug;

use crate::models::{Classification, Transaction, UserFinancialProfile};
use crate::rules::{contains_any, in_category, EducationRules, Rules};

use super::classifier::Classifier;
use super::types::{AssetLiabilityRatio, EducationSpending, EducationTier, RatioTier};
use super::{expenses, percentage, total_expenses};

pub struct RichDad<'a> {
    classifier: Classifier<'a>,
    education: &'a EducationRules,
}

impl<'a> RichDad<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            classifier: Classifier::new(rules),
            education: &rules.education,
        }
    }

    /// Sum asset and liability purchases and rate their ratio
    ///
    /// Stored classifications are honored; unlabelled expenses go through the
    /// classifier.
    pub fn asset_liability_ratio(
        &self,
        transactions: &[Transaction],
        profile: &UserFinancialProfile,
    ) -> AssetLiabilityRatio {
        let mut assets_total = 0.0;
        let mut liabilities_total = 0.0;

        for tx in expenses(transactions) {
            match self.classifier.effective(tx, profile) {
                Classification::Asset => assets_total += tx.amount,
                Classification::Liability => liabilities_total += tx.amount,
                Classification::Neutral => {}
            }
        }

        let ratio = if liabilities_total > 0.0 {
            assets_total / liabilities_total
        } else if assets_total > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        debug!(assets_total, liabilities_total, ratio, "Asset/liability ratio");

        AssetLiabilityRatio {
            assets_total,
            liabilities_total,
            ratio,
            tier: RatioTier::from_ratio(ratio),
        }
    }

    /// Whether an expense counts as spending on education
    pub fn is_education(&self, tx: &Transaction) -> bool {
        in_category(&tx.category, &self.education.categories)
            || contains_any(&tx.description, &self.education.keywords)
    }

    /// Share of expense spending that went to courses, books and training
    pub fn financial_education(&self, transactions: &[Transaction]) -> EducationSpending {
        let education_spending: f64 = expenses(transactions)
            .filter(|tx| self.is_education(tx))
            .map(|tx| tx.amount)
            .sum();
        let percentage = percentage(education_spending, total_expenses(transactions));

        EducationSpending {
            education_spending,
            percentage,
            tier: EducationTier::from_percentage(percentage),
        }
    }
}
