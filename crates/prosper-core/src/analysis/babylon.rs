//! The Richest Man in Babylon scorers
//!
//! - Ten-percent rule: keep at least a tenth of what you earn
//! - Discipline: penalize unnecessary spending, reward investment
//! - Wealth protection: exposure to gambling and speculation

use tracing::debug;

use crate::models::Transaction;
use crate::rules::{contains_any, in_category, DisciplineRules, RiskRules, Rules};

use super::types::{
    Discipline, DisciplineTier, RiskLevel, SavingsTier, TenPercentRule, WealthProtection,
};
use super::{expenses, percentage, total_expenses, total_income};

/// Minimum savings rate (percent of income) that satisfies the rule
pub const TEN_PERCENT: f64 = 10.0;

pub struct Babylon<'a> {
    discipline: &'a DisciplineRules,
    risk: &'a RiskRules,
}

impl<'a> Babylon<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            discipline: &rules.discipline,
            risk: &rules.risk,
        }
    }

    pub fn ten_percent_rule(&self, transactions: &[Transaction]) -> TenPercentRule {
        let total_income = total_income(transactions);
        let total_expenses = total_expenses(transactions);
        let savings_amount = total_income - total_expenses;
        let savings_rate = percentage(savings_amount, total_income);

        TenPercentRule {
            total_income,
            total_expenses,
            savings_amount,
            savings_rate,
            is_following_rule: savings_rate >= TEN_PERCENT,
            tier: SavingsTier::from_rate(savings_rate),
        }
    }

    /// Start at 100, subtract the unnecessary share of spending, add a
    /// weighted bonus for the investment share, clamp to 0-100
    pub fn discipline(&self, transactions: &[Transaction]) -> Discipline {
        let rules = self.discipline;
        let total = total_expenses(transactions);

        let unnecessary: f64 = expenses(transactions)
            .filter(|tx| in_category(&tx.category, &rules.unnecessary_categories))
            .map(|tx| tx.amount)
            .sum();
        let investment: f64 = expenses(transactions)
            .filter(|tx| in_category(&tx.category, &rules.investment_categories))
            .map(|tx| tx.amount)
            .sum();

        let unnecessary_percentage = percentage(unnecessary, total);
        let investment_percentage = percentage(investment, total);
        let discipline_score = (100.0 - unnecessary_percentage
            + investment_percentage * rules.investment_bonus_weight)
            .clamp(0.0, 100.0);

        debug!(
            discipline_score,
            unnecessary_percentage, investment_percentage, "Discipline"
        );

        Discipline {
            discipline_score,
            unnecessary_percentage,
            investment_percentage,
            tier: DisciplineTier::from_score(discipline_score),
        }
    }

    pub fn is_risky(&self, tx: &Transaction) -> bool {
        in_category(&tx.category, &self.risk.categories)
            || contains_any(&tx.description, &self.risk.keywords)
    }

    pub fn wealth_protection(&self, transactions: &[Transaction]) -> WealthProtection {
        let risky_amount: f64 = expenses(transactions)
            .filter(|tx| self.is_risky(tx))
            .map(|tx| tx.amount)
            .sum();
        let risk_percentage = percentage(risky_amount, total_expenses(transactions));

        WealthProtection {
            risky_amount,
            risk_percentage,
            risk_level: RiskLevel::from_percentage(risk_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, income};

    #[test]
    fn test_ten_percent_rule_excellent() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);
        let txs = vec![income(12000.0, "salary"), expense(9600.0, "living", "monthly costs")];

        let result = babylon.ten_percent_rule(&txs);
        assert_eq!(result.savings_amount, 2400.0);
        assert!((result.savings_rate - 20.0).abs() < 1e-9);
        assert!(result.is_following_rule);
        assert_eq!(result.tier, SavingsTier::Excellent);
    }

    #[test]
    fn test_ten_percent_rule_without_income() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);

        let result = babylon.ten_percent_rule(&[expense(50.0, "food", "lunch out")]);
        assert_eq!(result.savings_rate, 0.0);
        assert_eq!(result.savings_amount, -50.0);
        assert!(!result.is_following_rule);
        assert_eq!(result.tier, SavingsTier::Urgent);
    }

    #[test]
    fn test_ten_percent_rule_overspending_is_negative() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);
        let txs = vec![income(1000.0, "salary"), expense(1500.0, "living", "monthly costs")];

        let result = babylon.ten_percent_rule(&txs);
        assert!((result.savings_rate + 50.0).abs() < 1e-9);
        assert_eq!(result.tier, SavingsTier::Urgent);
    }

    #[test]
    fn test_discipline_empty_is_perfect() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);

        let result = babylon.discipline(&[]);
        assert_eq!(result.discipline_score, 100.0);
        assert_eq!(result.tier, DisciplineTier::Excellent);
    }

    #[test]
    fn test_discipline_penalty_and_bonus() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);
        let txs = vec![
            expense(400.0, "luxury", "designer bag"),
            expense(200.0, "investment", "index fund"),
            expense(400.0, "groceries", "supermarket"),
        ];

        // 100 - 40 + 20 * 0.5 = 70
        let result = babylon.discipline(&txs);
        assert!((result.discipline_score - 70.0).abs() < 1e-9);
        assert_eq!(result.tier, DisciplineTier::Good);
    }

    #[test]
    fn test_discipline_is_clamped() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);

        let all_unnecessary = babylon.discipline(&[expense(100.0, "impulse", "gadget")]);
        assert_eq!(all_unnecessary.discipline_score, 0.0);
        assert_eq!(all_unnecessary.tier, DisciplineTier::NeedsWork);

        let all_investment = babylon.discipline(&[expense(100.0, "business", "new equipment")]);
        assert_eq!(all_investment.discipline_score, 100.0);
    }

    #[test]
    fn test_wealth_protection_levels() {
        let rules = Rules::default();
        let babylon = Babylon::new(&rules);

        let high = babylon.wealth_protection(&[
            expense(200.0, "other", "Aposta esportiva"),
            expense(800.0, "groceries", "supermarket"),
        ]);
        assert!((high.risk_percentage - 20.0).abs() < 1e-9);
        assert_eq!(high.risk_level, RiskLevel::High);

        let medium = babylon.wealth_protection(&[
            expense(50.0, "speculation", "crypto"),
            expense(950.0, "groceries", "supermarket"),
        ]);
        assert_eq!(medium.risk_level, RiskLevel::Medium);

        let low = babylon.wealth_protection(&[expense(950.0, "groceries", "supermarket")]);
        assert_eq!(low.risk_level, RiskLevel::Low);
        assert_eq!(low.risky_amount, 0.0);
    }
}
