//! Monthly statistics and debt payoff tracking

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Classification, Transaction, UserFinancialProfile};
use crate::rules::in_category;

use super::engine::Analyzer;
use super::{expenses, percentage};

/// Income, spending and debt payments for one calendar month (UTC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub savings_rate: f64,
    pub assets: f64,
    pub liabilities: f64,
    pub debt_payments: f64,
    /// Debt payments as a share of income
    pub debt_payment_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtProgress {
    pub total_debt: f64,
    pub paid_amount: f64,
    pub remaining_debt: f64,
    pub progress_percentage: f64,
    /// Mean amount per payment
    pub monthly_payment_average: f64,
    /// 0 when no payment has been made yet
    pub months_to_payoff: u32,
    pub estimated_payoff_date: DateTime<Utc>,
}

impl<'a> Analyzer<'a> {
    fn is_debt_payment(&self, tx: &Transaction) -> bool {
        in_category(&tx.category, &self.rules().stats.debt_payment_categories)
    }

    pub fn monthly_stats(
        &self,
        transactions: &[Transaction],
        profile: &UserFinancialProfile,
        year: i32,
        month: u32,
    ) -> Result<MonthlyStats> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }

        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| tx.date.year() == year && tx.date.month() == month)
            .cloned()
            .collect();

        let classifier = self.classifier();
        let mut income = 0.0;
        let mut spent = 0.0;
        let mut assets = 0.0;
        let mut liabilities = 0.0;
        let mut debt_payments = 0.0;

        for tx in &in_month {
            if tx.is_income() {
                income += tx.amount;
                continue;
            }
            spent += tx.amount;
            if self.is_debt_payment(tx) {
                debt_payments += tx.amount;
            }
            match classifier.effective(tx, profile) {
                Classification::Asset => assets += tx.amount,
                Classification::Liability => liabilities += tx.amount,
                Classification::Neutral => {}
            }
        }

        let savings = income - spent;
        debug!(year, month, transactions = in_month.len(), "Monthly stats");

        Ok(MonthlyStats {
            year,
            month,
            income,
            expenses: spent,
            savings,
            savings_rate: percentage(savings, income),
            assets,
            liabilities,
            debt_payments,
            debt_payment_rate: percentage(debt_payments, income),
        })
    }

    pub fn debt_progress(
        &self,
        transactions: &[Transaction],
        profile: &UserFinancialProfile,
        now: DateTime<Utc>,
    ) -> DebtProgress {
        let payments: Vec<f64> = expenses(transactions)
            .filter(|tx| self.is_debt_payment(tx))
            .map(|tx| tx.amount)
            .collect();

        let total_debt = profile.current_debt.unwrap_or(0.0);
        let paid_amount: f64 = payments.iter().sum();
        let remaining_debt = (total_debt - paid_amount).max(0.0);
        let monthly_payment_average = if payments.is_empty() {
            0.0
        } else {
            paid_amount / payments.len() as f64
        };

        let months_to_payoff = if monthly_payment_average > 0.0 {
            (remaining_debt / monthly_payment_average).ceil() as u32
        } else {
            0
        };
        let estimated_payoff_date = now
            .checked_add_months(Months::new(months_to_payoff))
            .unwrap_or(now);

        DebtProgress {
            total_debt,
            paid_amount,
            remaining_debt,
            progress_percentage: percentage(paid_amount, total_debt),
            monthly_payment_average,
            months_to_payoff,
            estimated_payoff_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use crate::test_utils::{at, expense, expense_on, fixed_now, income_on, profile};

    fn debt_payment(amount: f64) -> Transaction {
        expense(amount, "Pagamento de Dívida", "parcela do acordo")
    }

    #[test]
    fn test_monthly_stats_for_one_month() {
        let rules = Rules::default();
        let analyzer = Analyzer::new(&rules);
        let mut payment = debt_payment(500.0);
        payment.date = at(2026, 3, 20);
        let mut course = expense(300.0, "education", "online class");
        course.date = at(2026, 3, 5);

        let txs = vec![
            income_on(at(2026, 3, 1), 5000.0),
            course,
            payment,
            expense_on(at(2026, 3, 31), 200.0),
            // Other months are ignored
            income_on(at(2026, 4, 1), 9999.0),
            expense_on(at(2026, 2, 28), 9999.0),
        ];

        let stats = analyzer
            .monthly_stats(&txs, &profile(5000.0), 2026, 3)
            .unwrap();
        assert_eq!(stats.income, 5000.0);
        assert_eq!(stats.expenses, 1000.0);
        assert_eq!(stats.savings, 4000.0);
        assert!((stats.savings_rate - 80.0).abs() < 1e-9);
        assert_eq!(stats.assets, 300.0);
        assert_eq!(stats.debt_payments, 500.0);
        assert!((stats.debt_payment_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_stats_rejects_bad_month() {
        let rules = Rules::default();
        let analyzer = Analyzer::new(&rules);
        let err = analyzer.monthly_stats(&[], &profile(1000.0), 2026, 13);
        assert!(matches!(err, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_monthly_stats_empty_month() {
        let rules = Rules::default();
        let analyzer = Analyzer::new(&rules);
        let stats = analyzer.monthly_stats(&[], &profile(1000.0), 2026, 1).unwrap();
        assert_eq!(stats.savings_rate, 0.0);
        assert_eq!(stats.debt_payment_rate, 0.0);
    }

    #[test]
    fn test_debt_progress() {
        let rules = Rules::default();
        let analyzer = Analyzer::new(&rules);
        let mut p = profile(6000.0);
        p.current_debt = Some(30000.0);
        let txs = vec![
            debt_payment(1000.0),
            debt_payment(2000.0),
            expense(5000.0, "debt_payment", "quitação parcial"),
            expense(100.0, "food", "groceries run"),
        ];

        let progress = analyzer.debt_progress(&txs, &p, fixed_now());
        assert_eq!(progress.paid_amount, 8000.0);
        assert_eq!(progress.remaining_debt, 22000.0);
        assert!((progress.progress_percentage - 26.666_666_666).abs() < 1e-6);
        // 22000 / (8000 / 3) = 8.25 -> 9
        assert_eq!(progress.months_to_payoff, 9);
        assert_eq!(progress.estimated_payoff_date, at(2027, 7, 17));
    }

    #[test]
    fn test_debt_progress_without_payments_or_debt() {
        let rules = Rules::default();
        let analyzer = Analyzer::new(&rules);

        let progress = analyzer.debt_progress(&[], &profile(3000.0), fixed_now());
        assert_eq!(progress.total_debt, 0.0);
        assert_eq!(progress.progress_percentage, 0.0);
        assert_eq!(progress.months_to_payoff, 0);
        assert_eq!(progress.estimated_payoff_date, fixed_now());
    }

    #[test]
    fn test_overpaid_debt_floors_at_zero() {
        let rules = Rules::default();
        let analyzer = Analyzer::new(&rules);
        let mut p = profile(3000.0);
        p.current_debt = Some(500.0);

        let progress = analyzer.debt_progress(&[debt_payment(800.0)], &p, fixed_now());
        assert_eq!(progress.remaining_debt, 0.0);
        assert_eq!(progress.months_to_payoff, 0);
    }
}
