//! Daily and personalized tips

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::BookReference;

use super::types::AnalysisReport;

const TIPS_PER_BOOK: usize = 5;

const PAI_RICO_TIPS: [&str; TIPS_PER_BOOK] = [
    "Before buying anything today, ask: \"Is this an asset or a liability?\"",
    "Remember: the rich buy assets first and luxuries later.",
    "Your house is not an asset if you live in it. It is a liability.",
    "Invest in your financial education today, even if only for 15 minutes.",
    "Think like a business owner: how could this generate income?",
];

const PSICOLOGIA_TIPS: [&str; TIPS_PER_BOOK] = [
    "Your emotions may be your worst financial enemy today.",
    "Before spending, take a deep breath and count to ten.",
    "Money is more about behavior than about math.",
    "Small consistent decisions create big results.",
    "Don't compare your spending with anyone else's. Everyone has their own journey.",
];

const BABILONIA_TIPS: [&str; TIPS_PER_BOOK] = [
    "Pay yourself first today: keep at least 10% of what you earn.",
    "A part of all you earn is yours to keep.",
    "Control your expenses; don't let them control you.",
    "Seek advice from those who are successful with money.",
    "Guard your money from loss: don't invest in what you don't understand.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTip {
    pub book: BookReference,
    pub text: String,
}

fn tips_for(book: BookReference) -> &'static [&'static str; TIPS_PER_BOOK] {
    match book {
        BookReference::PaiRico => &PAI_RICO_TIPS,
        BookReference::Psicologia => &PSICOLOGIA_TIPS,
        BookReference::Babilonia => &BABILONIA_TIPS,
    }
}

/// Tip of the day, stable for a given calendar date
///
/// Books rotate every day; each book advances to its next tip every three days.
/// The day index is the count of days since 0001-01-01 (`num_days_from_ce`).
pub fn daily_tip(date: NaiveDate) -> DailyTip {
    let day = date.num_days_from_ce().unsigned_abs() as usize;
    let books = BookReference::all();
    let book = books[day % books.len()];
    let tip = tips_for(book)[(day / books.len()) % TIPS_PER_BOOK];

    DailyTip {
        book,
        text: tip.to_string(),
    }
}

/// Short tips derived from a completed analysis
pub fn personalized_tips(report: &AnalysisReport) -> Vec<String> {
    let mut tips = Vec::new();

    if report.savings_rate < 10.0 {
        tips.push(
            "Start by keeping 1% of your income and add 1% each month until you reach 10%."
                .to_string(),
        );
    }

    if report.behavior_score < 70.0 {
        tips.push(
            "Pause before buying and ask yourself: \"Is this an asset or a liability?\"".to_string(),
        );
    }

    if report.liabilities_purchased > report.assets_purchased {
        tips.push(
            "Focus on buying assets that generate income, such as courses, books or investments."
                .to_string(),
        );
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{FinancialTrend, TrendDirection};
    use crate::models::Period;

    fn report(savings_rate: f64, behavior_score: f64, assets: f64, liabilities: f64) -> AnalysisReport {
        AnalysisReport {
            period: Period::Monthly,
            total_income: 0.0,
            total_expenses: 0.0,
            savings_rate,
            assets_purchased: assets,
            liabilities_purchased: liabilities,
            behavior_score,
            recommendations: Vec::new(),
            trends: vec![FinancialTrend {
                category: "total_spending".into(),
                direction: TrendDirection::Stable,
                percentage: 0.0,
                description: String::new(),
            }],
        }
    }

    #[test]
    fn test_daily_tip_is_stable_per_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(daily_tip(date), daily_tip(date));
    }

    #[test]
    fn test_daily_tip_indexes_by_days_from_ce() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let day = date.num_days_from_ce() as usize;
        let book = BookReference::all()[day % 3];

        let tip = daily_tip(date);
        assert_eq!(tip.book, book);
        assert_eq!(tip.text, tips_for(book)[(day / 3) % TIPS_PER_BOOK]);
    }

    #[test]
    fn test_daily_tip_rotates_books() {
        let first = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let books: Vec<BookReference> = (0..3)
            .map(|offset| daily_tip(first + chrono::Duration::days(offset)).book)
            .collect();

        for book in BookReference::all() {
            assert!(books.contains(book));
        }
    }

    #[test]
    fn test_daily_tip_covers_every_tip() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut seen = std::collections::HashSet::new();
        for offset in 0..15 {
            seen.insert(daily_tip(first + chrono::Duration::days(offset)).text);
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_personalized_tips_order() {
        let tips = personalized_tips(&report(5.0, 50.0, 100.0, 200.0));
        assert_eq!(tips.len(), 3);
        assert!(tips[0].contains("1%"));
        assert!(tips[1].contains("asset or a liability"));
        assert!(tips[2].contains("income"));
    }

    #[test]
    fn test_no_tips_for_healthy_report() {
        assert!(personalized_tips(&report(25.0, 90.0, 500.0, 100.0)).is_empty());
    }
}
