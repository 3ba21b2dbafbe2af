//! Test utilities for prosper-core
//!
//! Fixture builders for transactions, profiles and goals, plus a fixed clock
//! so period filtering and goal deadlines are reproducible.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{
    EmotionalState, FinancialGoal, GoalStatus, Priority, Transaction, TransactionType,
    UserFinancialProfile,
};

/// Noon UTC on the given date
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
}

/// The "now" used by tests: 2026-10-17 12:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    at(2026, 10, 17)
}

/// Default date for fixtures that don't care about time: inside the
/// current month of [`fixed_now`]
fn default_date() -> DateTime<Utc> {
    at(2026, 10, 15)
}

fn transaction(
    amount: f64,
    transaction_type: TransactionType,
    category: &str,
    description: &str,
) -> Transaction {
    Transaction {
        id: String::new(),
        amount,
        transaction_type,
        category: category.to_string(),
        description: description.to_string(),
        date: default_date(),
        classification: None,
        emotional_state: EmotionalState::Neutral,
        is_recurring: false,
    }
}

pub fn expense(amount: f64, category: &str, description: &str) -> Transaction {
    transaction(amount, TransactionType::Expense, category, description)
}

pub fn income(amount: f64, description: &str) -> Transaction {
    transaction(amount, TransactionType::Income, "salary", description)
}

/// Plain neutral expense on a given date
pub fn expense_on(date: DateTime<Utc>, amount: f64) -> Transaction {
    Transaction {
        date,
        ..expense(amount, "other", "purchase")
    }
}

pub fn income_on(date: DateTime<Utc>, amount: f64) -> Transaction {
    Transaction {
        date,
        ..income(amount, "salary")
    }
}

/// Tag a transaction with the user's emotional state
pub fn feeling(tx: Transaction, state: EmotionalState) -> Transaction {
    Transaction {
        emotional_state: state,
        ..tx
    }
}

pub fn profile(monthly_income: f64) -> UserFinancialProfile {
    UserFinancialProfile::new(monthly_income)
}

/// Active medium-priority goal; `id` doubles as the title
pub fn goal(id: &str, target_amount: f64, current_amount: f64, deadline: NaiveDate) -> FinancialGoal {
    FinancialGoal {
        id: id.to_string(),
        title: id.to_string(),
        target_amount,
        current_amount,
        deadline,
        status: GoalStatus::Active,
        priority: Priority::Medium,
    }
}
