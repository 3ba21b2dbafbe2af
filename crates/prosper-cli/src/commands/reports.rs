//! Report command implementations (stats, debt, tip)

use anyhow::{Context, Result};
use chrono::Datelike;
use prosper_core::{
    daily_tip, validate_inputs, Analyzer, FinanceSource, Transaction, UserFinancialProfile,
};
use tracing::{debug, warn};

use super::{print_json, AppContext};

/// Validated profile and full transaction history for the current user
async fn load_user(ctx: &AppContext<'_>) -> Result<(UserFinancialProfile, Vec<Transaction>)> {
    let source = ctx.load_source().await?;
    let profile = source
        .get_profile(ctx.user)
        .await
        .context("Failed to load profile")?;
    let transactions = source
        .list_transactions(ctx.user, None)
        .await
        .context("Failed to list transactions")?;

    validate_inputs(&transactions, &profile, &[]).context("Snapshot contains invalid data")?;
    debug!(user = ctx.user, transactions = transactions.len(), "Loaded user data");
    Ok((profile, transactions))
}

pub async fn cmd_stats(ctx: &AppContext<'_>, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let (profile, transactions) = load_user(ctx).await?;
    let year = year.unwrap_or_else(|| ctx.now.year());
    let month = month.unwrap_or_else(|| ctx.now.month());

    let stats = Analyzer::new(ctx.rules)
        .monthly_stats(&transactions, &profile, year, month)
        .context("Failed to compute monthly stats")?;

    if ctx.json {
        return print_json(&stats);
    }

    println!();
    println!("📅 {}-{:02}", stats.year, stats.month);
    println!("   ─────────────────────────────────────");
    println!("   Income:         {:>12.2}", stats.income);
    println!("   Expenses:       {:>12.2}", stats.expenses);
    println!("   Savings:        {:>12.2}", stats.savings);
    println!("   Savings rate:   {:>11.1}%", stats.savings_rate);
    println!("   Assets:         {:>12.2}", stats.assets);
    println!("   Liabilities:    {:>12.2}", stats.liabilities);
    println!(
        "   Debt payments:  {:>12.2}  ({:.1}% of income)",
        stats.debt_payments, stats.debt_payment_rate
    );
    println!();

    Ok(())
}

pub async fn cmd_debt(ctx: &AppContext<'_>) -> Result<()> {
    let (profile, transactions) = load_user(ctx).await?;
    let progress = Analyzer::new(ctx.rules).debt_progress(&transactions, &profile, ctx.now);

    if progress.total_debt <= 0.0 && progress.paid_amount > 0.0 {
        warn!(
            paid = progress.paid_amount,
            "Debt payments recorded but the profile has no current debt"
        );
    }

    if ctx.json {
        return print_json(&progress);
    }

    if progress.total_debt <= 0.0 {
        println!("No debt on record. Set it with: prosper init --income <n> --debt <amount>");
        return Ok(());
    }

    println!();
    println!("💳 Debt progress");
    println!("   ─────────────────────────────────────");
    println!("   Total debt:      {:>12.2}", progress.total_debt);
    println!("   Paid so far:     {:>12.2}", progress.paid_amount);
    println!("   Remaining:       {:>12.2}", progress.remaining_debt);
    println!("   Progress:        {:>11.1}%", progress.progress_percentage);
    if progress.months_to_payoff > 0 {
        println!(
            "   Average payment: {:>12.2}",
            progress.monthly_payment_average
        );
        println!(
            "   Paid off in {} months (around {})",
            progress.months_to_payoff,
            progress.estimated_payoff_date.format("%Y-%m")
        );
    } else if progress.remaining_debt > 0.0 {
        println!("   No debt payments recorded yet");
    } else {
        println!("   🎉 Debt paid off!");
    }
    println!();

    Ok(())
}

pub fn cmd_tip(ctx: &AppContext<'_>) -> Result<()> {
    let tip = daily_tip(ctx.now.date_naive());

    if ctx.json {
        return print_json(&tip);
    }

    println!("📖 {}", tip.book.title());
    println!("   {}", tip.text);
    Ok(())
}
