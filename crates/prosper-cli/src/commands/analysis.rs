//! Analysis command implementations (analyze, recommend, check, classify)

use anyhow::{bail, Context, Result};
use prosper_core::{
    personalized_tips, AnalysisReport, Analyzer, FinanceSource, Period,
    PersonalizedRecommendations, Recommendation, Scorecard,
};
use serde::Serialize;

use super::{print_json, truncate, AppContext};

/// Output of `prosper analyze`
#[derive(Serialize)]
pub struct AnalyzeOutput {
    pub report: AnalysisReport,
    pub scorecard: Scorecard,
    pub tips: Vec<String>,
}

pub async fn analyze(ctx: &AppContext<'_>, period: Period) -> Result<AnalyzeOutput> {
    let source = ctx.load_source().await?;
    let advisor = ctx.advisor(&source);

    let report = advisor
        .analyze(ctx.user, period, ctx.now)
        .await
        .context("Failed to analyze transactions")?;
    let scorecard = advisor
        .scorecard(ctx.user)
        .await
        .context("Failed to score transactions")?;
    let tips = personalized_tips(&report);

    Ok(AnalyzeOutput {
        report,
        scorecard,
        tips,
    })
}

pub async fn cmd_analyze(ctx: &AppContext<'_>, period: Period) -> Result<()> {
    let output = analyze(ctx, period).await?;
    if ctx.json {
        return print_json(&output);
    }
    let AnalyzeOutput {
        report,
        scorecard,
        tips,
    } = output;

    println!();
    println!("📊 {} analysis", period);
    println!("   ─────────────────────────────────────────────");
    println!("   Income:               {:>12.2}", report.total_income);
    println!("   Expenses:             {:>12.2}", report.total_expenses);
    println!("   Savings rate:         {:>11.1}%", report.savings_rate);
    println!("   Assets purchased:     {:>12.2}", report.assets_purchased);
    println!("   Liabilities purchased:{:>12.2}", report.liabilities_purchased);
    println!("   Behavior score:       {:>12.0}", report.behavior_score);

    println!();
    println!("💡 Advice");
    for advice in &report.recommendations {
        println!("   • {}", advice);
    }

    print_scorecard(&scorecard);

    if !tips.is_empty() {
        println!();
        println!("✨ Tips");
        for tip in &tips {
            println!("   • {}", tip);
        }
    }
    println!();

    Ok(())
}

fn print_scorecard(card: &Scorecard) {
    println!();
    println!("📚 Scorecard (all transactions)");
    println!("   Rich Dad Poor Dad");
    println!(
        "     Asset/liability ratio: {:.2}  {}",
        card.asset_liability.ratio,
        card.asset_liability.tier.advice()
    );
    println!(
        "     Education spending: {:.1}%  {}",
        card.education.percentage,
        card.education.tier.advice()
    );
    println!("   The Psychology of Money");
    println!(
        "     Emotional spending: {:.1}%  {}",
        card.emotional.percentage,
        card.emotional.tier.advice()
    );
    println!(
        "     Impulsive purchases: {}  {}",
        card.impulsive.impulsive_count,
        card.impulsive.tier.advice()
    );
    println!(
        "     Consistency: {:.0}  {}",
        card.consistency.consistency_score,
        card.consistency.tier.advice()
    );
    println!("   The Richest Man in Babylon");
    println!(
        "     Savings rate: {:.1}%  {}",
        card.ten_percent.savings_rate,
        card.ten_percent.tier.advice()
    );
    println!(
        "     Discipline: {:.0}  {}",
        card.discipline.discipline_score,
        card.discipline.tier.advice()
    );
    println!(
        "     Risky spending: {:.1}%  {}",
        card.wealth_protection.risk_percentage,
        card.wealth_protection.risk_level.advice()
    );
}

pub async fn recommend(ctx: &AppContext<'_>) -> Result<PersonalizedRecommendations> {
    let source = ctx.load_source().await?;
    ctx.advisor(&source)
        .recommend(ctx.user, ctx.now)
        .await
        .context("Failed to generate recommendations")
}

pub async fn cmd_recommend(ctx: &AppContext<'_>) -> Result<()> {
    let recs = recommend(ctx).await?;

    if ctx.json {
        return print_json(&recs);
    }

    if recs.is_empty() {
        println!("🎉 No recommendations. Your finances look healthy!");
        return Ok(());
    }

    for (bucket, items) in recs.buckets() {
        if items.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", bucket.as_str().to_uppercase(), items.len());
        for rec in items {
            print_recommendation(rec);
        }
    }
    println!();

    Ok(())
}

fn print_recommendation(rec: &Recommendation) {
    println!("   ▸ {} [{}]", rec.title, rec.book_reference.title());
    println!("     {}", rec.description);
    for (i, step) in rec.action_steps.iter().enumerate() {
        println!("       {}. {}", i + 1, step);
    }
    println!(
        "     Impact: {} · Timeframe: {}",
        rec.expected_impact, rec.timeframe
    );
}

pub async fn cmd_check(ctx: &AppContext<'_>, index: usize) -> Result<()> {
    let source = ctx.load_source().await?;
    let transactions = source
        .list_transactions(ctx.user, None)
        .await
        .context("Failed to list transactions")?;

    if index == 0 || index > transactions.len() {
        bail!(
            "Transaction {} not found (user has {} transactions)",
            index,
            transactions.len()
        );
    }
    let tx = &transactions[index - 1];

    let rec = ctx
        .advisor(&source)
        .review_transaction(ctx.user, &tx.id)
        .await
        .context("Failed to check transaction")?;

    if ctx.json {
        return print_json(&rec);
    }

    println!(
        "🔎 {} {} {:.2} ({})",
        tx.date.format("%Y-%m-%d"),
        tx.description,
        tx.amount,
        tx.category
    );
    match rec {
        Some(rec) => print_recommendation(&rec),
        None => println!("   ✅ Nothing to flag for this transaction"),
    }

    Ok(())
}

/// One expense as listed by `prosper classify`
#[derive(Debug, Serialize)]
pub struct ClassifiedRow {
    pub index: usize,
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub classification: String,
    pub reason: &'static str,
}

/// Expenses in date order with their effective classification
pub async fn classify(ctx: &AppContext<'_>) -> Result<Vec<ClassifiedRow>> {
    let source = ctx.load_source().await?;
    let profile = source
        .get_profile(ctx.user)
        .await
        .context("Failed to load profile")?;
    let transactions = source
        .list_transactions(ctx.user, None)
        .await
        .context("Failed to list transactions")?;

    let analyzer = Analyzer::new(ctx.rules);
    let classifier = analyzer.classifier();

    let rows: Vec<ClassifiedRow> = transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| tx.is_expense())
        .map(|(i, tx)| ClassifiedRow {
            index: i + 1,
            id: tx.id.clone(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: tx.description.clone(),
            amount: tx.amount,
            category: tx.category.clone(),
            classification: classifier.effective(tx, &profile).to_string(),
            reason: classifier.effective_reason(tx, &profile).as_str(),
        })
        .collect();

    Ok(rows)
}

pub async fn cmd_classify(ctx: &AppContext<'_>) -> Result<()> {
    let rows = classify(ctx).await?;

    if ctx.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No expenses found. Import transactions with:");
        println!("  prosper import --file statement.csv");
        return Ok(());
    }

    println!();
    println!(
        "{:>4}  {:<10}  {:<30}  {:>10}  {:<10}  REASON",
        "#", "DATE", "DESCRIPTION", "AMOUNT", "CLASS"
    );
    for row in &rows {
        println!(
            "{:>4}  {:<10}  {:<30}  {:>10.2}  {:<10}  {}",
            row.index,
            row.date,
            truncate(&row.description, 30),
            row.amount,
            row.classification,
            row.reason
        );
    }
    println!();

    Ok(())
}
