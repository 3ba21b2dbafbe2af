//! Snapshot command implementations (init, import)

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use prosper_core::{
    import::parse_csv, Error, Snapshot, SnapshotSource, UserFinancialProfile, UserRecord,
};
use tracing::debug;

use super::AppContext;

/// Load the snapshot, or start an empty one when the file does not exist yet
async fn load_or_empty(data: &Path) -> Result<SnapshotSource> {
    match SnapshotSource::load(data).await {
        Ok(source) => Ok(source),
        Err(Error::NotFound(_)) => Ok(SnapshotSource::new(Snapshot::default())),
        Err(e) => Err(e).with_context(|| format!("Failed to load snapshot {}", data.display())),
    }
}

pub async fn cmd_init(
    ctx: &AppContext<'_>,
    income: f64,
    savings_goal: f64,
    debt: Option<f64>,
) -> Result<()> {
    let mut profile = UserFinancialProfile::new(income);
    profile.savings_goal = savings_goal;
    profile.current_debt = debt;
    profile.validate().context("Invalid profile")?;

    let mut source = load_or_empty(ctx.data).await?;
    let snapshot = source.snapshot_mut();

    // Keep existing transactions and goals when re-initializing a user
    match snapshot.user_mut(ctx.user) {
        Ok(user) => {
            user.profile = profile;
            println!("🔧 Updated profile for '{}'", ctx.user);
        }
        Err(_) => {
            snapshot.upsert_user(UserRecord::new(ctx.user, profile));
            println!("🔧 Created profile for '{}'", ctx.user);
        }
    }

    source
        .save(ctx.data)
        .await
        .with_context(|| format!("Failed to save snapshot {}", ctx.data.display()))?;

    println!("   Monthly income: {:.2}", income);
    println!("   Savings goal:   {:.2}", savings_goal);
    if let Some(debt) = debt {
        println!("   Current debt:   {:.2}", debt);
    }
    println!("✅ Snapshot written to {}", ctx.data.display());
    println!();
    println!("Next steps:");
    println!("  1. Import transactions: prosper import --file statement.csv");
    println!("  2. Analyze spending: prosper analyze");

    Ok(())
}

pub async fn cmd_import(ctx: &AppContext<'_>, file: &Path) -> Result<()> {
    let mut source = ctx.load_source().await?;

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let transactions = parse_csv(csv_file)
        .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;

    for tx in &transactions {
        tx.validate().context("Imported transaction is invalid")?;
    }

    if !ctx.json {
        println!("📥 Importing from {}...", file.display());
        println!("   Found {} transactions", transactions.len());
    }

    let user = source
        .snapshot_mut()
        .user_mut(ctx.user)
        .with_context(|| format!("Unknown user '{}' (run 'prosper init' first)", ctx.user))?;
    let imported = user.add_transactions(transactions);
    let total = user.transactions.len();
    debug!(user = ctx.user, imported, total, "Appended imported transactions");

    source
        .save(ctx.data)
        .await
        .with_context(|| format!("Failed to save snapshot {}", ctx.data.display()))?;

    if ctx.json {
        super::print_json(&serde_json::json!({ "imported": imported, "total": total }))?;
    } else {
        println!("✅ Import complete!");
        println!("   Imported: {}", imported);
        println!("   Total transactions: {}", total);
    }

    Ok(())
}
