//! Prosper CLI - Personal finance coach
//!
//! Usage:
//!   prosper init --income 5000     Create a snapshot for the user
//!   prosper import --file CSV      Import transactions
//!   prosper analyze --period week  Analyze spending
//!   prosper recommend              Show recommendations

mod cli;
mod commands;


use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let rules = commands::load_rules(cli.rules.as_deref())?;
    let ctx = AppContext {
        data: &cli.data,
        user: &cli.user,
        rules: &rules,
        now: Utc::now(),
        json: cli.json,
    };

    match cli.command {
        Commands::Init {
            income,
            savings_goal,
            debt,
        } => commands::cmd_init(&ctx, income, savings_goal, debt).await,
        Commands::Import { file } => commands::cmd_import(&ctx, &file).await,
        Commands::Analyze { period } => commands::cmd_analyze(&ctx, period).await,
        Commands::Recommend => commands::cmd_recommend(&ctx).await,
        Commands::Check { index } => commands::cmd_check(&ctx, index).await,
        Commands::Classify => commands::cmd_classify(&ctx).await,
        Commands::Stats { year, month } => commands::cmd_stats(&ctx, year, month).await,
        Commands::Debt => commands::cmd_debt(&ctx).await,
        Commands::Tip => commands::cmd_tip(&ctx),
    }
}
