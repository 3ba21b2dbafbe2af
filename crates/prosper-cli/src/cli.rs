//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prosper_core::Period;

/// Prosper - Financial coaching from three classic money books
#[derive(Parser)]
#[command(name = "prosper")]
#[command(about = "Rule-based personal finance coach", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file (JSON, or YAML by .yaml/.yml extension)
    #[arg(long, default_value = "prosper.json", global = true)]
    pub data: PathBuf,

    /// User id inside the snapshot
    #[arg(long, default_value = "default", global = true)]
    pub user: String,

    /// Rules file overriding the built-in keyword lists and thresholds
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a snapshot with a profile for the user
    Init {
        /// Monthly income
        #[arg(long)]
        income: f64,

        /// Monthly savings goal
        #[arg(long, default_value = "0")]
        savings_goal: f64,

        /// Outstanding debt, tracked by `prosper debt`
        #[arg(long)]
        debt: Option<f64>,
    },

    /// Import transactions from CSV
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Analyze spending over a period
    Analyze {
        /// Period: daily, weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        period: Period,
    },

    /// Show prioritized recommendations
    Recommend,

    /// Check a single transaction (1-based, in date order)
    Check {
        /// Transaction number as listed by `classify`
        index: usize,
    },

    /// List transactions with their asset/liability classification
    Classify,

    /// Monthly statistics (defaults to the current month)
    Stats {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,
    },

    /// Show debt payoff progress
    Debt,

    /// Show today's tip
    Tip,
}
