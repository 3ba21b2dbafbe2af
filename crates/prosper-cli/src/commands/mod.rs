//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Analysis commands (analyze, recommend, check, classify)
//! - `reports` - Report commands (stats, debt, tip)
//! - `snapshot` - Snapshot commands (init, import)
//!
//! Shared utilities (`AppContext`, `load_rules`, `print_json`) live here.

pub mod analysis;
pub mod reports;
pub mod snapshot;

// Re-export command functions for main.rs
pub use analysis::*;
pub use reports::*;
pub use snapshot::*;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use prosper_core::{Advisor, Rules, SnapshotSource};
use serde::Serialize;

/// Everything a command needs from the global flags
pub struct AppContext<'a> {
    pub data: &'a Path,
    pub user: &'a str,
    pub rules: &'a Rules,
    pub now: DateTime<Utc>,
    pub json: bool,
}

impl<'a> AppContext<'a> {
    /// Load the snapshot named by `--data`
    pub async fn load_source(&self) -> Result<SnapshotSource> {
        SnapshotSource::load(self.data).await.with_context(|| {
            format!(
                "Failed to load snapshot {} (run 'prosper init' first)",
                self.data.display()
            )
        })
    }

    pub fn advisor<'s>(&'s self, source: &'s SnapshotSource) -> Advisor<'s, SnapshotSource> {
        Advisor::new(source, self.rules)
    }
}

/// Load rules from `--rules`, the user override file, or the built-in tables
pub fn load_rules(path: Option<&Path>) -> Result<Rules> {
    Rules::load(path).context("Failed to load rules")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
