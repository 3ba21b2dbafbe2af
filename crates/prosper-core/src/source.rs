//! Finance data sources
//!
//! The analysis core never does I/O itself. A [`FinanceSource`] supplies
//! transactions, profiles and goals per user; [`SnapshotSource`] is the
//! file-backed implementation used by the CLI:
//!
//! - JSON or YAML, chosen by file extension
//! - Saves write a temp file in the target directory and rename it into place

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{DateRange, FinancialGoal, Transaction, UserFinancialProfile};

/// Supplies per-user financial data to the analysis core
#[async_trait]
pub trait FinanceSource: Send + Sync {
    /// Transactions ordered by date, optionally limited to `range`
    async fn list_transactions(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>>;

    async fn get_profile(&self, user_id: &str) -> Result<UserFinancialProfile>;

    async fn list_goals(&self, user_id: &str) -> Result<Vec<FinancialGoal>>;
}

/// On-disk snapshot format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// `.yaml`/`.yml` is YAML, anything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// One user's data inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub profile: UserFinancialProfile,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, profile: UserFinancialProfile) -> Self {
        Self {
            id: id.into(),
            profile,
            transactions: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Append transactions, assigning `tx_{n}` ids to those without one
    ///
    /// Returns how many were added.
    pub fn add_transactions(&mut self, transactions: Vec<Transaction>) -> usize {
        let added = transactions.len();
        for mut tx in transactions {
            if tx.id.is_empty() {
                tx.id = self.next_transaction_id();
            }
            self.transactions.push(tx);
        }
        added
    }

    fn next_transaction_id(&self) -> String {
        let mut n = self.transactions.len() + 1;
        loop {
            let id = format!("tx_{}", n);
            if !self.transactions.iter().any(|tx| tx.id == id) {
                return id;
            }
            n += 1;
        }
    }
}

/// Every user's data, as stored in a snapshot file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl Snapshot {
    pub fn user(&self, user_id: &str) -> Result<&UserRecord> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::NotFound(format!("user '{}'", user_id)))
    }

    pub fn user_mut(&mut self, user_id: &str) -> Result<&mut UserRecord> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::NotFound(format!("user '{}'", user_id)))
    }

    /// Insert a user, replacing any existing user with the same id
    pub fn upsert_user(&mut self, user: UserRecord) {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }

    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self> {
        let snapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(snapshot)
    }

    pub fn render(&self, format: SnapshotFormat) -> Result<String> {
        let content = match format {
            SnapshotFormat::Json => serde_json::to_string_pretty(self)?,
            SnapshotFormat::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(content)
    }
}

/// In-memory [`FinanceSource`] backed by a [`Snapshot`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file; missing files are `Error::NotFound`
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            return Err(Error::NotFound(format!("snapshot {}", path.display())));
        }
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot = Snapshot::parse(&content, SnapshotFormat::from_path(path))?;
        debug!(path = %path.display(), users = snapshot.users.len(), "Loaded snapshot");
        Ok(Self { snapshot })
    }

    /// Write the snapshot atomically to `path`
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = self.snapshot.render(SnapshotFormat::from_path(path))?;
        let path: PathBuf = path.to_path_buf();

        tokio::task::spawn_blocking(move || write_atomic(&path, content.as_bytes()))
            .await
            .map_err(std::io::Error::other)??;
        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = content.len(), "Saved snapshot");
    Ok(())
}

#[async_trait]
impl FinanceSource for SnapshotSource {
    async fn list_transactions(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>> {
        let user = self.snapshot.user(user_id)?;
        let mut transactions: Vec<Transaction> = user
            .transactions
            .iter()
            .filter(|tx| range.map_or(true, |r| r.contains(tx.date)))
            .cloned()
            .collect();
        transactions.sort_by_key(|tx| tx.date);
        Ok(transactions)
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserFinancialProfile> {
        Ok(self.snapshot.user(user_id)?.profile.clone())
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<FinancialGoal>> {
        Ok(self.snapshot.user(user_id)?.goals.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, expense_on, income_on, profile};
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        let mut user = UserRecord::new("ana", profile(5000.0));
        user.add_transactions(vec![
            expense_on(at(2026, 10, 9), 50.0),
            income_on(at(2026, 10, 1), 5000.0),
            expense_on(at(2026, 9, 20), 80.0),
        ]);
        Snapshot { users: vec![user] }
    }

    #[test]
    fn test_add_transactions_assigns_ids() {
        let snapshot = sample();
        let ids: Vec<&str> = snapshot.users[0]
            .transactions
            .iter()
            .map(|tx| tx.id.as_str())
            .collect();
        assert_eq!(ids, vec!["tx_1", "tx_2", "tx_3"]);
    }

    #[test]
    fn test_snapshot_format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yaml")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.YML")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("prosper")), SnapshotFormat::Json);
    }

    #[tokio::test]
    async fn test_list_transactions_sorted_and_ranged() {
        let source = SnapshotSource::new(sample());

        let all = source.list_transactions("ana", None).await.unwrap();
        let dates: Vec<_> = all.iter().map(|tx| tx.date).collect();
        assert_eq!(dates, vec![at(2026, 9, 20), at(2026, 10, 1), at(2026, 10, 9)]);

        let october = source
            .list_transactions("ana", Some(DateRange::since(at(2026, 10, 1))))
            .await
            .unwrap();
        assert_eq!(october.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let source = SnapshotSource::new(sample());
        assert!(matches!(
            source.get_profile("bruno").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            source.list_transactions("bruno", None).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_save_and_load_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let source = SnapshotSource::new(sample());

        for name in ["data.json", "data.yaml"] {
            let path = dir.path().join(name);
            source.save(&path).await.unwrap();
            let loaded = SnapshotSource::load(&path).await.unwrap();
            assert_eq!(loaded.snapshot(), source.snapshot());
        }

        let json = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
        assert!(json.contains("\"monthly_income\""));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = SnapshotSource::load(&dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_upsert_replaces_user() {
        let mut snapshot = sample();
        snapshot.upsert_user(UserRecord::new("ana", profile(9000.0)));
        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.user("ana").unwrap().profile.monthly_income, 9000.0);
        assert!(snapshot.user("ana").unwrap().transactions.is_empty());
    }
}
