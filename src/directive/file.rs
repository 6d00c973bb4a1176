//! JSON-file directive repository
//!
//! Stores every directive ever written as a JSON array. Upserting a symbol
//! clears the active flag on its previous records, so the file doubles as
//! an audit trail of operator actions.

use super::{ControlDirective, DirectiveRepository};
use crate::error::RepositoryError;
use crate::quote::normalize_symbol;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Directive repository backed by a JSON file on disk
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Open (or lazily create) the repository at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored record, active or not
    pub async fn history(&self) -> Result<Vec<ControlDirective>, RepositoryError> {
        self.load().await
    }

    async fn load(&self) -> Result<Vec<ControlDirective>, RepositoryError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, records: &[ControlDirective]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write then rename so readers never observe a half-written file
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DirectiveRepository for JsonFileRepository {
    async fn list_active(&self) -> Result<Vec<ControlDirective>, RepositoryError> {
        let records = self.load().await?;
        Ok(records.into_iter().filter(|d| d.active).collect())
    }

    async fn upsert(
        &self,
        symbol: &str,
        target_percent_change: Decimal,
        duration_minutes: u32,
    ) -> Result<ControlDirective, RepositoryError> {
        let directive =
            ControlDirective::new(symbol, target_percent_change, duration_minutes, Utc::now())?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        for record in records.iter_mut().filter(|d| d.symbol == directive.symbol) {
            record.active = false;
        }
        records.push(directive.clone());
        self.save(&records).await?;

        tracing::info!(
            symbol = %directive.symbol,
            target_pct = %directive.target_percent_change,
            duration_minutes = directive.duration_minutes,
            path = %self.path.display(),
            "Directive written"
        );
        Ok(directive)
    }

    async fn deactivate(&self, symbol: &str) -> Result<bool, RepositoryError> {
        let symbol = normalize_symbol(symbol);

        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let mut changed = false;
        for record in records
            .iter_mut()
            .filter(|d| d.symbol == symbol && d.active)
        {
            record.active = false;
            changed = true;
        }
        if changed {
            self.save(&records).await?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("directives.json"));
        assert!(repo.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("directives.json");

        JsonFileRepository::new(&path)
            .upsert("stlk", dec!(12.5), 45)
            .await
            .unwrap();

        let reopened = JsonFileRepository::new(&path);
        let active = reopened.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].symbol, "STLK");
        assert_eq!(active[0].target_percent_change, dec!(12.5));
        assert_eq!(active[0].duration_minutes, 45);
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_active() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("directives.json"));

        repo.upsert("AAPL", dec!(10), 60).await.unwrap();
        let last = repo.upsert("AAPL", dec!(20), 30).await.unwrap();

        let active = repo.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, last.id);
        assert_eq!(repo.history().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_deactivate() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("directives.json"));
        repo.upsert("TECH", dec!(-4), 15).await.unwrap();

        assert!(repo.deactivate("tech").await.unwrap());
        assert!(!repo.deactivate("tech").await.unwrap());
        assert!(repo.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directives.json");
        std::fs::write(&path, "not json").unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(matches!(repo.list_active().await, Err(RepositoryError::Json(_))));
    }
}
