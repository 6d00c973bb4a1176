//! In-memory directive repository

use super::{ControlDirective, DirectiveRepository};
use crate::error::RepositoryError;
use crate::quote::normalize_symbol;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Repository keeping the latest directive per symbol in memory
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<HashMap<String, ControlDirective>>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prepared record as-is (used to seed fixtures)
    pub async fn insert(&self, directive: ControlDirective) {
        let mut records = self.records.write().await;
        records.insert(directive.symbol.clone(), directive);
    }
}

#[async_trait]
impl DirectiveRepository for InMemoryRepository {
    async fn list_active(&self) -> Result<Vec<ControlDirective>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|d| d.active).cloned().collect())
    }

    async fn upsert(
        &self,
        symbol: &str,
        target_percent_change: Decimal,
        duration_minutes: u32,
    ) -> Result<ControlDirective, RepositoryError> {
        let directive =
            ControlDirective::new(symbol, target_percent_change, duration_minutes, Utc::now())?;
        self.insert(directive.clone()).await;
        Ok(directive)
    }

    async fn deactivate(&self, symbol: &str) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().await;
        match records.get_mut(&normalize_symbol(symbol)) {
            Some(d) if d.active => {
                d.active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
