//! In-process mirror of the active directives

use super::{ControlDirective, DirectiveRepository};
use crate::quote::normalize_symbol;
use crate::telemetry::{increment, CounterMetric};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Active directives keyed by symbol, loaded from a repository
#[derive(Clone)]
pub struct DirectiveStore {
    repository: Arc<dyn DirectiveRepository>,
    active: Arc<RwLock<HashMap<String, ControlDirective>>>,
    last_refresh: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl DirectiveStore {
    /// Create an empty store; call [`refresh`](Self::refresh) to load it
    pub fn new(repository: Arc<dyn DirectiveRepository>) -> Self {
        Self {
            repository,
            active: Arc::new(RwLock::new(HashMap::new())),
            last_refresh: Arc::new(RwLock::new(None)),
        }
    }

    /// Backing repository
    pub fn repository(&self) -> &Arc<dyn DirectiveRepository> {
        &self.repository
    }

    /// Replace the in-memory set with the repository's active directives
    ///
    /// A failed fetch keeps the previous set.
    pub async fn refresh(&self) {
        let records = match self.repository.list_active().await {
            Ok(records) => records,
            Err(e) => {
                increment(CounterMetric::DirectiveRefreshFailure);
                tracing::warn!(error = %e, "Directive refresh failed, keeping previous set");
                return;
            }
        };

        let now = Utc::now();
        let fetched = records.len();
        let mut next: HashMap<String, ControlDirective> = HashMap::new();
        for directive in records.into_iter().filter(|d| d.active) {
            if directive.is_complete(now) {
                continue;
            }
            let symbol = normalize_symbol(&directive.symbol);
            // Several active rows for one symbol: the most recent wins
            match next.get(&symbol) {
                Some(existing) if existing.start_time >= directive.start_time => {}
                _ => {
                    next.insert(symbol, directive);
                }
            }
        }

        let loaded = next.len();
        *self.active.write().await = next;
        *self.last_refresh.write().await = Some(now);
        tracing::debug!(fetched, loaded, "Directives refreshed");
    }

    /// Running directive for `symbol`, if any
    pub async fn get_active(&self, symbol: &str) -> Option<ControlDirective> {
        self.get_active_at(symbol, Utc::now()).await
    }

    /// Held directive for `symbol`, complete or not
    ///
    /// Unlike [`get_active`](Self::get_active) this never retires anything,
    /// so a caller can apply the final target before calling
    /// [`retire`](Self::retire).
    pub async fn peek(&self, symbol: &str) -> Option<ControlDirective> {
        let symbol = normalize_symbol(symbol);
        self.active.read().await.get(&symbol).cloned()
    }

    /// Running directive for `symbol` as of `now`
    ///
    /// A directive whose duration has elapsed is removed from the store and
    /// reported as absent. The repository is not written.
    pub async fn get_active_at(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> Option<ControlDirective> {
        let symbol = normalize_symbol(symbol);
        {
            let active = self.active.read().await;
            match active.get(&symbol) {
                None => return None,
                Some(d) if !d.is_complete(now) => return Some(d.clone()),
                Some(_) => {}
            }
        }

        let mut active = self.active.write().await;
        // Re-check under the write lock; a refresh may have replaced it
        match active.get(&symbol) {
            Some(d) if d.is_complete(now) => {
                active.remove(&symbol);
                increment(CounterMetric::DirectiveRetired);
                tracing::info!(symbol = %symbol, "Directive reached its target, retired");
                None
            }
            Some(d) => Some(d.clone()),
            None => None,
        }
    }

    /// Remove `symbol`'s directive from the store
    pub async fn retire(&self, symbol: &str) -> bool {
        let symbol = normalize_symbol(symbol);
        let removed = self.active.write().await.remove(&symbol).is_some();
        if removed {
            increment(CounterMetric::DirectiveRetired);
            tracing::info!(symbol = %symbol, "Directive retired");
        }
        removed
    }

    /// Directives currently held, sorted by symbol
    pub async fn snapshot(&self) -> Vec<ControlDirective> {
        let active = self.active.read().await;
        let mut directives: Vec<_> = active.values().cloned().collect();
        directives.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        directives
    }

    /// Time of the last successful refresh
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read().await
    }
}
