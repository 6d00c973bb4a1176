//! Stub market-data sources shared by the integration tests

use async_trait::async_trait;
use chrono::Utc;
use quote_engine::directive::{DirectiveStore, InMemoryRepository};
use quote_engine::engine::QuoteEngine;
use quote_engine::error::SourceError;
use quote_engine::quote::{Quote, QuoteOrigin};
use quote_engine::source::MarketDataSource;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Answers every symbol with a fixed live price, counting calls
#[derive(Default)]
pub struct CountingSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl MarketDataSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, SourceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as i64;
        Ok(Quote::from_reference(
            symbol,
            dec!(100) + rust_decimal::Decimal::from(n),
            dec!(100),
            Utc::now(),
            QuoteOrigin::Live,
        ))
    }
}

/// Always fails with a transport-style error, counting calls
#[derive(Default)]
pub struct FailingSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl MarketDataSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self, _symbol: &str) -> Result<Quote, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::Malformed("missing price".to_string()))
    }
}

/// Never answers within its own timeout
pub struct HangingSource {
    pub timeout: Duration,
}

#[async_trait]
impl MarketDataSource for HangingSource {
    fn name(&self) -> &'static str {
        "hanging"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, _symbol: &str) -> Result<Quote, SourceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(SourceError::Disabled)
    }
}

/// Live source with a per-symbol delay
pub struct DelayedSource {
    pub delays: HashMap<String, Duration>,
}

#[async_trait]
impl MarketDataSource for DelayedSource {
    fn name(&self) -> &'static str {
        "delayed"
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, SourceError> {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        Ok(Quote::from_reference(symbol, dec!(50), dec!(49), Utc::now(), QuoteOrigin::Live))
    }
}

/// Engine over `source` with an empty in-memory directive repository
pub fn engine_with(source: Arc<dyn MarketDataSource>) -> (QuoteEngine, Arc<InMemoryRepository>) {
    let repo = Arc::new(InMemoryRepository::new());
    let engine = QuoteEngine::new(source, DirectiveStore::new(repo.clone()));
    (engine, repo)
}
