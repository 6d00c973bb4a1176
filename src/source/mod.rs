//! Live quote source module
//!
//! Fetches quotes from an upstream market-data provider. Every failure mode
//! (timeout, transport, bad status, throttling, malformed payload) collapses
//! into `None` from [`MarketDataSource::try_fetch`], which tells the engine to
//! fall back to synthesis.

mod alpha_vantage;
mod offline;

pub use alpha_vantage::{AlphaVantageConfig, AlphaVantageSource, ALPHA_VANTAGE_URL};
pub use offline::OfflineSource;

use crate::error::SourceError;
use crate::quote::Quote;
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Upper bound on a single live fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for live quote providers
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Hard bound applied by [`try_fetch`](Self::try_fetch)
    fn timeout(&self) -> Duration {
        DEFAULT_FETCH_TIMEOUT
    }

    /// Fetch one quote, reporting why it failed
    async fn fetch(&self, symbol: &str) -> Result<Quote, SourceError>;

    /// Fetch one quote within [`timeout`](Self::timeout); `None` means fall back
    async fn try_fetch(&self, symbol: &str) -> Option<Quote> {
        let bound = self.timeout();
        let started = Instant::now();
        let result = match tokio::time::timeout(bound, self.fetch(symbol)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(bound)),
        };
        record_latency(LatencyMetric::LiveFetch, started.elapsed());

        match result {
            Ok(quote) => {
                increment(CounterMetric::LiveQuote);
                tracing::debug!(source = self.name(), symbol, price = %quote.price, "Live quote");
                Some(quote)
            }
            Err(SourceError::Disabled) => None,
            Err(e) => {
                increment(CounterMetric::LiveFallback);
                tracing::warn!(
                    source = self.name(),
                    symbol,
                    error = %e,
                    "Live quote unavailable, falling back"
                );
                None
            }
        }
    }
}
