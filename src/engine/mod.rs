//! Quote engine module
//!
//! Resolves a symbol to a quote through the degradation ladder:
//!
//! 1. Fresh cache entry
//! 2. Live provider
//! 3. Synthesizer (base price + active directive)
//!
//! Resolution never fails; quality degrades instead. The engine is built
//! once at startup and shared by `Arc` with every caller.

mod batch;
mod stats;

pub use stats::{EngineStats, EngineStatsSnapshot};

use crate::cache::QuoteCache;
use crate::config::Config;
use crate::directive::{DirectiveStore, JsonFileRepository, QueueConfig, QueuedRepository};
use crate::error::SourceError;
use crate::quote::{normalize_symbol, Quote, QuoteOrigin};
use crate::source::{AlphaVantageConfig, AlphaVantageSource, MarketDataSource, OfflineSource};
use crate::synth::{BasePrices, PriceSynthesizer};
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use chrono::Utc;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Quote engine shared by all callers
pub struct QuoteEngine {
    cache: QuoteCache,
    source: Arc<dyn MarketDataSource>,
    directives: DirectiveStore,
    synthesizer: PriceSynthesizer,
    base_prices: BasePrices,
    stats: EngineStats,
}

impl QuoteEngine {
    /// Create an engine with default cache, synthesizer and base prices
    pub fn new(source: Arc<dyn MarketDataSource>, directives: DirectiveStore) -> Self {
        Self {
            cache: QuoteCache::default(),
            source,
            directives,
            synthesizer: PriceSynthesizer::default(),
            base_prices: BasePrices::default(),
            stats: EngineStats::default(),
        }
    }

    /// Build the engine described by `config`
    ///
    /// Without an API key the live tier is skipped entirely.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let source: Arc<dyn MarketDataSource> = match config.provider.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                Arc::new(AlphaVantageSource::new(AlphaVantageConfig {
                    base_url: config.provider.base_url.clone(),
                    api_key: key.to_string(),
                    timeout: Duration::from_secs(config.provider.timeout_secs),
                })?)
            }
            _ => {
                tracing::info!("No provider API key configured, quotes will be synthetic");
                Arc::new(OfflineSource)
            }
        };

        let repository = QueuedRepository::new(
            JsonFileRepository::new(&config.directives.path),
            QueueConfig {
                max_in_flight: config.directives.max_in_flight,
                max_queue_depth: config.directives.max_queue_depth,
            },
        );

        Ok(Self::new(source, DirectiveStore::new(Arc::new(repository)))
            .with_cache(QuoteCache::new(Duration::from_secs(config.engine.cache_ttl_secs)))
            .with_synthesizer(PriceSynthesizer::new(config.engine.synthesizer()))
            .with_base_prices(BasePrices::from_config(&config.base_prices)))
    }

    /// Replace the cache
    pub fn with_cache(mut self, cache: QuoteCache) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the synthesizer
    pub fn with_synthesizer(mut self, synthesizer: PriceSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Replace the base-price table
    pub fn with_base_prices(mut self, base_prices: BasePrices) -> Self {
        self.base_prices = base_prices;
        self
    }

    /// Resolve one symbol; always produces a quote
    pub async fn resolve(&self, symbol: &str) -> Quote {
        let symbol = normalize_symbol(symbol);
        let started = Instant::now();

        if let Some(quote) = self.cache.get(&symbol).await {
            increment(CounterMetric::CacheHit);
            self.stats.record_cache_hit();
            tracing::debug!(symbol = %symbol, "Cache hit");
            return quote;
        }
        increment(CounterMetric::CacheMiss);

        let quote = match self.source.try_fetch(&symbol).await {
            Some(quote) => {
                self.stats.record_live();
                quote
            }
            None => self.synthesize(&symbol).await,
        };

        self.cache.put(symbol, quote.clone()).await;
        record_latency(LatencyMetric::Resolve, started.elapsed());
        quote
    }

    async fn synthesize(&self, symbol: &str) -> Quote {
        let now = Utc::now();
        let base_price = match self.base_prices.get(symbol) {
            Some(price) => price,
            None => {
                let pseudo = self.synthesizer.pseudo_base();
                tracing::debug!(symbol, base = %pseudo, "No base price, using pseudo base");
                pseudo
            }
        };

        // The final target is applied once before the directive is retired
        let directive = self.directives.peek(symbol).await;
        let synthesis = self
            .synthesizer
            .synthesize_at(base_price, directive.as_ref(), now);
        if synthesis.directive_complete {
            self.directives.retire(symbol).await;
        }

        increment(CounterMetric::SyntheticQuote);
        self.stats.record_synthetic(directive.is_some());
        tracing::debug!(
            symbol,
            price = %synthesis.price,
            directed = directive.is_some(),
            "Synthetic quote"
        );

        Quote::from_reference(symbol, synthesis.price, base_price, now, QuoteOrigin::Synthetic)
    }

    /// Reload directives from the repository
    pub async fn refresh_controls(&self) {
        self.directives.refresh().await;
    }

    /// Drop every cached quote
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Refresh directives every `interval` until the engine is dropped
    pub fn spawn_refresh_task(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let engine: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match engine.upgrade() {
                    Some(engine) => engine.refresh_controls().await,
                    None => {
                        tracing::debug!("Engine dropped, stopping directive refresh");
                        break;
                    }
                }
            }
        })
    }

    /// Directive store
    pub fn directives(&self) -> &DirectiveStore {
        &self.directives
    }

    /// Base-price table
    pub fn base_prices(&self) -> &BasePrices {
        &self.base_prices
    }

    /// Counter snapshot
    pub fn stats(&self) -> EngineStatsSnapshot {
        self.stats.snapshot()
    }

    /// Name of the live source
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}
