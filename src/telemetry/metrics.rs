//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Round trip to the live provider
    LiveFetch,
    /// Full resolution of one symbol
    Resolve,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Fresh cache entry served
    CacheHit,
    /// No fresh cache entry
    CacheMiss,
    /// Live provider answered
    LiveQuote,
    /// Live provider failed, falling back
    LiveFallback,
    /// Price produced by the synthesizer
    SyntheticQuote,
    /// Directive dropped after reaching its target
    DirectiveRetired,
    /// Directive refresh could not reach the repository
    DirectiveRefreshFailure,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::CacheHit => "quote_cache_hits_total",
            CounterMetric::CacheMiss => "quote_cache_misses_total",
            CounterMetric::LiveQuote => "quote_live_total",
            CounterMetric::LiveFallback => "quote_live_fallback_total",
            CounterMetric::SyntheticQuote => "quote_synthetic_total",
            CounterMetric::DirectiveRetired => "directive_retired_total",
            CounterMetric::DirectiveRefreshFailure => "directive_refresh_failures_total",
        }
    }
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::LiveFetch => "quote_live_fetch_latency_ms",
            LatencyMetric::Resolve => "quote_resolve_latency_ms",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1000.0;
    ::metrics::histogram!(metric.name()).record(value_ms);
    tracing::trace!(metric = metric.name(), value_ms, "Recording latency");
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}
