//! Engine statistics

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by the engine
#[derive(Debug, Default)]
pub struct EngineStats {
    cache_hits: AtomicU64,
    live_quotes: AtomicU64,
    synthetic_quotes: AtomicU64,
    directed_quotes: AtomicU64,
}

/// Point-in-time copy of [`EngineStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStatsSnapshot {
    /// Resolutions answered from cache
    pub cache_hits: u64,
    /// Resolutions answered by the live source
    pub live_quotes: u64,
    /// Resolutions answered by the synthesizer
    pub synthetic_quotes: u64,
    /// Synthetic resolutions that followed a directive
    pub directed_quotes: u64,
}

impl EngineStatsSnapshot {
    /// Total resolutions
    pub fn total(&self) -> u64 {
        self.cache_hits + self.live_quotes + self.synthetic_quotes
    }
}

impl EngineStats {
    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_live(&self) {
        self.live_quotes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_synthetic(&self, directed: bool) {
        self.synthetic_quotes.fetch_add(1, Ordering::Relaxed);
        if directed {
            self.directed_quotes.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Copy the current counters
    pub fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            live_quotes: self.live_quotes.load(Ordering::Relaxed),
            synthetic_quotes: self.synthetic_quotes.load(Ordering::Relaxed),
            directed_quotes: self.directed_quotes.load(Ordering::Relaxed),
        }
    }
}
