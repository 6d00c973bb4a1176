//! Quote cache
//!
//! Holds the most recent quote per symbol. Entries expire lazily: a stale
//! entry is reported as absent but stays in the map until the next `put`
//! for that symbol overwrites it.

use crate::quote::Quote;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Default time-to-live for cached quotes
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// A cached quote with the time it was stored
#[derive(Debug, Clone)]
struct CacheEntry {
    quote: Quote,
    cached_at: DateTime<Utc>,
}

/// Process-wide quote cache with lazy TTL expiry
#[derive(Clone)]
pub struct QuoteCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl QuoteCache {
    /// Create a cache with the given TTL
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl)
                .unwrap_or_else(|_| Duration::seconds(DEFAULT_CACHE_TTL_SECS as i64)),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Configured TTL
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh quote for `symbol`, if any
    pub async fn get(&self, symbol: &str) -> Option<Quote> {
        self.get_at(symbol, Utc::now()).await
    }

    /// Fresh quote for `symbol` as of `now`
    pub async fn get_at(&self, symbol: &str, now: DateTime<Utc>) -> Option<Quote> {
        let entries = self.entries.read().await;
        let entry = entries.get(symbol)?;
        if now - entry.cached_at < self.ttl {
            Some(entry.quote.clone())
        } else {
            None
        }
    }

    /// Store `quote` under `symbol`, replacing any previous entry
    pub async fn put(&self, symbol: impl Into<String>, quote: Quote) {
        self.put_at(symbol, quote, Utc::now()).await;
    }

    /// Store `quote` with an explicit cache timestamp
    pub async fn put_at(&self, symbol: impl Into<String>, quote: Quote, cached_at: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        entries.insert(symbol.into(), CacheEntry { quote, cached_at });
    }

    /// Drop every entry
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        tracing::info!(dropped, "Quote cache cleared");
    }

    /// Number of stored entries, stale ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries at all
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}
