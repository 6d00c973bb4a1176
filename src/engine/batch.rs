//! Batched resolution

use super::QuoteEngine;
use crate::quote::Quote;
use futures_util::future::join_all;

impl QuoteEngine {
    /// Resolve every symbol concurrently, preserving input order
    ///
    /// Output is one-to-one with `symbols`, duplicates included. Duplicates
    /// are resolved independently, so a symbol that misses the cache can get
    /// a different quote in each position; the last one written stays cached.
    pub async fn resolve_all<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<Quote> {
        join_all(symbols.iter().map(|s| self.resolve(s.as_ref()))).await
    }
}
