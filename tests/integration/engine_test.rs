//! Degradation ladder: cache, live source, synthesizer

use crate::support::{engine_with, CountingSource, FailingSource, HangingSource};
use quote_engine::cache::QuoteCache;
use quote_engine::quote::QuoteOrigin;
use rust_decimal_macros::dec;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_live_quote_is_cached() {
    let source = Arc::new(CountingSource::default());
    let (engine, _) = engine_with(source.clone());

    let first = engine.resolve("AAPL").await;
    let second = engine.resolve("AAPL").await;

    assert_eq!(first, second);
    assert_eq!(first.source, QuoteOrigin::Live);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.stats().cache_hits, 1);
}

#[tokio::test]
async fn test_cache_expiry_reaches_source_again() {
    let source = Arc::new(CountingSource::default());
    let (engine, _) = engine_with(source.clone());
    let engine = engine.with_cache(QuoteCache::new(Duration::from_millis(50)));

    let first = engine.resolve("AAPL").await;
    let second = engine.resolve("AAPL").await;
    assert_eq!(first, second);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let third = engine.resolve("AAPL").await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_ne!(second.price, third.price);
}

#[tokio::test]
async fn test_failed_source_falls_back_to_synthetic() {
    let source = Arc::new(FailingSource::default());
    let (engine, _) = engine_with(source.clone());

    let quote = engine.resolve("TECH").await;

    assert_eq!(quote.source, QuoteOrigin::Synthetic);
    assert_eq!(quote.reference_price(), dec!(120.00));
    assert!(quote.price >= dec!(119.40) && quote.price <= dec!(120.60));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_synthetic_fallback_is_cached_too() {
    let source = Arc::new(FailingSource::default());
    let (engine, _) = engine_with(source.clone());

    let first = engine.resolve("TECH").await;
    let second = engine.resolve("TECH").await;

    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.stats().synthetic_quotes, 1);
}

#[tokio::test]
async fn test_timeout_bounds_total_latency() {
    let (engine, _) = engine_with(Arc::new(HangingSource {
        timeout: Duration::from_millis(100),
    }));

    let started = Instant::now();
    let quote = engine.resolve("AAPL").await;
    let elapsed = started.elapsed();

    assert_eq!(quote.source, QuoteOrigin::Synthetic);
    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_millis(1000), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_quote_invariants_hold() {
    let (engine, _) = engine_with(Arc::new(FailingSource::default()));
    let quote = engine.resolve("MSFT").await;

    let reference = quote.reference_price();
    assert_eq!(quote.absolute_change, quote.price - reference);
    assert_eq!(
        quote.percent_change,
        quote.absolute_change / reference * dec!(100)
    );
}
