//! Batched resolution keeps input order

use crate::support::{engine_with, DelayedSource};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_order_preserved_under_latency() {
    let delays: HashMap<String, Duration> = [
        ("AAPL".to_string(), Duration::from_millis(150)),
        ("STLK".to_string(), Duration::from_millis(75)),
        ("TECH".to_string(), Duration::from_millis(0)),
    ]
    .into_iter()
    .collect();
    let (engine, _) = engine_with(Arc::new(DelayedSource { delays }));

    let quotes = engine.resolve_all(&["AAPL", "STLK", "TECH"]).await;

    assert_eq!(quotes.len(), 3);
    assert_eq!(quotes[0].symbol, "AAPL");
    assert_eq!(quotes[1].symbol, "STLK");
    assert_eq!(quotes[2].symbol, "TECH");
}

#[tokio::test]
async fn test_batch_runs_concurrently() {
    let delays: HashMap<String, Duration> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|s| (s.to_string(), Duration::from_millis(100)))
        .collect();
    let (engine, _) = engine_with(Arc::new(DelayedSource { delays }));

    let started = Instant::now();
    let quotes = engine.resolve_all(&["A", "B", "C", "D"]).await;

    assert_eq!(quotes.len(), 4);
    assert!(started.elapsed() < Duration::from_millis(350));
}
