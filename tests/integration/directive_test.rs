//! Operator directives through the engine

use crate::support::{engine_with, FailingSource};
use chrono::{Duration, Utc};
use quote_engine::directive::{ControlDirective, DirectiveRepository, DirectiveStore};
use quote_engine::synth::PriceSynthesizer;
use rust_decimal_macros::dec;
use std::sync::Arc;

#[tokio::test]
async fn test_convergence_half_and_full() {
    let (_, repo) = engine_with(Arc::new(FailingSource::default()));
    let start = Utc::now();
    repo.insert(ControlDirective::new("AAPL", dec!(10), 60, start).unwrap())
        .await;

    let store = DirectiveStore::new(repo.clone());
    store.refresh().await;
    let synth = PriceSynthesizer::default();
    let base = dec!(175.50);

    let halfway = start + Duration::minutes(30);
    let directive = store.get_active_at("AAPL", halfway).await.unwrap();
    let mid = synth.synthesize_at(base, Some(&directive), halfway);
    assert_eq!(mid.price, base * dec!(1.05));

    let end = start + Duration::minutes(60);
    let done = synth.synthesize_at(base, Some(&directive), end);
    assert_eq!(done.price, base * dec!(1.10));
    assert!(done.directive_complete);
    assert!(store.get_active_at("AAPL", end).await.is_none());
}

#[tokio::test]
async fn test_upsert_twice_leaves_one_directive() {
    let (engine, repo) = engine_with(Arc::new(FailingSource::default()));

    repo.upsert("STLK", dec!(10), 60).await.unwrap();
    let last = repo.upsert("STLK", dec!(-10), 60).await.unwrap();
    engine.refresh_controls().await;

    let active = engine.directives().snapshot().await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, last.id);
    assert_eq!(active[0].target_percent_change, dec!(-10));
}

#[tokio::test]
async fn test_engine_price_follows_directive() {
    let (engine, repo) = engine_with(Arc::new(FailingSource::default()));
    let start = Utc::now() - Duration::minutes(45);
    repo.insert(ControlDirective::new("TECH", dec!(-20), 60, start).unwrap())
        .await;
    engine.refresh_controls().await;

    let quote = engine.resolve("TECH").await;

    // 45 of 60 minutes into -20%: about -15% from 120
    assert!(quote.price <= dec!(102.00) && quote.price > dec!(101.99), "{}", quote.price);
    assert!(quote.percent_change < dec!(-14.99));
}

#[tokio::test]
async fn test_expired_directive_not_applied() {
    let (engine, repo) = engine_with(Arc::new(FailingSource::default()));
    let start = Utc::now() - Duration::minutes(61);
    repo.insert(ControlDirective::new("TECH", dec!(50), 60, start).unwrap())
        .await;
    engine.refresh_controls().await;

    let quote = engine.resolve("TECH").await;

    assert!(quote.price <= dec!(120.60));
    assert_eq!(engine.stats().directed_quotes, 0);
    // Still active at the persistence boundary until an operator clears it
    assert_eq!(repo.list_active().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_engine_lands_on_target_when_directive_completes() {
    let (engine, repo) = engine_with(Arc::new(FailingSource::default()));
    // Ends 300ms from now
    let start = Utc::now() - Duration::minutes(1) + Duration::milliseconds(300);
    repo.insert(ControlDirective::new("TECH", dec!(10), 1, start).unwrap())
        .await;
    engine.refresh_controls().await;
    assert!(engine.directives().peek("TECH").await.is_some());

    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let quote = engine.resolve("TECH").await;
    assert_eq!(quote.price, dec!(132));
    assert_eq!(quote.percent_change, dec!(10));
    assert_eq!(engine.stats().directed_quotes, 1);
    assert!(engine.directives().peek("TECH").await.is_none());

    // Once retired the symbol is back to noise around its base
    engine.clear_cache().await;
    let after = engine.resolve("TECH").await;
    assert!(after.price >= dec!(119.4) && after.price <= dec!(120.6), "{}", after.price);
    assert_eq!(engine.stats().directed_quotes, 1);
    // The persisted record is left for the operator
    assert_eq!(repo.list_active().await.unwrap().len(), 1);
}
