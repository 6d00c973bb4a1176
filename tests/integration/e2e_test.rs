//! End-to-end tests over the file-backed configuration

use quote_engine::config::Config;
use quote_engine::directive::{DirectiveRepository, JsonFileRepository};
use quote_engine::engine::QuoteEngine;
use quote_engine::quote::QuoteOrigin;
use rust_decimal_macros::dec;

#[test]
fn test_config_example_exists() {
    let config = Config::example().unwrap();
    assert_eq!(config.provider.timeout_secs, 5);
    assert!(config.provider.api_key.is_none());
}

#[tokio::test]
async fn test_engine_from_config_with_file_directives() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directives.json");

    let toml = format!(
        r#"
        [directives]
        path = "{}"

        [base_prices]
        STLK = 40
        "#,
        path.display().to_string().replace('\\', "/")
    );
    let config: Config = toml::from_str(&toml).unwrap();

    // Operator writes through the persistence boundary
    JsonFileRepository::new(&path)
        .upsert("STLK", dec!(25), 60)
        .await
        .unwrap();

    let engine = QuoteEngine::from_config(&config).unwrap();
    engine.refresh_controls().await;

    let quotes = engine.resolve_all(&["stlk", "UNKNOWN"]).await;
    assert_eq!(quotes[0].symbol, "STLK");
    assert_eq!(quotes[0].source, QuoteOrigin::Synthetic);
    assert_eq!(quotes[0].reference_price(), dec!(40));
    // Drift has just started, so the price sits at the base
    assert!(quotes[0].price >= dec!(40) && quotes[0].price < dec!(40.01));
    assert_eq!(quotes[1].symbol, "UNKNOWN");
    assert_eq!(engine.stats().directed_quotes, 1);
}
