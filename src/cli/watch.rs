//! Watch command implementation

use super::{print_quotes, symbols_or_all};
use crate::config::Config;
use crate::engine::QuoteEngine;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Symbols to watch (default: every symbol with a base price)
    pub symbols: Vec<String>,

    /// Seconds between polls
    #[arg(short, long, default_value = "5")]
    pub interval: u64,

    /// Stop after this many polls
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Print JSON lines instead of tables
    #[arg(long)]
    pub json: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let engine = Arc::new(QuoteEngine::from_config(config)?);
        engine.refresh_controls().await;
        let refresh_every = Duration::from_secs(config.engine.refresh_interval_secs.max(1));
        let refresher = engine.spawn_refresh_task(refresh_every);

        let symbols = symbols_or_all(&engine, &self.symbols);
        let mut ticker = tokio::time::interval(Duration::from_secs(self.interval.max(1)));
        let mut polls = 0u64;

        tracing::info!(symbols = ?symbols, interval_secs = self.interval, "Watching quotes");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let quotes = engine.resolve_all(&symbols).await;
                    print_quotes(&quotes, self.json)?;
                    if !self.json {
                        println!();
                    }
                    polls += 1;
                    if self.iterations.is_some_and(|limit| polls >= limit) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopping watch");
                    break;
                }
            }
        }

        refresher.abort();
        tracing::info!(stats = ?engine.stats(), "Watch finished");
        Ok(())
    }
}
