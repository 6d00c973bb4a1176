//! Quote command implementation

use super::{print_quotes, symbols_or_all};
use crate::config::Config;
use crate::engine::QuoteEngine;
use clap::Args;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Symbols to quote (default: every symbol with a base price)
    pub symbols: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let engine = QuoteEngine::from_config(config)?;
        engine.refresh_controls().await;

        let symbols = symbols_or_all(&engine, &self.symbols);
        let quotes = engine.resolve_all(&symbols).await;
        print_quotes(&quotes, self.json)?;

        tracing::debug!(stats = ?engine.stats(), "Quote command finished");
        Ok(())
    }
}
