//! CLI interface for quote-engine
//!
//! Provides subcommands for:
//! - `quote`: Resolve quotes once
//! - `watch`: Resolve quotes on an interval
//! - `drift`: Issue a drift directive for a symbol
//! - `halt`: Deactivate a symbol's directive
//! - `directives`: List active directives
//! - `config`: Show configuration

mod directive;
mod quote;
mod watch;

pub use directive::{DirectivesArgs, DriftArgs, HaltArgs};
pub use quote::QuoteArgs;
pub use watch::WatchArgs;

use crate::engine::QuoteEngine;
use crate::quote::Quote;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quote-engine")]
#[command(about = "Stock quotes with live/synthetic fallback and operator drift directives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve quotes once
    Quote(QuoteArgs),
    /// Resolve quotes on an interval
    Watch(WatchArgs),
    /// Drift a symbol toward a target percent change
    Drift(DriftArgs),
    /// Deactivate a symbol's directive
    Halt(HaltArgs),
    /// List active directives
    Directives(DirectivesArgs),
    /// Show configuration
    Config,
}

/// Symbols to resolve: the given ones, or every known symbol
fn symbols_or_all(engine: &QuoteEngine, symbols: &[String]) -> Vec<String> {
    if symbols.is_empty() {
        engine.base_prices().symbols()
    } else {
        symbols.to_vec()
    }
}

/// Print quotes as a table or as a JSON array
fn print_quotes(quotes: &[Quote], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(quotes)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>12} {:>10} {:>9}  {:<9} {}",
        "SYMBOL", "PRICE", "CHANGE", "CHANGE%", "SOURCE", "OBSERVED"
    );
    for q in quotes {
        println!(
            "{:<8} {:>12} {:>10} {:>8}%  {:<9} {}",
            q.symbol,
            q.price.round_dp(2),
            q.absolute_change.round_dp(2),
            q.percent_change.round_dp(2),
            q.source,
            q.observed_at.format("%H:%M:%S"),
        );
    }
    Ok(())
}
