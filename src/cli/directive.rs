//! Directive administration commands

use crate::config::Config;
use crate::directive::{DirectiveRepository, JsonFileRepository};
use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct DriftArgs {
    /// Symbol to drift
    pub symbol: String,

    /// Signed target change in percent (e.g. 10 or -5)
    #[arg(long, allow_hyphen_values = true)]
    pub target_pct: Decimal,

    /// Minutes over which the target is reached
    #[arg(long, default_value = "60")]
    pub minutes: u32,
}

impl DriftArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repo = JsonFileRepository::new(&config.directives.path);
        let directive = repo
            .upsert(&self.symbol, self.target_pct, self.minutes)
            .await?;

        println!(
            "{} drifting {}% over {} min (until {})",
            directive.symbol,
            directive.target_percent_change,
            directive.duration_minutes,
            directive.ends_at().format("%Y-%m-%d %H:%M:%S UTC"),
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct HaltArgs {
    /// Symbol whose directive should stop
    pub symbol: String,
}

impl HaltArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repo = JsonFileRepository::new(&config.directives.path);
        if repo.deactivate(&self.symbol).await? {
            println!("{} directive deactivated", self.symbol.to_uppercase());
        } else {
            println!("{} has no active directive", self.symbol.to_uppercase());
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DirectivesArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl DirectivesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repo = JsonFileRepository::new(&config.directives.path);
        let mut directives = repo.list_active().await?;
        directives.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        if self.json {
            println!("{}", serde_json::to_string(&directives)?);
            return Ok(());
        }

        if directives.is_empty() {
            println!("No active directives");
            return Ok(());
        }

        let now = Utc::now();
        println!(
            "{:<8} {:>9} {:>8} {:>9}  {}",
            "SYMBOL", "TARGET%", "MINUTES", "PROGRESS", "STARTED"
        );
        for d in &directives {
            let progress = (d.progress(now) * Decimal::ONE_HUNDRED).round_dp(1);
            let state = if d.is_complete(now) { " (done)" } else { "" };
            println!(
                "{:<8} {:>9} {:>8} {:>8}%  {}{}",
                d.symbol,
                d.target_percent_change,
                d.duration_minutes,
                progress,
                d.start_time.format("%Y-%m-%d %H:%M:%S"),
                state,
            );
        }
        Ok(())
    }
}
