use clap::Parser;
use quote_engine::cli::{Cli, Commands};
use quote_engine::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::example()?
        }
    };

    // Initialize telemetry
    let _telemetry = quote_engine::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Quote(args) => args.execute(&config).await?,
        Commands::Watch(args) => args.execute(&config).await?,
        Commands::Drift(args) => args.execute(&config).await?,
        Commands::Halt(args) => args.execute(&config).await?,
        Commands::Directives(args) => args.execute(&config).await?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Engine: cache_ttl={}s noise=±{}% refresh={}s",
                config.engine.cache_ttl_secs,
                config.engine.noise_pct * rust_decimal_macros::dec!(100),
                config.engine.refresh_interval_secs
            );
            println!(
                "  Provider: {} (live: {}, timeout {}s)",
                config.provider.base_url,
                config.provider.api_key.is_some(),
                config.provider.timeout_secs
            );
            println!("  Directives: {}", config.directives.path.display());
            println!("  Base prices: {} symbols", config.base_prices.len());
        }
    }

    Ok(())
}
