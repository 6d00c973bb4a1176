//! Configuration types for quote-engine

use crate::synth::SynthesizerConfig;
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Bundled example configuration, used when no config file can be read
pub const EXAMPLE_CONFIG: &str = include_str!("../config.toml.example");

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub directives: DirectivesConfig,
    /// Reference price per symbol; empty means the built-in table
    #[serde(default)]
    pub base_prices: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Quote engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Seconds a cached quote stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Half-width of the synthetic noise band (0.005 = ±0.5%)
    #[serde(default = "default_noise_pct")]
    pub noise_pct: Decimal,

    /// Lower bound of the pseudo base price for unknown symbols
    #[serde(default = "default_pseudo_base_min")]
    pub pseudo_base_min: Decimal,

    /// Width of the pseudo base price range
    #[serde(default = "default_pseudo_base_span")]
    pub pseudo_base_span: Decimal,

    /// Seconds between directive refreshes in long-running commands
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    60
}
fn default_noise_pct() -> Decimal {
    Decimal::new(5, 3) // 0.005 = 0.5%
}
fn default_pseudo_base_min() -> Decimal {
    Decimal::new(100, 0)
}
fn default_pseudo_base_span() -> Decimal {
    Decimal::new(400, 0)
}
fn default_refresh_interval_secs() -> u64 {
    30
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            noise_pct: default_noise_pct(),
            pseudo_base_min: default_pseudo_base_min(),
            pseudo_base_span: default_pseudo_base_span(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl EngineConfig {
    /// Synthesizer parameters from this section
    ///
    /// Values that could yield a non-positive price are replaced by their
    /// defaults: `noise_pct` must lie in `[0, 1)`, `pseudo_base_min` must be
    /// positive and `pseudo_base_span` non-negative.
    pub fn synthesizer(&self) -> SynthesizerConfig {
        let noise_pct = if self.noise_pct >= Decimal::ZERO && self.noise_pct < Decimal::ONE {
            self.noise_pct
        } else {
            tracing::warn!(value = %self.noise_pct, "Ignoring invalid noise_pct");
            default_noise_pct()
        };
        let pseudo_base_min = if self.pseudo_base_min > Decimal::ZERO {
            self.pseudo_base_min
        } else {
            tracing::warn!(value = %self.pseudo_base_min, "Ignoring invalid pseudo_base_min");
            default_pseudo_base_min()
        };
        let pseudo_base_span = if self.pseudo_base_span >= Decimal::ZERO {
            self.pseudo_base_span
        } else {
            tracing::warn!(value = %self.pseudo_base_span, "Ignoring invalid pseudo_base_span");
            default_pseudo_base_span()
        };

        SynthesizerConfig {
            noise_pct,
            pseudo_base_min,
            pseudo_base_span,
        }
    }
}

/// Live market-data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// API key; absent disables the live tier
    #[serde(default)]
    pub api_key: Option<String>,

    /// Hard bound on one live request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider_url() -> String {
    crate::source::ALPHA_VANTAGE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    5
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Directive persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectivesConfig {
    /// JSON file holding directive records
    #[serde(default = "default_directives_path")]
    pub path: PathBuf,

    /// Concurrent operations allowed against the file
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Waiting operations tolerated before rejecting
    #[serde(default = "default_max_queue_depth")]
    pub max_queue_depth: usize,
}

fn default_directives_path() -> PathBuf {
    PathBuf::from("./data/directives.json")
}
fn default_max_in_flight() -> usize {
    1
}
fn default_max_queue_depth() -> usize {
    32
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            path: default_directives_path(),
            max_in_flight: default_max_in_flight(),
            max_queue_depth: default_max_queue_depth(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Port for the Prometheus exporter; absent disables it
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse the bundled example configuration
    pub fn example() -> anyhow::Result<Self> {
        Ok(toml::from_str(EXAMPLE_CONFIG)?)
    }
}
