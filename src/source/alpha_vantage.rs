//! Alpha Vantage GLOBAL_QUOTE client

use super::{MarketDataSource, DEFAULT_FETCH_TIMEOUT};
use crate::error::SourceError;
use crate::quote::{normalize_symbol, Quote, QuoteOrigin};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Alpha Vantage API base URL
pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co";

/// Configuration for the Alpha Vantage client
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    /// Base URL for the API
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// Config for the public endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: ALPHA_VANTAGE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Live quote source backed by Alpha Vantage
pub struct AlphaVantageSource {
    config: AlphaVantageConfig,
    client: Client,
}

impl AlphaVantageSource {
    /// Create a new client
    pub fn new(config: AlphaVantageConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Parse a GLOBAL_QUOTE response body into a quote for `symbol`
    fn parse_response(symbol: &str, body: &str) -> Result<Quote, SourceError> {
        let response: GlobalQuoteResponse =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        if let Some(notice) = response.note.or(response.information) {
            return Err(SourceError::Throttled(notice));
        }
        if let Some(message) = response.error_message {
            return Err(SourceError::Malformed(message));
        }

        let global = response
            .global_quote
            .ok_or_else(|| SourceError::Malformed("missing Global Quote".to_string()))?;

        let price = parse_decimal("price", global.price.as_deref())?;
        if price <= Decimal::ZERO {
            return Err(SourceError::Malformed(format!("non-positive price {}", price)));
        }
        let absolute_change = parse_decimal("change", global.change.as_deref())?;
        let percent_change = parse_percent(global.change_percent.as_deref())?;

        Ok(Quote {
            symbol: normalize_symbol(symbol),
            price,
            absolute_change,
            percent_change,
            observed_at: Utc::now(),
            source: QuoteOrigin::Live,
        })
    }
}

#[async_trait]
impl MarketDataSource for AlphaVantageSource {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, SourceError> {
        let url = format!("{}/query", self.config.base_url);
        let symbol = normalize_symbol(symbol);

        tracing::debug!(url = %url, symbol = %symbol, "Fetching GLOBAL_QUOTE");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol.as_str()),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(SourceError::Throttled("HTTP 429".to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_response(&symbol, &body)
    }
}

/// Raw response envelope
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    /// Rate-limit notice
    #[serde(rename = "Note")]
    note: Option<String>,
    /// Quota notice
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

/// Quote body; every value arrives as a string
#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    /// Carries a trailing `%`, e.g. "0.9193%"
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

fn parse_decimal(field: &str, value: Option<&str>) -> Result<Decimal, SourceError> {
    let raw = value.ok_or_else(|| SourceError::Malformed(format!("missing {}", field)))?;
    Decimal::from_str(raw.trim())
        .map_err(|e| SourceError::Malformed(format!("bad {} {:?}: {}", field, raw, e)))
}

/// Parse "1.23%" (or "1.23") into 1.23
fn parse_percent(value: Option<&str>) -> Result<Decimal, SourceError> {
    let raw = value.ok_or_else(|| SourceError::Malformed("missing change percent".to_string()))?;
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_decimal("change percent", Some(number))
}
