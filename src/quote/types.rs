//! Quote types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where the price of a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteOrigin {
    /// Upstream market-data provider
    Live,
    /// Local price synthesizer
    Synthetic,
}

impl std::fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteOrigin::Live => f.pad("live"),
            QuoteOrigin::Synthetic => f.pad("synthetic"),
        }
    }
}

/// A priced observation for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,
    /// Current price
    pub price: Decimal,
    /// Price minus the reference price
    pub absolute_change: Decimal,
    /// Absolute change as a percentage of the reference price
    pub percent_change: Decimal,
    /// When the price was observed
    pub observed_at: DateTime<Utc>,
    /// Provenance of the price
    pub source: QuoteOrigin,
}

impl Quote {
    /// Build a quote whose changes are derived from `reference_price`
    ///
    /// A non-positive reference yields zero changes instead of dividing by zero.
    pub fn from_reference(
        symbol: impl Into<String>,
        price: Decimal,
        reference_price: Decimal,
        observed_at: DateTime<Utc>,
        source: QuoteOrigin,
    ) -> Self {
        let (absolute_change, percent_change) = if reference_price > Decimal::ZERO {
            let change = price - reference_price;
            (change, change / reference_price * Decimal::ONE_HUNDRED)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Self {
            symbol: symbol.into(),
            price,
            absolute_change,
            percent_change,
            observed_at,
            source,
        }
    }

    /// Reference price implied by `price - absolute_change`
    pub fn reference_price(&self) -> Decimal {
        self.price - self.absolute_change
    }

    /// Whether the price came from the upstream provider
    pub fn is_live(&self) -> bool {
        self.source == QuoteOrigin::Live
    }
}
