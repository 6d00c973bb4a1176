//! Static base-price table

use crate::quote::normalize_symbol;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};

/// Built-in reference prices used when the config provides none
pub const DEFAULT_BASE_PRICES: &[(&str, Decimal)] = &[
    ("AAPL", dec!(175.50)),
    ("MSFT", dec!(378.90)),
    ("GOOGL", dec!(140.25)),
    ("AMZN", dec!(145.80)),
    ("TSLA", dec!(248.30)),
    ("NVDA", dec!(495.20)),
    ("STLK", dec!(42.00)),
    ("TECH", dec!(120.00)),
];

/// Reference price per symbol, fixed at startup
#[derive(Debug, Clone)]
pub struct BasePrices {
    prices: HashMap<String, Decimal>,
}

impl BasePrices {
    /// Build from `(symbol, price)` pairs; non-positive prices are skipped
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut prices = HashMap::new();
        for (symbol, price) in entries {
            let symbol = normalize_symbol(symbol.as_ref());
            if price <= Decimal::ZERO || symbol.is_empty() {
                tracing::warn!(symbol = %symbol, %price, "Ignoring invalid base price");
                continue;
            }
            prices.insert(symbol, price);
        }
        Self { prices }
    }

    /// Build from a config table, falling back to the built-in one when empty
    pub fn from_config(table: &BTreeMap<String, Decimal>) -> Self {
        if table.is_empty() {
            Self::default()
        } else {
            Self::new(table.iter().map(|(s, p)| (s.as_str(), *p)))
        }
    }

    /// Reference price for `symbol`
    pub fn get(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(&normalize_symbol(symbol)).copied()
    }

    /// Known symbols, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<_> = self.prices.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Number of symbols in the table
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for BasePrices {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PRICES.iter().copied())
    }
}
