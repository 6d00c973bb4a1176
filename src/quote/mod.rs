//! Quote data model
//!
//! A [`Quote`] is a priced observation for one symbol at one point in time.
//! Quotes are immutable once built; a newer resolution for the same symbol
//! supersedes the old value rather than mutating it.

mod types;

pub use types::{Quote, QuoteOrigin};

/// Normalize a caller-supplied symbol (trimmed, upper-case)
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
