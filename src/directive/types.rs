//! Control directive types

use crate::error::RepositoryError;
use crate::quote::normalize_symbol;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MILLIS_PER_MINUTE: Decimal = dec!(60000);

/// Operator instruction to drift a symbol's synthetic price toward a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDirective {
    /// Record identifier at the persistence boundary
    pub id: Uuid,
    /// Symbol the directive applies to
    pub symbol: String,
    /// Signed target change in percent (10 = +10%)
    pub target_percent_change: Decimal,
    /// Minutes over which the target is reached
    pub duration_minutes: u32,
    /// When the drift started
    pub start_time: DateTime<Utc>,
    /// Persisted active flag
    pub active: bool,
}

impl ControlDirective {
    /// Create an active directive starting at `start_time`
    pub fn new(
        symbol: &str,
        target_percent_change: Decimal,
        duration_minutes: u32,
        start_time: DateTime<Utc>,
    ) -> Result<Self, RepositoryError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(RepositoryError::InvalidDirective("empty symbol".to_string()));
        }
        if duration_minutes == 0 {
            return Err(RepositoryError::InvalidDirective(format!(
                "duration for {} must be at least one minute",
                symbol
            )));
        }
        if target_percent_change <= dec!(-100) {
            return Err(RepositoryError::InvalidDirective(format!(
                "target {}% for {} would drive the price to zero",
                target_percent_change, symbol
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            symbol,
            target_percent_change,
            duration_minutes,
            start_time,
            active: true,
        })
    }

    /// Minutes elapsed since `start_time`, floored at zero
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> Decimal {
        let millis = (now - self.start_time).num_milliseconds().max(0);
        Decimal::from(millis) / MILLIS_PER_MINUTE
    }

    /// Whether the full duration has elapsed
    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        self.elapsed_minutes(now) >= Decimal::from(self.duration_minutes)
    }

    /// Fraction of the duration elapsed, clamped to `[0, 1]`
    pub fn progress(&self, now: DateTime<Utc>) -> Decimal {
        if self.is_complete(now) {
            return Decimal::ONE;
        }
        self.elapsed_minutes(now) / Decimal::from(self.duration_minutes)
    }

    /// Percent change applied at `now`
    pub fn current_percent(&self, now: DateTime<Utc>) -> Decimal {
        self.target_percent_change * self.progress(now)
    }

    /// When the directive reaches its target
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.start_time + chrono::Duration::minutes(self.duration_minutes as i64)
    }
}
