//! Synthetic price generator
//!
//! No directive: `price = base * (1 + U)`, `U ~ Uniform[-noise, +noise]`.
//! With a directive: `price = base * (1 + target * progress / 100)` where
//! `progress = elapsed / duration`, reaching exactly `base * (1 + target/100)`
//! once the duration has elapsed.

use crate::directive::ControlDirective;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Resolution of the uniform draws (steps per unit interval)
const DRAW_STEPS: i64 = 1_000_000;

/// Synthesizer parameters
#[derive(Debug, Clone, Copy)]
pub struct SynthesizerConfig {
    /// Half-width of the symmetric noise band (0.005 = ±0.5%)
    pub noise_pct: Decimal,
    /// Lower bound for a pseudo base price
    pub pseudo_base_min: Decimal,
    /// Width of the pseudo base range
    pub pseudo_base_span: Decimal,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            noise_pct: dec!(0.005),
            pseudo_base_min: dec!(100),
            pseudo_base_span: dec!(400),
        }
    }
}

/// Output of one synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synthesis {
    /// Synthesized price
    pub price: Decimal,
    /// The directive has reached its target and should be retired
    pub directive_complete: bool,
}

/// Generates synthetic prices from a base price and an optional directive
#[derive(Debug, Clone, Default)]
pub struct PriceSynthesizer {
    config: SynthesizerConfig,
}

impl PriceSynthesizer {
    /// Create a synthesizer with the given parameters
    pub fn new(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    /// Parameters in use
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Synthesize a price for now
    pub fn synthesize(
        &self,
        base_price: Decimal,
        directive: Option<&ControlDirective>,
    ) -> Synthesis {
        self.synthesize_at(base_price, directive, Utc::now())
    }

    /// Synthesize a price as of `now`
    pub fn synthesize_at(
        &self,
        base_price: Decimal,
        directive: Option<&ControlDirective>,
        now: DateTime<Utc>,
    ) -> Synthesis {
        match directive {
            None => Synthesis {
                price: base_price * (Decimal::ONE + self.noise()),
                directive_complete: false,
            },
            Some(directive) if directive.is_complete(now) => {
                let target_pct = directive.target_percent_change;
                Synthesis {
                    price: base_price * (Decimal::ONE + target_pct / Decimal::ONE_HUNDRED),
                    directive_complete: true,
                }
            }
            Some(directive) => {
                let current_pct = directive.current_percent(now);
                Synthesis {
                    price: base_price * (Decimal::ONE + current_pct / Decimal::ONE_HUNDRED),
                    directive_complete: false,
                }
            }
        }
    }

    /// Base price for a symbol missing from the reference table
    pub fn pseudo_base(&self) -> Decimal {
        let step = rand::rng().random_range(0..DRAW_STEPS);
        self.config.pseudo_base_min
            + self.config.pseudo_base_span * Decimal::from(step) / Decimal::from(DRAW_STEPS)
    }

    fn noise(&self) -> Decimal {
        let step = rand::rng().random_range(-DRAW_STEPS..=DRAW_STEPS);
        self.config.noise_pct * Decimal::from(step) / Decimal::from(DRAW_STEPS)
    }
}
