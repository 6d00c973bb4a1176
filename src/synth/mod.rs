//! Price synthesis module
//!
//! Produces prices when no live quote is available. Without a directive the
//! price jitters symmetrically around its base; with one it walks linearly
//! from the base toward `base * (1 + target / 100)` over the directive's
//! duration, so an operator drift never shows up as a single-tick jump.

mod base;
mod synthesizer;

pub use base::{BasePrices, DEFAULT_BASE_PRICES};
pub use synthesizer::{PriceSynthesizer, Synthesis, SynthesizerConfig};
