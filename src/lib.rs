//! quote-engine: stock quotes that always answer
//!
//! This library provides:
//! - A TTL quote cache with lazy expiry
//! - Live quotes from an upstream provider with a hard timeout
//! - Synthetic prices around a static base-price table
//! - Operator drift directives that move a price linearly toward a target
//! - Concurrent, order-preserving batch resolution
//! - Structured logging and Prometheus metrics

pub mod cache;
pub mod cli;
pub mod config;
pub mod directive;
pub mod engine;
pub mod error;
pub mod quote;
pub mod source;
pub mod synth;
pub mod telemetry;
