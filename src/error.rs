//! Error types for the quote engine
//!
//! Quote resolution itself never fails; these errors live at the edges. A
//! [`SourceError`] never escapes the live adapter (it is turned into a
//! fallback), and a [`RepositoryError`] never escapes `DirectiveStore::refresh`.

use thiserror::Error;

/// Failure while fetching a live quote
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request did not complete within the configured bound
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("provider returned HTTP {0}")]
    Status(u16),

    /// Provider answered with a rate-limit or quota notice
    #[error("provider throttled the request: {0}")]
    Throttled(String),

    /// Payload missing a field or carrying an unparsable value
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// No provider is configured
    #[error("live source disabled")]
    Disabled,
}

/// Failure at the directive persistence boundary
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored records could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directive parameters rejected before being written
    #[error("invalid directive: {0}")]
    InvalidDirective(String),

    /// Work queue is full; callers should back off
    #[error("persistence queue full ({depth} waiting)")]
    Backpressure {
        /// Number of operations already waiting for a slot
        depth: usize,
    },

    /// Work queue has been shut down
    #[error("persistence queue closed")]
    Closed,

    /// Backend-specific failure
    #[error("backend error: {0}")]
    Backend(String),
}
