//! Control directive module
//!
//! Operators move a symbol's synthetic price by issuing a drift directive
//! (target percent change over a duration). Directives are persisted behind
//! [`DirectiveRepository`] and mirrored in-process by [`DirectiveStore`].
//!
//! Two authorities decide whether a directive is still running: the store
//! drops a directive as soon as its duration has elapsed, while the persisted
//! `active` flag only changes on an explicit operator write. The next
//! `refresh` reconciles the store with whatever the repository reports.

mod file;
mod memory;
mod queue;
mod store;
mod types;

pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use queue::{QueueConfig, QueuedRepository};
pub use store::DirectiveStore;
pub use types::ControlDirective;

use crate::error::RepositoryError;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Persistence boundary for control directives
#[async_trait]
pub trait DirectiveRepository: Send + Sync {
    /// All directives whose persisted flag is active
    async fn list_active(&self) -> Result<Vec<ControlDirective>, RepositoryError>;

    /// Create a directive for `symbol` starting now, replacing any active one
    async fn upsert(
        &self,
        symbol: &str,
        target_percent_change: Decimal,
        duration_minutes: u32,
    ) -> Result<ControlDirective, RepositoryError>;

    /// Clear the active flag for `symbol`; returns whether one was active
    async fn deactivate(&self, symbol: &str) -> Result<bool, RepositoryError>;
}
