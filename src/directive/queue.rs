//! Bounded work queue in front of a directive repository
//!
//! At most `max_in_flight` operations reach the backend at once; callers
//! beyond that wait for a slot. Once `max_queue_depth` callers are waiting,
//! new ones are rejected with [`RepositoryError::Backpressure`].

use super::{ControlDirective, DirectiveRepository};
use crate::error::RepositoryError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

/// Queue limits
#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    /// Operations allowed to run against the backend concurrently
    pub max_in_flight: usize,
    /// Waiting operations tolerated before rejecting
    pub max_queue_depth: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 1,
            max_queue_depth: 32,
        }
    }
}

/// Repository wrapper that serializes access to the backend
pub struct QueuedRepository<R> {
    inner: R,
    slots: Semaphore,
    waiting: AtomicUsize,
    max_queue_depth: usize,
}

/// Decrements the waiting count even if the acquiring future is dropped
struct WaitingGuard<'a>(&'a AtomicUsize);

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<R: DirectiveRepository> QueuedRepository<R> {
    /// Wrap `inner` with the given limits
    pub fn new(inner: R, config: QueueConfig) -> Self {
        Self {
            inner,
            slots: Semaphore::new(config.max_in_flight.max(1)),
            waiting: AtomicUsize::new(0),
            max_queue_depth: config.max_queue_depth,
        }
    }

    /// Operations currently waiting for a slot
    pub fn queue_depth(&self) -> usize {
        self.waiting.load(Ordering::Acquire)
    }

    /// Wrapped repository
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Stop admitting work; waiting and future callers get `Closed`
    pub fn close(&self) {
        self.slots.close();
    }

    async fn acquire(&self) -> Result<SemaphorePermit<'_>, RepositoryError> {
        if let Ok(permit) = self.slots.try_acquire() {
            return Ok(permit);
        }

        let depth = self.waiting.fetch_add(1, Ordering::AcqRel);
        let _guard = WaitingGuard(&self.waiting);
        if depth >= self.max_queue_depth {
            tracing::warn!(depth, "Directive persistence queue full, rejecting");
            return Err(RepositoryError::Backpressure { depth });
        }

        self.slots
            .acquire()
            .await
            .map_err(|_| RepositoryError::Closed)
    }
}

#[async_trait]
impl<R: DirectiveRepository> DirectiveRepository for QueuedRepository<R> {
    async fn list_active(&self) -> Result<Vec<ControlDirective>, RepositoryError> {
        let _permit = self.acquire().await?;
        self.inner.list_active().await
    }

    async fn upsert(
        &self,
        symbol: &str,
        target_percent_change: Decimal,
        duration_minutes: u32,
    ) -> Result<ControlDirective, RepositoryError> {
        let _permit = self.acquire().await?;
        self.inner
            .upsert(symbol, target_percent_change, duration_minutes)
            .await
    }

    async fn deactivate(&self, symbol: &str) -> Result<bool, RepositoryError> {
        let _permit = self.acquire().await?;
        self.inner.deactivate(symbol).await
    }
}
