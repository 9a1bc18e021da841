//! Durable counters keyed by a textual prefix.
//!
//! Counters only move through single atomic statements so that concurrent
//! allocators, in this process or another, never observe the same value.

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;

#[cfg(test)]
pub use memory::InMemorySequenceStore;
pub use postgres::PgSequenceStore;

#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically advance the counter for `prefix` and return the new value.
    ///
    /// A prefix seen for the first time is created at `initial`.
    async fn increment(&self, prefix: &str, initial: i64) -> Result<i64>;

    /// Reset the counter to `value`, but only while it is still above `ceiling`.
    ///
    /// Returns `true` when this call performed the reset.
    async fn reset_if_above(&self, prefix: &str, ceiling: i64, value: i64) -> Result<bool>;
}
