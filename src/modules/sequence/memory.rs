use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::SequenceStore;
use crate::core::error::{AppError, Result};

/// Counters held in a mutex-guarded map, for tests
#[derive(Default)]
pub struct InMemorySequenceStore {
    counters: Mutex<HashMap<String, i64>>,
    unavailable: AtomicBool,
    lose_next_reset: AtomicBool,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `prefix` at an arbitrary value
    pub fn with_counter(self, prefix: &str, value: i64) -> Self {
        self.counters
            .lock()
            .unwrap()
            .insert(prefix.to_string(), value);
        self
    }

    pub fn counter(&self, prefix: &str) -> Option<i64> {
        self.counters.lock().unwrap().get(prefix).copied()
    }

    /// Make every call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let a simulated competitor win the next conditional reset: the counter
    /// is reset on its behalf and this store's caller is told it lost.
    pub fn lose_next_reset(&self) {
        self.lose_next_reset.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("sequence store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn increment(&self, prefix: &str, initial: i64) -> Result<i64> {
        self.check_available()?;
        let mut counters = self.counters.lock().unwrap();
        let number = counters
            .entry(prefix.to_string())
            .and_modify(|n| *n += 1)
            .or_insert(initial);
        Ok(*number)
    }

    async fn reset_if_above(&self, prefix: &str, ceiling: i64, value: i64) -> Result<bool> {
        self.check_available()?;
        let mut counters = self.counters.lock().unwrap();
        let Some(number) = counters.get_mut(prefix) else {
            return Ok(false);
        };

        if self.lose_next_reset.swap(false, Ordering::SeqCst) {
            *number = value;
            return Ok(false);
        }

        if *number > ceiling {
            *number = value;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
