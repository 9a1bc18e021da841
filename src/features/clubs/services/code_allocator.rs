//! Club code allocation.
//!
//! A code is `prefix || 8-digit counter || suffix`. The suffix is the
//! bijective base-26 spelling of `(n - 1) mod 702`, so it runs A..Z, AA..ZZ
//! and then starts over at A.

use std::fmt;
use std::sync::Arc;

use crate::core::config::ClubCodeConfig;
use crate::core::error::{AppError, Result};
use crate::modules::sequence::SequenceStore;
use crate::shared::constants::{CLUB_CODE_DIGITS, CLUB_CODE_SUFFIX_CYCLE};

/// An allocated club code, immutable once minted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClubCode {
    pub prefix: String,
    pub numeric: String,
    pub suffix: String,
}

impl fmt::Display for ClubCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.numeric, self.suffix)
    }
}

impl ClubCode {
    /// Build the code for counter value `n` (must be at least 1)
    pub fn from_counter(prefix: &str, n: i64) -> Self {
        Self {
            prefix: prefix.to_string(),
            numeric: pad_number(n),
            suffix: encode_suffix((n - 1).rem_euclid(CLUB_CODE_SUFFIX_CYCLE)),
        }
    }
}

/// Zero-pad to the fixed code width
pub fn pad_number(n: i64) -> String {
    format!("{:0width$}", n, width = CLUB_CODE_DIGITS)
}

/// Spreadsheet-column spelling of a zero-based index: 0 -> A, 25 -> Z, 26 -> AA
pub fn encode_suffix(index: i64) -> String {
    let mut letters = Vec::with_capacity(2);
    let mut r = index;
    while r >= 0 {
        letters.push(b'A' + (r % 26) as u8);
        r = r / 26 - 1;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

pub struct CodeAllocator {
    store: Arc<dyn SequenceStore>,
    config: ClubCodeConfig,
}

impl CodeAllocator {
    /// Conditional resets lost to concurrent allocators before giving up
    const MAX_ATTEMPTS: usize = 8;

    pub fn new(store: Arc<dyn SequenceStore>, config: ClubCodeConfig) -> Self {
        Self { store, config }
    }

    /// Allocate the next code under the configured club prefix
    pub async fn next_club_code(&self) -> Result<ClubCode> {
        self.allocate(&self.config.prefix).await
    }

    /// Allocate the next code for `prefix`, wrapping above the configured ceiling
    pub async fn allocate(&self, prefix: &str) -> Result<ClubCode> {
        let ceiling = self.config.ceiling;
        let reset_to = self.config.reset_to;

        for attempt in 1..=Self::MAX_ATTEMPTS {
            let n = self.store.increment(prefix, reset_to).await?;

            if n <= ceiling {
                return Ok(ClubCode::from_counter(prefix, n));
            }

            // Only the caller whose conditional reset lands owns `reset_to`;
            // everyone else draws again from the restarted sequence.
            if self.store.reset_if_above(prefix, ceiling, reset_to).await? {
                tracing::info!(
                    "Sequence '{}' wrapped past {} back to {}",
                    prefix,
                    ceiling,
                    reset_to
                );
                return Ok(ClubCode::from_counter(prefix, reset_to));
            }

            tracing::debug!(
                "Lost sequence reset race for '{}' (attempt {})",
                prefix,
                attempt
            );
        }

        Err(AppError::AllocationExhausted(format!(
            "sequence '{}' stayed above {} after {} attempts",
            prefix,
            ceiling,
            Self::MAX_ATTEMPTS
        )))
    }
}
