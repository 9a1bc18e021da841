//! Club records.
//!
//! A coach owns at most one club and every club code is issued once; the
//! store enforces both, so a racing second insert fails with `Conflict`.

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::clubs::models::{Club, NewClub};

#[cfg(test)]
pub use memory::InMemoryClubStore;
pub use postgres::PgClubStore;

/// Unique constraint on `clubs.coach_id`
pub const COACH_CONSTRAINT: &str = "clubs_coach_id_key";

/// Unique constraint on `clubs.club_code`
pub const CLUB_CODE_CONSTRAINT: &str = "clubs_club_code_key";

#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn insert(&self, club: NewClub) -> Result<Club>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>>;

    async fn find_by_code(&self, club_code: &str) -> Result<Option<Club>>;

    async fn find_by_coach(&self, coach_id: Uuid) -> Result<Option<Club>>;

    /// Clubs in a region, newest first
    async fn list_by_region(&self, country: &str, province: &str) -> Result<Vec<Club>>;
}

/// The error for an insert that violated `constraint`, if it is one of ours.
///
/// A reused code only happens once the sequence has wrapped past its ceiling
/// and come back around to codes issued in an earlier cycle.
pub fn insert_conflict(constraint: &str, club: &NewClub) -> Option<AppError> {
    match constraint {
        COACH_CONSTRAINT => Some(AppError::Conflict(
            "You have an active club already".to_string(),
        )),
        CLUB_CODE_CONSTRAINT => {
            tracing::warn!(
                "Club code {} reissued after the code sequence wrapped",
                club.club_code
            );
            Some(AppError::Conflict(format!(
                "Club code {} is still held by an earlier club; the code sequence has wrapped",
                club.club_code
            )))
        }
        _ => None,
    }
}
