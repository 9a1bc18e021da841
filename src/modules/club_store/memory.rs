use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{insert_conflict, ClubStore, CLUB_CODE_CONSTRAINT, COACH_CONSTRAINT};
use crate::core::error::{AppError, Result};
use crate::features::clubs::models::{Club, NewClub};

/// Clubs held in insertion order, for tests
#[derive(Default)]
pub struct InMemoryClubStore {
    clubs: Mutex<Vec<Club>>,
}

impl InMemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clubs.lock().unwrap().len()
    }

    fn find(&self, matches: impl Fn(&Club) -> bool) -> Option<Club> {
        self.clubs.lock().unwrap().iter().find(|c| matches(c)).cloned()
    }
}

#[async_trait]
impl ClubStore for InMemoryClubStore {
    async fn insert(&self, club: NewClub) -> Result<Club> {
        let mut clubs = self.clubs.lock().unwrap();

        let violated = if clubs.iter().any(|c| c.coach_id == club.coach_id) {
            Some(COACH_CONSTRAINT)
        } else if clubs.iter().any(|c| c.club_code == club.club_code) {
            Some(CLUB_CODE_CONSTRAINT)
        } else {
            None
        };
        if let Some(constraint) = violated {
            return Err(insert_conflict(constraint, &club).unwrap_or_else(|| {
                AppError::Internal(format!("unmapped constraint {}", constraint))
            }));
        }

        let now = Utc::now();
        let record = Club {
            id: Uuid::now_v7(),
            name: club.name,
            country: club.country,
            province: club.province,
            coach_id: club.coach_id,
            chair: club.chair,
            vice_chair: club.vice_chair,
            treasurer: club.treasurer,
            members: club.members,
            club_code: club.club_code,
            created_at: now,
            updated_at: now,
        };
        clubs.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>> {
        Ok(self.find(|c| c.id == id))
    }

    async fn find_by_code(&self, club_code: &str) -> Result<Option<Club>> {
        Ok(self.find(|c| c.club_code == club_code))
    }

    async fn find_by_coach(&self, coach_id: Uuid) -> Result<Option<Club>> {
        Ok(self.find(|c| c.coach_id == coach_id))
    }

    async fn list_by_region(&self, country: &str, province: &str) -> Result<Vec<Club>> {
        Ok(self
            .clubs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| c.country == country && c.province == province)
            .cloned()
            .collect())
    }
}
