use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::core::database::with_deadline;
use crate::core::error::{AppError, Result};
use crate::features::coaches::dtos::{CoachResponseDto, CreateCoachDto, ListCoachesQuery};
use crate::modules::directory::MembershipDirectory;

/// Service for coach records
pub struct CoachService {
    directory: Arc<dyn MembershipDirectory>,
    deadline: Duration,
}

impl CoachService {
    pub fn new(directory: Arc<dyn MembershipDirectory>, deadline: Duration) -> Self {
        Self {
            directory,
            deadline,
        }
    }

    /// Register a coach
    pub async fn create(&self, dto: CreateCoachDto) -> Result<CoachResponseDto> {
        let coach = with_deadline(
            self.deadline,
            "create coach",
            self.directory.create_coach(dto.into()),
        )
        .await?;

        tracing::info!("Registered {} coach {}", coach.tier, coach.id);
        Ok(coach.into())
    }

    /// Get coach by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<CoachResponseDto> {
        with_deadline(self.deadline, "get coach", self.directory.find_coach(id))
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Coach {} not found", id)))
    }

    /// List coaches in a region, optionally of one tier
    pub async fn list(&self, query: &ListCoachesQuery) -> Result<Vec<CoachResponseDto>> {
        let coaches = with_deadline(
            self.deadline,
            "list coaches",
            self.directory
                .list_coaches(&query.country, &query.province, query.tier),
        )
        .await?;

        Ok(coaches.into_iter().map(Into::into).collect())
    }
}
