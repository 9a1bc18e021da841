use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::core::database::with_deadline;
use crate::core::error::{AppError, Result};
use crate::features::clubs::dtos::{ClubResponseDto, CreateClubDto};
use crate::features::clubs::services::CodeAllocator;
use crate::modules::club_store::ClubStore;
use crate::modules::directory::MembershipDirectory;
use crate::shared::validation::CLUB_CODE_REGEX;

/// Service for club registration and lookup
pub struct ClubService {
    store: Arc<dyn ClubStore>,
    allocator: Arc<CodeAllocator>,
    directory: Arc<dyn MembershipDirectory>,
    deadline: Duration,
}

impl ClubService {
    pub fn new(
        store: Arc<dyn ClubStore>,
        allocator: Arc<CodeAllocator>,
        directory: Arc<dyn MembershipDirectory>,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            allocator,
            directory,
            deadline,
        }
    }

    /// Register the club of `coach_id`, allocating its code.
    ///
    /// A coach owns at most one club. The code is only allocated once the
    /// coach is known to have none; a failed allocation writes nothing.
    pub async fn register(&self, coach_id: Uuid, dto: CreateClubDto) -> Result<ClubResponseDto> {
        with_deadline(self.deadline, "register club", async {
            self.directory
                .find_coach(coach_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Coach {} not found", coach_id)))?;

            if self.store.find_by_coach(coach_id).await?.is_some() {
                return Err(AppError::Conflict(
                    "You have an active club already".to_string(),
                ));
            }

            let code = self.allocator.next_club_code().await?;
            let club = self
                .store
                .insert(dto.into_new_club(coach_id, code.to_string()))
                .await?;

            tracing::info!("Registered club {} with code {}", club.id, club.club_code);
            Ok(club.into())
        })
        .await
    }

    /// List clubs in a region, newest first
    pub async fn list_by_region(&self, country: &str, province: &str) -> Result<Vec<ClubResponseDto>> {
        let clubs = with_deadline(
            self.deadline,
            "list clubs",
            self.store.list_by_region(country, province),
        )
        .await?;

        Ok(clubs.into_iter().map(Into::into).collect())
    }

    /// Get club by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<ClubResponseDto> {
        with_deadline(self.deadline, "get club", self.store.find_by_id(id))
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Club {} not found", id)))
    }

    /// Get club by its allocated code
    pub async fn get_by_code(&self, club_code: &str) -> Result<ClubResponseDto> {
        if !CLUB_CODE_REGEX.is_match(club_code) {
            return Err(AppError::Validation(format!(
                "'{}' is not a club code",
                club_code
            )));
        }

        with_deadline(
            self.deadline,
            "get club by code",
            self.store.find_by_code(club_code),
        )
        .await?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_code)))
    }

    /// Get the club owned by `coach_id`
    pub async fn get_mine(&self, coach_id: Uuid) -> Result<ClubResponseDto> {
        with_deadline(self.deadline, "get own club", self.store.find_by_coach(coach_id))
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Coach {} has no club", coach_id)))
    }
}
