use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{insert_conflict, ClubStore};
use crate::core::error::{AppError, Result};
use crate::features::clubs::models::{Club, NewClub};

const CLUB_COLUMNS: &str = "id, name, country, province, coach_id, chair, vice_chair, treasurer, members, club_code, created_at, updated_at";

/// Postgres-backed club store
pub struct PgClubStore {
    pool: PgPool,
}

impl PgClubStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubStore for PgClubStore {
    async fn insert(&self, club: NewClub) -> Result<Club> {
        sqlx::query_as::<_, Club>(&format!(
            r#"
            INSERT INTO clubs (id, name, country, province, coach_id, chair, vice_chair, treasurer, members, club_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            CLUB_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&club.name)
        .bind(&club.country)
        .bind(&club.province)
        .bind(club.coach_id)
        .bind(&club.chair)
        .bind(&club.vice_chair)
        .bind(&club.treasurer)
        .bind(&club.members)
        .bind(&club.club_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let conflict = match e {
                sqlx::Error::Database(ref db) => db
                    .constraint()
                    .and_then(|constraint| insert_conflict(constraint, &club)),
                _ => None,
            };
            conflict.unwrap_or_else(|| {
                tracing::error!("Failed to insert club for coach {}: {:?}", club.coach_id, e);
                AppError::from(e)
            })
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Club>> {
        sqlx::query_as::<_, Club>(&format!("SELECT {} FROM clubs WHERE id = $1", CLUB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get club {}: {:?}", id, e);
                AppError::from(e)
            })
    }

    async fn find_by_code(&self, club_code: &str) -> Result<Option<Club>> {
        sqlx::query_as::<_, Club>(&format!(
            "SELECT {} FROM clubs WHERE club_code = $1",
            CLUB_COLUMNS
        ))
        .bind(club_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get club {}: {:?}", club_code, e);
            AppError::from(e)
        })
    }

    async fn find_by_coach(&self, coach_id: Uuid) -> Result<Option<Club>> {
        sqlx::query_as::<_, Club>(&format!(
            "SELECT {} FROM clubs WHERE coach_id = $1",
            CLUB_COLUMNS
        ))
        .bind(coach_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get club of coach {}: {:?}", coach_id, e);
            AppError::from(e)
        })
    }

    async fn list_by_region(&self, country: &str, province: &str) -> Result<Vec<Club>> {
        sqlx::query_as::<_, Club>(&format!(
            r#"
            SELECT {}
            FROM clubs
            WHERE country = $1 AND province = $2
            ORDER BY created_at DESC
            "#,
            CLUB_COLUMNS
        ))
        .bind(country)
        .bind(province)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list clubs: {:?}", e);
            AppError::from(e)
        })
    }
}
