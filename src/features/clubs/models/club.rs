use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for club
#[derive(Debug, Clone, FromRow)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub province: String,
    pub coach_id: Uuid,
    pub chair: String,
    pub vice_chair: String,
    pub treasurer: String,
    pub members: Vec<String>,
    pub club_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new club record; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: String,
    pub country: String,
    pub province: String,
    pub coach_id: Uuid,
    pub chair: String,
    pub vice_chair: String,
    pub treasurer: String,
    pub members: Vec<String>,
    pub club_code: String,
}
