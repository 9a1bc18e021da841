use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Organizational level of a coach, matching the `coach_tier` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "coach_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CoachTier {
    Club,
    Provincial,
    National,
}

impl std::fmt::Display for CoachTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoachTier::Club => write!(f, "club"),
            CoachTier::Provincial => write!(f, "provincial"),
            CoachTier::National => write!(f, "national"),
        }
    }
}

/// Database model for coach
///
/// `national_requests` is loaded from `coach_national_requests`, oldest first.
#[derive(Debug, Clone, FromRow)]
pub struct Coach {
    pub id: Uuid,
    pub name: String,
    pub other_name: Option<String>,
    pub admission: Option<String>,
    pub belt: Option<String>,
    pub tier: CoachTier,
    pub country: Option<String>,
    pub province: Option<String>,
    #[sqlx(skip)]
    pub national_requests: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coach {
    /// Whether the coach still has an undecided request from this body
    pub fn has_pending_request(&self, body_id: Uuid) -> bool {
        self.national_requests.contains(&body_id)
    }
}

/// Fields for a new coach record
#[derive(Debug, Clone)]
pub struct NewCoach {
    pub name: String,
    pub other_name: Option<String>,
    pub admission: Option<String>,
    pub belt: Option<String>,
    pub tier: CoachTier,
    pub country: Option<String>,
    pub province: Option<String>,
}
