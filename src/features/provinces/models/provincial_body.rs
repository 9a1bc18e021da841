use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Where a coach stands on a provincial body, matching the `membership_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Approved,
}

/// Database model for a provincial body owned by a national coach
///
/// `requests` and `approvals` are loaded from `provincial_body_members`; a
/// coach id appears in at most one of them.
#[derive(Debug, Clone, FromRow)]
pub struct ProvincialBody {
    pub id: Uuid,
    pub national_coach_id: Uuid,
    pub country: String,
    pub province: String,
    pub chairman: Option<String>,
    pub secretary: Option<String>,
    pub vice_chairman: Option<String>,
    pub registered: bool,
    #[sqlx(skip)]
    pub requests: Vec<Uuid>,
    #[sqlx(skip)]
    pub approvals: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProvincialBody {
    pub fn status_of(&self, coach_id: Uuid) -> Option<MembershipStatus> {
        if self.requests.contains(&coach_id) {
            Some(MembershipStatus::Pending)
        } else if self.approvals.contains(&coach_id) {
            Some(MembershipStatus::Approved)
        } else {
            None
        }
    }

    /// Split member rows into the pending and approved lists, keeping row order
    pub fn with_members(mut self, members: &[(Uuid, MembershipStatus)]) -> Self {
        self.requests.clear();
        self.approvals.clear();
        for (coach_id, status) in members {
            match status {
                MembershipStatus::Pending => self.requests.push(*coach_id),
                MembershipStatus::Approved => self.approvals.push(*coach_id),
            }
        }
        self
    }
}

/// Officer names recorded when a national coach registers the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Officers {
    pub chairman: String,
    pub secretary: String,
    pub vice_chairman: String,
}
