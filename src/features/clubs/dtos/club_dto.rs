use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::clubs::models::{Club, NewClub};

/// Request DTO for registering the caller's club
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubDto {
    #[validate(
        length(max = 255, message = "Name must not exceed 255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(
        length(max = 128, message = "Country must not exceed 128 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub country: String,

    #[serde(alias = "provience")]
    #[validate(
        length(max = 128, message = "Province must not exceed 128 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub province: String,

    #[validate(custom(function = "crate::shared::validation::not_blank"))]
    pub chair: String,

    #[validate(custom(function = "crate::shared::validation::not_blank"))]
    pub vice_chair: String,

    #[validate(custom(function = "crate::shared::validation::not_blank"))]
    pub treasurer: String,

    #[validate(
        length(min = 1, message = "At least one member is required"),
        custom(function = "crate::shared::validation::no_blank_entries")
    )]
    pub members: Vec<String>,
}

/// Response DTO for club
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubResponseDto {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub province: String,
    pub coach_id: Uuid,
    pub chair: String,
    pub vice_chair: String,
    pub treasurer: String,
    pub members: Vec<String>,
    /// Allocated code, e.g. `C00000042AP`
    pub club_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<Club> for ClubResponseDto {
    fn from(c: Club) -> Self {
        Self {
            id: c.id,
            name: c.name,
            country: c.country,
            province: c.province,
            coach_id: c.coach_id,
            chair: c.chair,
            vice_chair: c.vice_chair,
            treasurer: c.treasurer,
            members: c.members,
            club_code: c.club_code,
            created_at: c.created_at,
        }
    }
}

impl CreateClubDto {
    /// Trimmed record for `coach_id`'s club under an allocated code
    pub fn into_new_club(self, coach_id: Uuid, club_code: String) -> NewClub {
        NewClub {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            province: self.province.trim().to_string(),
            coach_id,
            chair: self.chair.trim().to_string(),
            vice_chair: self.vice_chair.trim().to_string(),
            treasurer: self.treasurer.trim().to_string(),
            members: self.members.iter().map(|m| m.trim().to_string()).collect(),
            club_code,
        }
    }
}
