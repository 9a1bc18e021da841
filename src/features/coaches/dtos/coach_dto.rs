use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::coaches::models::{Coach, CoachTier, NewCoach};

/// Request DTO for registering a coach
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoachDto {
    #[validate(
        length(max = 255, message = "Name must not exceed 255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(length(max = 255, message = "Other name must not exceed 255 characters"))]
    pub other_name: Option<String>,

    /// Admission (membership) number
    #[validate(length(max = 64, message = "Admission must not exceed 64 characters"))]
    pub admission: Option<String>,

    #[validate(length(max = 64, message = "Belt must not exceed 64 characters"))]
    pub belt: Option<String>,

    pub tier: CoachTier,

    #[validate(length(min = 1, max = 128, message = "Country must be 1-128 characters"))]
    pub country: Option<String>,

    #[validate(length(min = 1, max = 128, message = "Province must be 1-128 characters"))]
    pub province: Option<String>,
}

impl From<CreateCoachDto> for NewCoach {
    fn from(dto: CreateCoachDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            other_name: dto.other_name,
            admission: dto.admission,
            belt: dto.belt,
            tier: dto.tier,
            country: dto.country,
            province: dto.province,
        }
    }
}

/// Query parameters for listing coaches in a region
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCoachesQuery {
    pub country: String,
    pub province: String,
    /// Restrict to one tier
    pub tier: Option<CoachTier>,
}

/// Response DTO for a coach
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belt: Option<String>,
    pub tier: CoachTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Provincial bodies awaiting this coach's decision, oldest first
    pub national_requests: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Coach> for CoachResponseDto {
    fn from(c: Coach) -> Self {
        Self {
            id: c.id,
            name: c.name,
            other_name: c.other_name,
            admission: c.admission,
            belt: c.belt,
            tier: c.tier,
            country: c.country,
            province: c.province,
            national_requests: c.national_requests,
            created_at: c.created_at,
        }
    }
}

/// Coach fields shown wherever another record references a coach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachSummaryDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belt: Option<String>,
}

impl From<Coach> for CoachSummaryDto {
    fn from(c: Coach) -> Self {
        Self {
            id: c.id,
            name: c.name,
            other_name: c.other_name,
            admission: c.admission,
            belt: c.belt,
        }
    }
}
