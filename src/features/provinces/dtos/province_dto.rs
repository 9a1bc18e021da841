use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::coaches::dtos::CoachSummaryDto;
use crate::features::provinces::models::{Officers, ProvincialBody};

/// Request DTO for asking a coach to join the caller's provincial body.
///
/// The region is only read when the body does not exist yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestDto {
    #[validate(length(max = 128, message = "Country must not exceed 128 characters"))]
    pub country: Option<String>,

    #[validate(length(max = 128, message = "Province must not exceed 128 characters"))]
    pub province: Option<String>,
}

impl SubmitRequestDto {
    /// Both region fields, trimmed, if both are present and non-blank
    pub fn region(&self) -> Option<(&str, &str)> {
        let country = self.country.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let province = self.province.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((country, province))
    }
}

/// Request DTO for registering the officers of the caller's provincial body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOfficersDto {
    #[serde(alias = "chairperson")]
    #[validate(
        length(max = 255, message = "Chairman must not exceed 255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub chairman: String,

    #[validate(
        length(max = 255, message = "Secretary must not exceed 255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub secretary: String,

    #[serde(alias = "viceChair")]
    #[validate(
        length(max = 255, message = "Vice chairman must not exceed 255 characters"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub vice_chairman: String,
}

impl From<RegisterOfficersDto> for Officers {
    fn from(dto: RegisterOfficersDto) -> Self {
        Self {
            chairman: dto.chairman.trim().to_string(),
            secretary: dto.secretary.trim().to_string(),
            vice_chairman: dto.vice_chairman.trim().to_string(),
        }
    }
}

/// Query params for deciding on a request
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DecisionQuery {
    /// `true` to join the body, `false` to decline
    pub accept: bool,
}

/// Response DTO for a provincial body, with its national coach expanded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvincialBodyResponseDto {
    pub id: Uuid,
    pub national_coach: CoachSummaryDto,
    pub country: String,
    pub province: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chairman: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secretary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vice_chairman: Option<String>,
    pub registered: bool,
    /// Coaches asked to join, not yet decided
    pub requests: Vec<Uuid>,
    /// Coaches who accepted
    pub approvals: Vec<Uuid>,
    /// Accepted coaches in full, on the owner's own view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_coaches: Option<Vec<CoachSummaryDto>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProvincialBodyResponseDto {
    pub fn new(body: ProvincialBody, national_coach: CoachSummaryDto) -> Self {
        Self {
            id: body.id,
            national_coach,
            country: body.country,
            province: body.province,
            chairman: body.chairman,
            secretary: body.secretary,
            vice_chairman: body.vice_chairman,
            registered: body.registered,
            requests: body.requests,
            approvals: body.approvals,
            approved_coaches: None,
            created_at: body.created_at,
            updated_at: body.updated_at,
        }
    }

    pub fn with_approved_coaches(mut self, coaches: Vec<CoachSummaryDto>) -> Self {
        self.approved_coaches = Some(coaches);
        self
    }
}
