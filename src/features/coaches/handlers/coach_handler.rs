use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::AuthenticatedCoach;
use crate::features::coaches::dtos::{CoachResponseDto, CreateCoachDto, ListCoachesQuery};
use crate::features::coaches::services::CoachService;
use crate::shared::types::{ApiResponse, Meta};

/// Register a coach
#[utoipa::path(
    post,
    path = "/api/coaches",
    request_body = CreateCoachDto,
    responses(
        (status = 201, description = "Coach registered", body = ApiResponse<CoachResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "coaches"
)]
pub async fn create_coach(
    State(service): State<Arc<CoachService>>,
    AppJson(dto): AppJson<CreateCoachDto>,
) -> Result<(StatusCode, Json<ApiResponse<CoachResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let coach = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(coach),
            Some("Coach registered successfully".to_string()),
            None,
        )),
    ))
}

/// Get coach by ID
#[utoipa::path(
    get,
    path = "/api/coaches/{coach_id}",
    params(
        ("coach_id" = Uuid, Path, description = "Coach ID")
    ),
    responses(
        (status = 200, description = "Coach found", body = ApiResponse<CoachResponseDto>),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Coach not found")
    ),
    security(("coach_id" = [])),
    tag = "coaches"
)]
pub async fn get_coach(
    _coach: AuthenticatedCoach,
    State(service): State<Arc<CoachService>>,
    AppPath(coach_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CoachResponseDto>>> {
    let coach = service.get_by_id(coach_id).await?;
    Ok(Json(ApiResponse::success(Some(coach), None, None)))
}

/// List coaches in a region
#[utoipa::path(
    get,
    path = "/api/coaches",
    params(ListCoachesQuery),
    responses(
        (status = 200, description = "Coaches in the region", body = ApiResponse<Vec<CoachResponseDto>>),
        (status = 401, description = "Missing coach identity")
    ),
    security(("coach_id" = [])),
    tag = "coaches"
)]
pub async fn list_coaches(
    _coach: AuthenticatedCoach,
    State(service): State<Arc<CoachService>>,
    AppQuery(query): AppQuery<ListCoachesQuery>,
) -> Result<Json<ApiResponse<Vec<CoachResponseDto>>>> {
    let coaches = service.list(&query).await?;
    let meta = Meta::total(coaches.len());
    Ok(Json(ApiResponse::success(Some(coaches), None, Some(meta))))
}
