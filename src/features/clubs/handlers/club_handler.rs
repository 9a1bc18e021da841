use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::AuthenticatedCoach;
use crate::features::clubs::dtos::{ClubResponseDto, CreateClubDto};
use crate::features::clubs::services::ClubService;
use crate::shared::types::{ApiResponse, Meta};

/// Register the caller's club
///
/// Allocates the club code. A coach can own one club.
#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubDto,
    responses(
        (status = 201, description = "Club registered", body = ApiResponse<ClubResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Coach not found"),
        (status = 409, description = "Coach already has a club")
    ),
    security(("coach_id" = [])),
    tag = "clubs"
)]
pub async fn register_club(
    coach: AuthenticatedCoach,
    State(service): State<Arc<ClubService>>,
    AppJson(dto): AppJson<CreateClubDto>,
) -> Result<(StatusCode, Json<ApiResponse<ClubResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let club = service.register(coach.coach_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(club),
            Some("Club registered successfully".to_string()),
            None,
        )),
    ))
}

/// Get the caller's club
#[utoipa::path(
    get,
    path = "/api/clubs/mine",
    responses(
        (status = 200, description = "Club found", body = ApiResponse<ClubResponseDto>),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Caller has no club")
    ),
    security(("coach_id" = [])),
    tag = "clubs"
)]
pub async fn get_my_club(
    coach: AuthenticatedCoach,
    State(service): State<Arc<ClubService>>,
) -> Result<Json<ApiResponse<ClubResponseDto>>> {
    let club = service.get_mine(coach.coach_id).await?;
    Ok(Json(ApiResponse::success(Some(club), None, None)))
}

/// Get club by ID
#[utoipa::path(
    get,
    path = "/api/clubs/{club_id}",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    responses(
        (status = 200, description = "Club found", body = ApiResponse<ClubResponseDto>),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Club not found")
    ),
    security(("coach_id" = [])),
    tag = "clubs"
)]
pub async fn get_club(
    _coach: AuthenticatedCoach,
    State(service): State<Arc<ClubService>>,
    AppPath(club_id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ClubResponseDto>>> {
    let club = service.get_by_id(club_id).await?;
    Ok(Json(ApiResponse::success(Some(club), None, None)))
}

/// Get club by code
#[utoipa::path(
    get,
    path = "/api/clubs/code/{club_code}",
    params(
        ("club_code" = String, Path, description = "Club code (e.g., C00000042AP)")
    ),
    responses(
        (status = 200, description = "Club found", body = ApiResponse<ClubResponseDto>),
        (status = 400, description = "Not a club code"),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Club not found")
    ),
    security(("coach_id" = [])),
    tag = "clubs"
)]
pub async fn get_club_by_code(
    _coach: AuthenticatedCoach,
    State(service): State<Arc<ClubService>>,
    AppPath(club_code): AppPath<String>,
) -> Result<Json<ApiResponse<ClubResponseDto>>> {
    let club = service.get_by_code(&club_code).await?;
    Ok(Json(ApiResponse::success(Some(club), None, None)))
}

/// List clubs in a region
#[utoipa::path(
    get,
    path = "/api/clubs/region/{country}/{province}",
    params(
        ("country" = String, Path, description = "Country"),
        ("province" = String, Path, description = "Province")
    ),
    responses(
        (status = 200, description = "Clubs in the region, newest first", body = ApiResponse<Vec<ClubResponseDto>>),
        (status = 401, description = "Missing coach identity")
    ),
    security(("coach_id" = [])),
    tag = "clubs"
)]
pub async fn list_clubs(
    _coach: AuthenticatedCoach,
    State(service): State<Arc<ClubService>>,
    AppPath((country, province)): AppPath<(String, String)>,
) -> Result<Json<ApiResponse<Vec<ClubResponseDto>>>> {
    let clubs = service.list_by_region(&country, &province).await?;
    let meta = Meta::total(clubs.len());
    Ok(Json(ApiResponse::success(Some(clubs), None, Some(meta))))
}
