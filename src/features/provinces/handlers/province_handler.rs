use std::sync::Arc;

use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::AuthenticatedCoach;
use crate::features::provinces::dtos::{
    DecisionQuery, ProvincialBodyResponseDto, RegisterOfficersDto, SubmitRequestDto,
};
use crate::features::provinces::services::ApprovalService;
use crate::shared::types::{ApiResponse, Meta};

/// Ask a coach to join the caller's provincial body
///
/// Opens the body on first use, which needs `country` and `province`.
/// Repeating a pending request is a no-op.
#[utoipa::path(
    post,
    path = "/api/provinces/requests/{coach_id}",
    params(
        ("coach_id" = Uuid, Path, description = "Coach to ask")
    ),
    request_body = SubmitRequestDto,
    responses(
        (status = 200, description = "Request pending", body = ApiResponse<ProvincialBodyResponseDto>),
        (status = 400, description = "Region missing for a new body"),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Coach not found"),
        (status = 409, description = "Coach already approved"),
        (status = 503, description = "Store unavailable, outcome unknown")
    ),
    security(("coach_id" = [])),
    tag = "provinces"
)]
pub async fn submit_request(
    owner: AuthenticatedCoach,
    State(service): State<Arc<ApprovalService>>,
    AppPath(coach_id): AppPath<Uuid>,
    AppJson(dto): AppJson<SubmitRequestDto>,
) -> Result<Json<ApiResponse<ProvincialBodyResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let body = service.submit_request(owner.coach_id, coach_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(body),
        Some("Request sent".to_string()),
        None,
    )))
}

/// Accept or decline a provincial body's request
#[utoipa::path(
    post,
    path = "/api/provinces/{body_id}/decision",
    params(
        ("body_id" = Uuid, Path, description = "Provincial body ID"),
        DecisionQuery
    ),
    responses(
        (status = 200, description = "Decision recorded", body = ApiResponse<ProvincialBodyResponseDto>),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "No pending request from this body"),
        (status = 503, description = "Store unavailable, outcome unknown")
    ),
    security(("coach_id" = [])),
    tag = "provinces"
)]
pub async fn decide(
    coach: AuthenticatedCoach,
    State(service): State<Arc<ApprovalService>>,
    AppPath(body_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<DecisionQuery>,
) -> Result<Json<ApiResponse<ProvincialBodyResponseDto>>> {
    let body = service.decide(coach.coach_id, body_id, query.accept).await?;
    let message = if query.accept {
        "Request accepted"
    } else {
        "Request declined"
    };
    Ok(Json(ApiResponse::success(
        Some(body),
        Some(message.to_string()),
        None,
    )))
}

/// Register officers of the caller's provincial body
#[utoipa::path(
    put,
    path = "/api/provinces/officers",
    request_body = RegisterOfficersDto,
    responses(
        (status = 200, description = "Body registered", body = ApiResponse<ProvincialBodyResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Caller owns no provincial body")
    ),
    security(("coach_id" = [])),
    tag = "provinces"
)]
pub async fn register_officers(
    owner: AuthenticatedCoach,
    State(service): State<Arc<ApprovalService>>,
    AppJson(dto): AppJson<RegisterOfficersDto>,
) -> Result<Json<ApiResponse<ProvincialBodyResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let body = service.register_officers(owner.coach_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(body),
        Some("Provincial body registered".to_string()),
        None,
    )))
}

/// Get the caller's own provincial body
#[utoipa::path(
    get,
    path = "/api/provinces/mine",
    responses(
        (status = 200, description = "Provincial body with approved coaches", body = ApiResponse<ProvincialBodyResponseDto>),
        (status = 401, description = "Missing coach identity"),
        (status = 404, description = "Caller owns no provincial body")
    ),
    security(("coach_id" = [])),
    tag = "provinces"
)]
pub async fn get_my_province(
    owner: AuthenticatedCoach,
    State(service): State<Arc<ApprovalService>>,
) -> Result<Json<ApiResponse<ProvincialBodyResponseDto>>> {
    let body = service.get_my_province(owner.coach_id).await?;
    Ok(Json(ApiResponse::success(Some(body), None, None)))
}

/// List provincial bodies waiting on the caller's decision
#[utoipa::path(
    get,
    path = "/api/provinces/requests",
    responses(
        (status = 200, description = "Pending requests, oldest first", body = ApiResponse<Vec<ProvincialBodyResponseDto>>),
        (status = 401, description = "Missing coach identity")
    ),
    security(("coach_id" = [])),
    tag = "provinces"
)]
pub async fn list_my_national_requests(
    coach: AuthenticatedCoach,
    State(service): State<Arc<ApprovalService>>,
) -> Result<Json<ApiResponse<Vec<ProvincialBodyResponseDto>>>> {
    let bodies = service.list_my_national_requests(coach.coach_id).await?;
    let meta = Meta::total(bodies.len());
    Ok(Json(ApiResponse::success(Some(bodies), None, Some(meta))))
}

/// List registered provincial bodies in a region
#[utoipa::path(
    get,
    path = "/api/provinces/region/{country}/{province}",
    params(
        ("country" = String, Path, description = "Country"),
        ("province" = String, Path, description = "Province")
    ),
    responses(
        (status = 200, description = "Registered bodies, oldest first", body = ApiResponse<Vec<ProvincialBodyResponseDto>>),
        (status = 401, description = "Missing coach identity")
    ),
    security(("coach_id" = [])),
    tag = "provinces"
)]
pub async fn query_region(
    _coach: AuthenticatedCoach,
    State(service): State<Arc<ApprovalService>>,
    AppPath((country, province)): AppPath<(String, String)>,
) -> Result<Json<ApiResponse<Vec<ProvincialBodyResponseDto>>>> {
    let bodies = service.query(&country, &province).await?;
    let meta = Meta::total(bodies.len());
    Ok(Json(ApiResponse::success(Some(bodies), None, Some(meta))))
}
