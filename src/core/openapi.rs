use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::clubs::{dtos as clubs_dtos, handlers as clubs_handlers};
use crate::features::coaches::{
    dtos as coaches_dtos, handlers as coaches_handlers, models as coaches_models,
};
use crate::features::notifications::handlers as notifications_handlers;
use crate::features::provinces::{dtos as provinces_dtos, handlers as provinces_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Coaches
        coaches_handlers::create_coach,
        coaches_handlers::get_coach,
        coaches_handlers::list_coaches,
        // Clubs
        clubs_handlers::register_club,
        clubs_handlers::get_my_club,
        clubs_handlers::get_club,
        clubs_handlers::get_club_by_code,
        clubs_handlers::list_clubs,
        // Provinces
        provinces_handlers::submit_request,
        provinces_handlers::decide,
        provinces_handlers::register_officers,
        provinces_handlers::get_my_province,
        provinces_handlers::list_my_national_requests,
        provinces_handlers::query_region,
        // Notifications
        notifications_handlers::stream_notifications,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Coaches
            coaches_models::CoachTier,
            coaches_dtos::CreateCoachDto,
            coaches_dtos::CoachResponseDto,
            coaches_dtos::CoachSummaryDto,
            ApiResponse<coaches_dtos::CoachResponseDto>,
            ApiResponse<Vec<coaches_dtos::CoachResponseDto>>,
            // Clubs
            clubs_dtos::CreateClubDto,
            clubs_dtos::ClubResponseDto,
            ApiResponse<clubs_dtos::ClubResponseDto>,
            ApiResponse<Vec<clubs_dtos::ClubResponseDto>>,
            // Provinces
            provinces_dtos::SubmitRequestDto,
            provinces_dtos::RegisterOfficersDto,
            provinces_dtos::ProvincialBodyResponseDto,
            ApiResponse<provinces_dtos::ProvincialBodyResponseDto>,
            ApiResponse<Vec<provinces_dtos::ProvincialBodyResponseDto>>,
        )
    ),
    tags(
        (name = "coaches", description = "Coach records"),
        (name = "clubs", description = "Club registration and club codes"),
        (name = "provinces", description = "Provincial bodies and join requests"),
        (name = "notifications", description = "Live event stream"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "ClubHub API",
        version = "0.1.0",
        description = "API documentation for ClubHub",
    )
)]
pub struct ApiDoc;

/// Adds the gateway-asserted coach identity header to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "coach_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Coach-Id"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
