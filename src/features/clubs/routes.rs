use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::clubs::handlers;
use crate::features::clubs::services::ClubService;

/// Create routes for the clubs feature
///
/// Note: This feature requires a coach identity
pub fn routes(service: Arc<ClubService>) -> Router {
    Router::new()
        .route("/api/clubs", axum::routing::post(handlers::register_club))
        .route("/api/clubs/mine", get(handlers::get_my_club))
        .route("/api/clubs/code/{club_code}", get(handlers::get_club_by_code))
        .route(
            "/api/clubs/region/{country}/{province}",
            get(handlers::list_clubs),
        )
        .route("/api/clubs/{club_id}", get(handlers::get_club))
        .with_state(service)
}
