use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::coaches::handlers;
use crate::features::coaches::services::CoachService;

/// Public routes for the coaches feature (registration)
pub fn public_routes(service: Arc<CoachService>) -> Router {
    Router::new()
        .route("/api/coaches", post(handlers::create_coach))
        .with_state(service)
}

/// Create routes for the coaches feature
///
/// Note: This feature requires a coach identity
pub fn routes(service: Arc<CoachService>) -> Router {
    Router::new()
        .route("/api/coaches", get(handlers::list_coaches))
        .route("/api/coaches/{coach_id}", get(handlers::get_coach))
        .with_state(service)
}
