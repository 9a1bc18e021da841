use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::provinces::handlers;
use crate::features::provinces::services::ApprovalService;

/// Create routes for the provinces feature
///
/// Note: This feature requires a coach identity
pub fn routes(service: Arc<ApprovalService>) -> Router {
    Router::new()
        .route("/api/provinces/mine", get(handlers::get_my_province))
        .route("/api/provinces/officers", put(handlers::register_officers))
        .route(
            "/api/provinces/requests",
            get(handlers::list_my_national_requests),
        )
        .route(
            "/api/provinces/requests/{coach_id}",
            post(handlers::submit_request),
        )
        .route("/api/provinces/{body_id}/decision", post(handlers::decide))
        .route(
            "/api/provinces/region/{country}/{province}",
            get(handlers::query_region),
        )
        .with_state(service)
}
