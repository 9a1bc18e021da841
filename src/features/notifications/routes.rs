use axum::{routing::get, Router};

use crate::features::notifications::handlers;
use crate::modules::notifications::ConnectionRegistry;

/// Create routes for the notifications feature
///
/// Note: This feature requires a coach identity
pub fn routes(registry: ConnectionRegistry) -> Router {
    Router::new()
        .route(
            "/api/notifications/stream",
            get(handlers::stream_notifications),
        )
        .with_state(registry)
}
