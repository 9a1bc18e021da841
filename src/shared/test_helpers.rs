#[cfg(test)]
use crate::features::auth::AuthenticatedCoach;

#[cfg(test)]
use axum::{body::Body, extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

/// Attach a fixed coach identity to every request, bypassing the header check
#[cfg(test)]
pub fn with_coach_identity(router: Router, coach_id: Uuid) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request
                .extensions_mut()
                .insert(AuthenticatedCoach { coach_id });
            next.run(request).await
        },
    ))
}

/// Collect a response body as JSON
#[cfg(test)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// A random human name for fixtures
#[cfg(test)]
pub fn fake_name() -> String {
    use fake::faker::name::en::Name;
    use fake::Fake;

    Name().fake()
}
