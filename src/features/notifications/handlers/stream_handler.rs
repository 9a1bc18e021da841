use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Sse,
    },
};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::StreamExt;

use crate::features::auth::AuthenticatedCoach;
use crate::modules::notifications::{ConnectionRegistry, PushEvent};

fn to_sse(event: PushEvent) -> Event {
    Event::default()
        .event(event.event)
        .data(event.payload.to_string())
}

/// Stream live events for the caller
///
/// Each event carries its name in `event:` and a JSON payload in `data:`.
/// Events pushed while the caller is not connected are not replayed.
#[utoipa::path(
    get,
    path = "/api/notifications/stream",
    responses(
        (status = 200, description = "Server-sent event stream", content_type = "text/event-stream"),
        (status = 401, description = "Missing coach identity")
    ),
    security(("coach_id" = [])),
    tag = "notifications"
)]
pub async fn stream_notifications(
    coach: AuthenticatedCoach,
    State(registry): State<ConnectionRegistry>,
) -> impl IntoResponse {
    let rx = registry.connect(coach.coach_id).await;
    tracing::debug!("Coach {} connected to notification stream", coach.coach_id);

    let coach_id = coach.coach_id;
    let stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) => Some(Ok::<_, Infallible>(to_sse(event))),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("Coach {} stream lagged, {} events dropped", coach_id, skipped);
            None
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}
