//! Live push to connected coaches.
//!
//! Delivery is at-most-once and never blocks the sender: an absent or closed
//! connection drops the event, and a slow listener loses its oldest events.

mod registry;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

pub use registry::ConnectionRegistry;

/// An event on its way to a connected client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushEvent {
    pub event: String,
    pub payload: serde_json::Value,
}

/// A live connection for one user, as returned by [`NotificationPort::lookup`]
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    user_id: Uuid,
    sender: broadcast::Sender<PushEvent>,
}

impl ConnectionHandle {
    pub(crate) fn new(user_id: Uuid, sender: broadcast::Sender<PushEvent>) -> Self {
        Self { user_id, sender }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("connection for {0} closed")]
    Closed(Uuid),
}

#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// The live connection for `user_id`, if any
    async fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle>;

    /// Hand an event to the connection without waiting for delivery
    fn send(
        &self,
        handle: &ConnectionHandle,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotificationError>;
}

/// Push to `user_id` if connected. Failures are logged and dropped.
///
/// Returns whether the event was handed to a live connection.
pub async fn push_best_effort(
    port: &dyn NotificationPort,
    user_id: Uuid,
    event: &str,
    payload: serde_json::Value,
) -> bool {
    let Some(handle) = port.lookup(user_id).await else {
        tracing::debug!("Coach {} not connected, dropping '{}'", user_id, event);
        return false;
    };

    match port.send(&handle, event, payload) {
        Ok(()) => {
            tracing::info!("Pushed '{}' to coach {}", event, user_id);
            true
        }
        Err(e) => {
            tracing::debug!("Dropping '{}': {}", event, e);
            false
        }
    }
}
