use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::{ConnectionHandle, NotificationError, NotificationPort, PushEvent};

/// In-process registry of live connections, one broadcast channel per user.
///
/// Thread-safe, cloneable. A user with several open streams receives every
/// event on each of them.
#[derive(Clone)]
pub struct ConnectionRegistry {
    channels: Arc<RwLock<HashMap<Uuid, broadcast::Sender<PushEvent>>>>,
    capacity: usize,
}

impl ConnectionRegistry {
    /// Create a registry buffering `capacity` events per user
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Attach a listener for `user_id`, pruning channels nobody listens to
    pub async fn connect(&self, user_id: Uuid) -> broadcast::Receiver<PushEvent> {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
        let tx = channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }
}

#[async_trait]
impl NotificationPort for ConnectionRegistry {
    async fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        let channels = self.channels.read().await;
        channels
            .get(&user_id)
            .filter(|tx| tx.receiver_count() > 0)
            .map(|tx| ConnectionHandle::new(user_id, tx.clone()))
    }

    fn send(
        &self,
        handle: &ConnectionHandle,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotificationError> {
        handle
            .sender
            .send(PushEvent {
                event: event.to_string(),
                payload,
            })
            .map(|_| ())
            .map_err(|_| NotificationError::Closed(handle.user_id))
    }
}
