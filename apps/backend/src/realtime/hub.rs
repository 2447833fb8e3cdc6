use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::state::GameId;
use crate::services::notifications::{Notification, NotificationChannel};

const DEFAULT_CAPACITY: usize = 256;

/// Per-game broadcast channels. A game's channel is created by its first
/// subscriber and dropped when the game is deleted or finishes.
pub struct GameEventHub {
    channels: DashMap<GameId, broadcast::Sender<Arc<Notification>>>,
    capacity: usize,
}

impl GameEventHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, game_id: GameId) -> broadcast::Receiver<Arc<Notification>> {
        self.channels
            .entry(game_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    pub fn subscriber_count(&self, game_id: GameId) -> usize {
        self.channels
            .get(&game_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for GameEventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel for GameEventHub {
    fn publish(&self, game_id: GameId, notification: Notification) {
        let closing = matches!(notification, Notification::GameDeleted { .. });
        if let Some(tx) = self.channels.get(&game_id) {
            // No receivers is not an error.
            if tx.send(Arc::new(notification)).is_err() {
                debug!(game_id, "no live subscribers");
            }
        }
        if closing {
            self.close(game_id);
        }
    }

    /// Drop the game's channel; receivers see `Closed` once drained.
    fn close(&self, game_id: GameId) {
        if self.channels.remove(&game_id).is_some() {
            debug!(game_id, "event channel closed");
        }
    }
}
