//! Notification channel that keeps everything it is handed.

use parking_lot::Mutex;
use spades_backend::domain::state::GameId;
use spades_backend::services::notifications::{Notification, NotificationChannel};

#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(GameId, Notification)>>,
    closed: Mutex<Vec<GameId>>,
}

impl RecordingNotifier {
    pub fn events(&self, game_id: GameId) -> Vec<Notification> {
        self.events
            .lock()
            .iter()
            .filter(|(g, _)| *g == game_id)
            .map(|(_, n)| n.clone())
            .collect()
    }

    pub fn kinds(&self, game_id: GameId) -> Vec<&'static str> {
        self.events(game_id).iter().map(Notification::kind).collect()
    }

    pub fn count(&self, game_id: GameId, kind: &str) -> usize {
        self.kinds(game_id).into_iter().filter(|k| *k == kind).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn is_closed(&self, game_id: GameId) -> bool {
        self.closed.lock().contains(&game_id)
    }
}

impl NotificationChannel for RecordingNotifier {
    fn publish(&self, game_id: GameId, notification: Notification) {
        self.events.lock().push((game_id, notification));
    }

    fn close(&self, game_id: GameId) {
        self.closed.lock().push(game_id);
    }
}
