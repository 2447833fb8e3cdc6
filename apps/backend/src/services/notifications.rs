//! Outbound game events.

use serde::Serialize;

use crate::domain::scoring::RoundScore;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{GameId, Seat, TurnPhase};
use crate::domain::{Bid, Card};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AutoAction {
    Bid { bid: Bid },
    Card { card: Card },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectReason {
    ConsecutiveTimeouts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteReason {
    NoHumansRemaining,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    GameUpdate {
        snapshot: Box<GameSnapshot>,
    },
    TrickComplete {
        trick_no: u8,
        winner: Seat,
        cards: Vec<(Seat, Card)>,
        /// Leader of the next trick; None after the thirteenth.
        next_seat: Option<Seat>,
    },
    PlayerTimeout {
        seat: Seat,
        phase: TurnPhase,
        action: AutoAction,
    },
    CountdownStart {
        seat: Seat,
        time_left_ms: u64,
    },
    PlayerAutoDisconnect {
        seat: Seat,
        reason: DisconnectReason,
    },
    GameDeleted {
        reason: DeleteReason,
    },
    HandSummary {
        score: RoundScore,
    },
    GameComplete {
        winner: u8,
        points: Vec<i32>,
    },
}

impl Notification {
    pub fn game_update(snapshot: GameSnapshot) -> Self {
        Notification::GameUpdate {
            snapshot: Box::new(snapshot),
        }
    }

    /// The serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::GameUpdate { .. } => "game_update",
            Notification::TrickComplete { .. } => "trick_complete",
            Notification::PlayerTimeout { .. } => "player_timeout",
            Notification::CountdownStart { .. } => "countdown_start",
            Notification::PlayerAutoDisconnect { .. } => "player_auto_disconnect",
            Notification::GameDeleted { .. } => "game_deleted",
            Notification::HandSummary { .. } => "hand_summary",
            Notification::GameComplete { .. } => "game_complete",
        }
    }
}

/// Fan-out seam. Publishing must not block.
pub trait NotificationChannel: Send + Sync {
    fn publish(&self, game_id: GameId, notification: Notification);

    /// The game has left the engine; nothing more will be published for it.
    fn close(&self, _game_id: GameId) {}
}

#[derive(Debug, Default)]
pub struct NoopNotifier;

impl NotificationChannel for NoopNotifier {
    fn publish(&self, _game_id: GameId, _notification: Notification) {}
}
