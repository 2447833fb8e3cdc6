//! Turn clock: cancellable delayed tasks and per-seat timer bookkeeping.

use std::time::Duration;

use dashmap::DashMap;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::domain::state::{GameId, Seat, TurnPhase};

/// Handle to one scheduled task. Cancelling twice is harmless.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
    generation: u64,
}

impl TimerHandle {
    pub fn new(token: CancellationToken, generation: u64) -> Self {
        Self { token, generation }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay` unless the handle is cancelled first.
    fn schedule(&self, delay: Duration, generation: u64, task: BoxFuture<'static, ()>) -> TimerHandle;
}

/// Spawns one tokio task per timer.
#[derive(Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, generation: u64, task: BoxFuture<'static, ()>) -> TimerHandle {
        let token = CancellationToken::new();
        let guard = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {}
                _ = tokio::time::sleep(delay) => task.await,
            }
        });
        TimerHandle::new(token, generation)
    }
}

#[derive(Debug, Default)]
pub struct TimeoutEntry {
    pub phase: Option<TurnPhase>,
    pub generation: u64,
    pub warning: Option<TimerHandle>,
    pub hard: Option<TimerHandle>,
    pub consecutive_timeouts: u32,
}

impl TimeoutEntry {
    fn cancel_timers(&mut self) {
        if let Some(t) = self.warning.take() {
            t.cancel();
        }
        if let Some(t) = self.hard.take() {
            t.cancel();
        }
        self.phase = None;
    }
}

/// Timers keyed by `(game, seat)`. At most one seat per game is armed.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    entries: DashMap<(GameId, Seat), TimeoutEntry>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was armed for the seat. The timeout count is kept.
    pub fn arm(
        &self,
        game_id: GameId,
        seat: Seat,
        phase: TurnPhase,
        generation: u64,
        warning: Option<TimerHandle>,
        hard: TimerHandle,
    ) {
        let mut entry = self.entries.entry((game_id, seat)).or_default();
        entry.cancel_timers();
        entry.phase = Some(phase);
        entry.generation = generation;
        entry.warning = warning;
        entry.hard = Some(hard);
    }

    /// Stop the seat's timers, keeping its count.
    pub fn cancel(&self, game_id: GameId, seat: Seat) {
        if let Some(mut entry) = self.entries.get_mut(&(game_id, seat)) {
            entry.cancel_timers();
        }
    }

    /// Stop every timer of the game except `keep`'s.
    pub fn cancel_others(&self, game_id: GameId, keep: Option<Seat>) {
        for seat in 0..4u8 {
            if Some(seat) != keep {
                self.cancel(game_id, seat);
            }
        }
    }

    /// Stop timers and forget the count, for a seat changing hands.
    pub fn clear_seat(&self, game_id: GameId, seat: Seat) {
        if let Some((_, mut entry)) = self.entries.remove(&(game_id, seat)) {
            entry.cancel_timers();
        }
    }

    pub fn clear_game(&self, game_id: GameId) {
        for seat in 0..4u8 {
            self.clear_seat(game_id, seat);
        }
    }

    /// True when the seat is armed for exactly this turn.
    pub fn is_current(&self, game_id: GameId, seat: Seat, phase: TurnPhase, generation: u64) -> bool {
        self.entries
            .get(&(game_id, seat))
            .is_some_and(|e| e.phase == Some(phase) && e.generation == generation)
    }

    pub fn is_armed(&self, game_id: GameId, seat: Seat) -> bool {
        self.entries
            .get(&(game_id, seat))
            .is_some_and(|e| e.hard.as_ref().is_some_and(|h| !h.is_cancelled()))
    }

    /// Count one more timeout and return the new total.
    pub fn record_timeout(&self, game_id: GameId, seat: Seat) -> u32 {
        let mut entry = self.entries.entry((game_id, seat)).or_default();
        entry.consecutive_timeouts += 1;
        entry.consecutive_timeouts
    }

    pub fn reset_count(&self, game_id: GameId, seat: Seat) {
        if let Some(mut entry) = self.entries.get_mut(&(game_id, seat)) {
            entry.consecutive_timeouts = 0;
        }
    }

    pub fn consecutive_timeouts(&self, game_id: GameId, seat: Seat) -> u32 {
        self.entries
            .get(&(game_id, seat))
            .map(|e| e.consecutive_timeouts)
            .unwrap_or(0)
    }
}
