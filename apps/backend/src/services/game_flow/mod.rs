//! Game flow orchestration: the only place game state is mutated.
//!
//! Every operation locks one game, applies a pure domain transition and
//! collects [`Effect`]s. Effects run after the lock is released, then
//! [`GameFlowService::settle`] drives bot seats and arms the clock for the
//! human on turn.

mod ai_coordinator;
mod player_actions;
mod round_lifecycle;
pub mod seats;
mod turn_clock;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::domain::scoring::RoundScore;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{GameId, GameState, Occupant, Seat, TurnPhase};
use crate::domain::tricks::CompletedTrick;
use crate::error::AppError;
use crate::services::notifications::{DeleteReason, Notification, NotificationChannel};
use crate::services::persistence::PersistenceQueue;
use crate::services::registry::{GameHandle, GameRegistry};
use crate::services::timeouts::{Scheduler, TimerRegistry};

/// Side effect computed under the game lock and executed after it.
#[derive(Debug)]
pub(super) enum Effect {
    Notify(Notification),
    StartRound(u32),
    LogTrick { round_no: u32, trick: CompletedTrick },
    LogRoundScore(RoundScore),
    /// Finished: leave the live set, keeping persisted history.
    Retire(Box<GameSnapshot>),
    DeleteGame(DeleteReason),
}

#[derive(Debug)]
pub(super) struct Effects {
    game_id: GameId,
    items: Vec<Effect>,
}

impl Effects {
    pub(super) fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            items: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, effect: Effect) {
        self.items.push(effect);
    }

    pub(super) fn notify(&mut self, notification: Notification) {
        self.items.push(Effect::Notify(notification));
    }

    /// Put a notification ahead of everything collected so far.
    pub(super) fn notify_first(&mut self, notification: Notification) {
        self.items.insert(0, Effect::Notify(notification));
    }
}

enum Step {
    Continue,
    Arm {
        seat: Seat,
        phase: TurnPhase,
        generation: u64,
    },
    Idle,
}

/// Cheap to clone; timer tasks hold their own copy.
#[derive(Clone)]
pub struct GameFlowService {
    games: Arc<GameRegistry>,
    timers: Arc<TimerRegistry>,
    scheduler: Arc<dyn Scheduler>,
    persistence: PersistenceQueue,
    notifier: Arc<dyn NotificationChannel>,
    config: Arc<EngineConfig>,
}

impl GameFlowService {
    pub fn new(
        config: EngineConfig,
        persistence: PersistenceQueue,
        notifier: Arc<dyn NotificationChannel>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            games: Arc::new(GameRegistry::new()),
            timers: Arc::new(TimerRegistry::new()),
            scheduler,
            persistence,
            notifier,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn persistence(&self) -> &PersistenceQueue {
        &self.persistence
    }

    fn handle(&self, game_id: GameId) -> Result<GameHandle, AppError> {
        Ok(self.games.get(game_id)?)
    }

    /// Run effects in order. Never called with a game lock held.
    fn run(&self, fx: Effects) {
        let game_id = fx.game_id;
        for effect in fx.items {
            match effect {
                Effect::Notify(n) => self.notifier.publish(game_id, n),
                Effect::StartRound(round_no) => self.persistence.start_round(game_id, round_no),
                Effect::LogTrick { round_no, trick } => {
                    self.persistence.log_trick(game_id, round_no, &trick)
                }
                Effect::LogRoundScore(score) => self.persistence.log_round_score(game_id, &score),
                Effect::Retire(last) => {
                    self.timers.clear_game(game_id);
                    self.games.retire(game_id, *last);
                    self.persistence.close_game(game_id);
                    self.notifier.close(game_id);
                    debug!(game_id, "finished game retired");
                }
                Effect::DeleteGame(reason) => {
                    self.timers.clear_game(game_id);
                    self.games.remove(game_id);
                    self.persistence.delete_game(game_id);
                    self.notifier
                        .publish(game_id, Notification::GameDeleted { reason });
                    debug!(game_id, ?reason, "game deleted");
                }
            }
        }
    }

    /// Act for bot seats until the turn reaches a human or an empty seat,
    /// then put the human on the clock.
    fn settle(&self, game_id: GameId) {
        loop {
            let Ok(handle) = self.games.get(game_id) else {
                return;
            };
            let mut fx = Effects::new(game_id);
            let step = {
                let mut state = handle.lock();
                self.next_step(&mut state, &mut fx)
            };
            self.run(fx);
            match step {
                Step::Continue => continue,
                Step::Arm {
                    seat,
                    phase,
                    generation,
                } => {
                    self.timers.cancel_others(game_id, Some(seat));
                    if !self.timers.is_current(game_id, seat, phase, generation) {
                        self.arm_clock(game_id, seat, phase, generation);
                    }
                    return;
                }
                Step::Idle => {
                    self.timers.cancel_others(game_id, None);
                    return;
                }
            }
        }
    }

    fn next_step(&self, state: &mut GameState, fx: &mut Effects) -> Step {
        let (Some(seat), Some(phase)) = (state.turn(), state.turn_phase()) else {
            return Step::Idle;
        };
        match state.occupant(seat).clone() {
            Occupant::Bot { provider } => match self.bot_act(state, seat, phase, &provider, fx) {
                Ok(()) => Step::Continue,
                Err(err) => {
                    warn!(game_id = state.id, seat, ?phase, error = %err, "bot could not act");
                    Step::Idle
                }
            },
            Occupant::Human { .. } => Step::Arm {
                seat,
                phase,
                generation: state.turn_generation,
            },
            Occupant::Empty => Step::Idle,
        }
    }
}
