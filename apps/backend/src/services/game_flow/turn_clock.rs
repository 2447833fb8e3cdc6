use futures::FutureExt;
use tracing::{debug, info, warn};

use super::{Effect, Effects, GameFlowService};
use crate::config::RatedEscalation;
use crate::domain::round;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{GameId, GameState, Occupant, Seat, TurnPhase};
use crate::services::notifications::{DeleteReason, DisconnectReason, Notification};

impl GameFlowService {
    /// Arm the warning and hard timers for the human on turn.
    pub(super) fn arm_clock(&self, game_id: GameId, seat: Seat, phase: TurnPhase, generation: u64) {
        let timeout = self.config.turn_timeout(phase);
        let warning = self.config.warning_delay(phase).map(|delay| {
            let svc = self.clone();
            let time_left_ms = u64::try_from((timeout - delay).as_millis()).unwrap_or(u64::MAX);
            self.scheduler.schedule(
                delay,
                generation,
                async move { svc.on_warning(game_id, seat, phase, generation, time_left_ms) }.boxed(),
            )
        });
        let svc = self.clone();
        let hard = self.scheduler.schedule(
            timeout,
            generation,
            async move { svc.on_hard_timeout(game_id, seat, phase, generation) }.boxed(),
        );
        self.timers.arm(game_id, seat, phase, generation, warning, hard);
        debug!(game_id, seat, ?phase, generation, timeout_ms = timeout.as_millis() as u64, "clock armed");
    }

    fn still_on_turn(state: &GameState, seat: Seat, phase: TurnPhase, generation: u64) -> bool {
        state.turn_generation == generation
            && state.turn() == Some(seat)
            && state.turn_phase() == Some(phase)
            && state.occupant(seat).is_human()
    }

    fn on_warning(&self, game_id: GameId, seat: Seat, phase: TurnPhase, generation: u64, time_left_ms: u64) {
        if !self.timers.is_current(game_id, seat, phase, generation) {
            debug!(game_id, seat, generation, "stale warning timer");
            return;
        }
        let Ok(handle) = self.games.get(game_id) else {
            return;
        };
        if !Self::still_on_turn(&handle.lock(), seat, phase, generation) {
            debug!(game_id, seat, generation, "stale warning timer");
            return;
        }
        self.notifier
            .publish(game_id, Notification::CountdownStart { seat, time_left_ms });
    }

    /// Hard deadline: act for the seat, then escalate at the limit.
    ///
    /// The count, the auto-action and any escalation happen under one lock,
    /// so a manual action either lands before the timeout or after the seat
    /// has changed hands.
    pub(super) fn on_hard_timeout(&self, game_id: GameId, seat: Seat, phase: TurnPhase, generation: u64) {
        if !self.timers.is_current(game_id, seat, phase, generation) {
            debug!(game_id, seat, generation, "stale turn timer");
            return;
        }
        let Ok(handle) = self.games.get(game_id) else {
            return;
        };
        let mut fx = Effects::new(game_id);
        {
            let mut state = handle.lock();
            if !Self::still_on_turn(&state, seat, phase, generation) {
                debug!(game_id, seat, generation, "stale turn timer");
                return;
            }
            self.timers.cancel(game_id, seat);
            let count = self.timers.record_timeout(game_id, seat);
            match self.auto_act(&mut state, seat, phase, &mut fx) {
                Ok(action) => {
                    info!(game_id, seat, ?phase, ?action, consecutive = count, "turn timed out");
                    fx.notify_first(Notification::PlayerTimeout { seat, phase, action });
                }
                Err(err) => {
                    warn!(game_id, seat, ?phase, error = %err, "auto-action failed");
                    return;
                }
            }
            if count >= self.config.consecutive_timeout_limit {
                self.escalate(&mut state, seat, &mut fx);
            }
        }
        self.run(fx);
        self.settle(game_id);
    }

    /// Remove a seat that keeps timing out. Runs under the game lock.
    fn escalate(&self, state: &mut GameState, seat: Seat, fx: &mut Effects) {
        let game_id = state.id;
        if state.status.is_terminal() || !state.occupant(seat).is_human() {
            return;
        }
        self.timers.clear_seat(game_id, seat);
        fx.notify(Notification::PlayerAutoDisconnect {
            seat,
            reason: DisconnectReason::ConsecutiveTimeouts,
        });
        let substitute = state.settings.rated && self.config.rated_escalation == RatedEscalation::SubstituteBot;
        if substitute {
            info!(game_id, seat, provider = %self.config.provider, "substituting bot for timed-out seat");
            state.set_occupant(seat, Occupant::bot(self.config.provider.clone()));
            fx.notify(Notification::game_update(GameSnapshot::of(state)));
        } else {
            info!(game_id, seat, "vacating timed-out seat");
            state.set_occupant(seat, Occupant::Empty);
            self.after_departure(state, fx);
        }
    }

    /// Cancel and delete the game once no human is left, otherwise publish the new seating.
    pub(super) fn after_departure(&self, state: &mut GameState, fx: &mut Effects) {
        let cancelled = !state.has_human() && round::cancel(state);
        fx.notify(Notification::game_update(GameSnapshot::of(state)));
        if cancelled {
            info!(game_id = state.id, "no humans remain; deleting game");
            fx.push(Effect::DeleteGame(DeleteReason::NoHumansRemaining));
        }
    }
}
