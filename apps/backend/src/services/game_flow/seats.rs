//! Game creation, seating, start and cancellation, plus read-only queries.

use tracing::info;

use super::{Effect, Effects, GameFlowService};
use crate::domain::round;
use crate::domain::rules::GameSettings;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{require_seat, GameId, GameState, Occupant, Seat};
use crate::domain::Card;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::services::notifications::{DeleteReason, Notification};
use crate::services::persistence::GameStats;

impl GameFlowService {
    /// Register a new game with every seat empty.
    pub fn create_game(&self, settings: GameSettings) -> Result<GameId, AppError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let handle = self.games.create(settings, seed);
        let game_id = handle.lock().id;
        info!(game_id, "game created");
        Ok(game_id)
    }

    /// Fill an empty seat. A newcomer on turn gets the clock, a bot acts at once.
    pub fn join_seat(&self, game_id: GameId, seat: Seat, occupant: Occupant) -> Result<(), AppError> {
        let seat = require_seat(seat)?;
        if occupant.is_empty() {
            return Err(DomainError::validation(ValidationKind::InvalidSeat, "Cannot join as an empty occupant").into());
        }
        let handle = self.handle(game_id)?;
        let mut fx = Effects::new(game_id);
        {
            let mut state = handle.lock();
            if state.status.is_terminal() {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("Game {game_id} is {:?}", state.status),
                )
                .into());
            }
            if !state.occupant(seat).is_empty() {
                return Err(DomainError::conflict(ConflictKind::SeatTaken, format!("Seat {seat} is taken")).into());
            }
            info!(game_id, seat, ?occupant, "seat joined");
            state.set_occupant(seat, occupant);
            self.timers.clear_seat(game_id, seat);
            fx.notify(Notification::game_update(GameSnapshot::of(&state)));
        }
        self.run(fx);
        self.settle(game_id);
        Ok(())
    }

    /// Empty a seat. The game is deleted when its last human leaves.
    pub fn leave_seat(&self, game_id: GameId, seat: Seat) -> Result<(), AppError> {
        let seat = require_seat(seat)?;
        let handle = self.handle(game_id)?;
        let mut fx = Effects::new(game_id);
        {
            let mut state = handle.lock();
            if state.occupant(seat).is_empty() {
                return Err(DomainError::not_found(NotFoundKind::Seat, format!("Seat {seat} is already empty")).into());
            }
            info!(game_id, seat, "seat left");
            state.set_occupant(seat, Occupant::Empty);
            self.timers.clear_seat(game_id, seat);
            self.after_departure(&mut state, &mut fx);
        }
        self.run(fx);
        self.settle(game_id);
        Ok(())
    }

    pub fn start_game(&self, game_id: GameId) -> Result<(), AppError> {
        let handle = self.handle(game_id)?;
        let mut fx = Effects::new(game_id);
        {
            let mut state = handle.lock();
            self.begin_game(&mut state, &mut fx)?;
        }
        self.run(fx);
        self.settle(game_id);
        Ok(())
    }

    /// Explicit cancel. Cancelled games are dropped like abandoned ones.
    pub fn cancel_game(&self, game_id: GameId) -> Result<(), AppError> {
        let handle = self.handle(game_id)?;
        let mut fx = Effects::new(game_id);
        {
            let mut state = handle.lock();
            if !round::cancel(&mut state) {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("Cannot cancel a game that is {:?}", state.status),
                )
                .into());
            }
            info!(game_id, "game cancelled");
            fx.notify(Notification::game_update(GameSnapshot::of(&state)));
            fx.push(Effect::DeleteGame(DeleteReason::Cancelled));
        }
        self.run(fx);
        Ok(())
    }

    /// Public view of a live game, or the final view of a recently finished one.
    pub fn snapshot(&self, game_id: GameId) -> Result<GameSnapshot, AppError> {
        match self.games.get(game_id) {
            Ok(handle) => Ok(GameSnapshot::of(&handle.lock())),
            Err(err) => self.games.finished(game_id).ok_or_else(|| err.into()),
        }
    }

    /// Private hand of one seat.
    pub fn hand(&self, game_id: GameId, seat: Seat) -> Result<Vec<Card>, AppError> {
        let seat = require_seat(seat)?;
        self.with_game(game_id, |state| state.seats[seat as usize].hand.clone())
    }

    /// Read the game under its lock.
    pub fn with_game<T>(&self, game_id: GameId, f: impl FnOnce(&GameState) -> T) -> Result<T, AppError> {
        let handle = self.handle(game_id)?;
        let state = handle.lock();
        Ok(f(&state))
    }

    /// Persisted counts, after every queued write has landed.
    pub async fn stats(&self, game_id: GameId) -> Result<GameStats, AppError> {
        self.persistence.stats(game_id).await
    }
}
