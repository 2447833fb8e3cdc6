use tracing::{debug, info};

use super::{Effect, Effects, GameFlowService};
use crate::domain::bidding::{place_bid, Bid, BidOutcome};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{require_seat, GameId, GameState, GameStatus, Seat};
use crate::domain::tricks::{self, PlayCardResult};
use crate::domain::Card;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::notifications::Notification;

impl GameFlowService {
    /// Submit a bid for the seat on turn.
    ///
    /// A rejected bid leaves the game untouched and the seat's clock running.
    /// An accepted one stops the clock and resets the seat's timeout count.
    pub fn submit_bid(&self, game_id: GameId, seat: Seat, bid: Bid) -> Result<BidOutcome, AppError> {
        debug!(game_id, seat, %bid, "submitting bid");
        let seat = require_seat(seat)?;
        let handle = self.handle(game_id)?;
        let mut fx = Effects::new(game_id);
        let outcome = {
            let mut state = handle.lock();
            let outcome = self.apply_bid(&mut state, seat, bid, &mut fx)?;
            self.timers.cancel(game_id, seat);
            self.timers.reset_count(game_id, seat);
            outcome
        };
        self.run(fx);
        self.settle(game_id);
        Ok(outcome)
    }

    /// Play a card for the seat on turn.
    pub fn play_card(&self, game_id: GameId, seat: Seat, card: Card) -> Result<PlayCardResult, AppError> {
        debug!(game_id, seat, %card, "playing card");
        let seat = require_seat(seat)?;
        let handle = self.handle(game_id)?;
        let mut fx = Effects::new(game_id);
        let result = {
            let mut state = handle.lock();
            let result = self.apply_card(&mut state, seat, card, &mut fx)?;
            // Under the lock, so a timeout escalation cannot interleave.
            self.timers.cancel(game_id, seat);
            self.timers.reset_count(game_id, seat);
            result
        };
        self.run(fx);
        self.settle(game_id);
        Ok(result)
    }

    pub(super) fn apply_bid(
        &self,
        state: &mut GameState,
        seat: Seat,
        bid: Bid,
        fx: &mut Effects,
    ) -> Result<BidOutcome, DomainError> {
        let outcome = place_bid(state, seat, bid)?;
        if outcome.bidding_complete {
            info!(game_id = state.id, round_no = state.round_no, bids = ?state.bids(), "bidding complete");
        }
        fx.notify(Notification::game_update(GameSnapshot::of(state)));
        Ok(outcome)
    }

    pub(super) fn apply_card(
        &self,
        state: &mut GameState,
        seat: Seat,
        card: Card,
        fx: &mut Effects,
    ) -> Result<PlayCardResult, DomainError> {
        let round_no = state.round_no;
        let result = tricks::play_card(state, seat, card)?;
        if let Some(trick) = &result.completed_trick {
            debug!(game_id = state.id, trick_no = trick.trick_no, winner = trick.winner, "trick complete");
            fx.notify(Notification::TrickComplete {
                trick_no: trick.trick_no,
                winner: trick.winner,
                cards: trick.plays.clone(),
                next_seat: result.next_seat,
            });
            fx.push(Effect::LogTrick {
                round_no,
                trick: trick.clone(),
            });
        }
        if result.round_complete {
            self.finish_hand(state, fx)?;
        }
        let snapshot = GameSnapshot::of(state);
        fx.notify(Notification::game_update(snapshot.clone()));
        if state.status == GameStatus::Finished {
            fx.push(Effect::Retire(Box::new(snapshot)));
        }
        Ok(result)
    }
}
