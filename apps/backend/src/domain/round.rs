//! Round lifecycle: start, hand completion and dealer rotation.

use crate::domain::bidding::{Bid, BiddingState};
use crate::domain::dealing::deal_hands;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{evaluate_completion, score_round, GameOutcome, RoundScore, ScoringRules};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{next_player, GameState, GameStatus, Seat};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Leave Waiting and deal round 1.
pub fn start_game(state: &mut GameState) -> Result<(), DomainError> {
    if state.status != GameStatus::Waiting {
        return Err(DomainError::conflict(
            ConflictKind::GameAlreadyStarted,
            format!("Game {} is already {:?}", state.id, state.status),
        ));
    }
    if !state.all_seats_filled() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "All four seats must be filled to start",
        ));
    }
    state.dealer = (state.seed % PLAYERS as u64) as Seat;
    state.round_no = 0;
    begin_round(state);
    Ok(())
}

/// Deal the next round and open bidding left of the dealer.
pub fn begin_round(state: &mut GameState) {
    state.round_no += 1;
    let hands = deal_hands(state.dealer, derive_dealing_seed(state.seed, state.round_no));
    for (seat, hand) in state.seats.iter_mut().zip(hands) {
        seat.hand = hand;
        seat.tricks_won = 0;
        seat.bags = 0;
    }
    state.bidding = Some(BiddingState::new(state.dealer));
    state.play = None;
    state.status = GameStatus::Bidding;
    state.bump_generation();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub score: RoundScore,
    pub outcome: GameOutcome,
    /// Round number now in bidding, unless the game finished.
    pub next_round: Option<u32>,
}

/// Score the finished hand, then either finish the game or deal the next round.
pub fn complete_hand(state: &mut GameState, rules: &ScoringRules) -> Result<HandResult, DomainError> {
    if state.status != GameStatus::HandComplete {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Cannot score a hand while {:?}", state.status),
        ));
    }
    let recorded = state.bids();
    let mut bids = [Bid::nil(); PLAYERS];
    for (slot, bid) in bids.iter_mut().zip(recorded) {
        *slot = bid.ok_or_else(|| {
            DomainError::validation_other("Invariant violated: hand complete with a missing bid")
        })?;
    }
    let tricks: [u8; PLAYERS] = std::array::from_fn(|i| state.seats[i].tricks_won);

    let score = score_round(
        state.settings.mode,
        state.round_no,
        bids,
        tricks,
        &mut state.scores,
        rules,
    );
    for (seat, bags) in state.seats.iter_mut().zip(score.seat_bags) {
        seat.bags = bags;
    }
    state.history.push(score.clone());

    let outcome = evaluate_completion(state.settings.mode, &state.scores, &state.settings.limits);
    let next_round = match outcome {
        GameOutcome::Winner(side) => {
            state.winner = Some(side);
            state.status = GameStatus::Finished;
            state.bump_generation();
            None
        }
        GameOutcome::Continue => {
            state.dealer = next_player(state.dealer);
            begin_round(state);
            Some(state.round_no)
        }
    };

    Ok(HandResult {
        score,
        outcome,
        next_round,
    })
}

/// Move a Waiting, Bidding or Playing game to Cancelled.
pub fn cancel(state: &mut GameState) -> bool {
    if !state.status.is_cancellable() {
        return false;
    }
    state.status = GameStatus::Cancelled;
    state.bump_generation();
    true
}
