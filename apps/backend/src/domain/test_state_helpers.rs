//! Test-only builders for domain unit tests.

use crate::domain::bidding::{Bid, BiddingState};
use crate::domain::rules::GameSettings;
use crate::domain::state::{GameState, GameStatus, Occupant, Seat};
use crate::domain::tricks::PlayState;
use crate::domain::Card;

pub fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|t| t.parse::<Card>().expect("hardcoded valid card token"))
        .collect()
}

/// Four bot seats, given hands, bidding open left of `dealer`.
pub fn bidding_state(settings: GameSettings, hands: [Vec<Card>; 4], dealer: Seat) -> GameState {
    let mut state = GameState::new(1, settings, 42);
    for (seat, hand) in state.seats.iter_mut().zip(hands) {
        seat.occupant = Occupant::bot("test");
        seat.hand = hand;
    }
    state.dealer = dealer;
    state.round_no = 1;
    state.bidding = Some(BiddingState::new(dealer));
    state.status = GameStatus::Bidding;
    state
}

/// Same as `bidding_state` but with all bids in and `leader` on lead.
pub fn playing_state(
    settings: GameSettings,
    hands: [Vec<Card>; 4],
    bids: [Bid; 4],
    leader: Seat,
) -> GameState {
    let mut state = bidding_state(settings, hands, (leader + 3) % 4);
    if let Some(b) = state.bidding.as_mut() {
        b.bids = bids.map(Some);
    }
    state.play = Some(PlayState::new(leader));
    state.status = GameStatus::Playing;
    state
}
