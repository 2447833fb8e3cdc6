//! Public view of a game, broadcast to every participant. Hands are
//! reduced to card counts.

use serde::Serialize;

use crate::domain::bidding::Bid;
use crate::domain::rules::{GameFormat, GameMode};
use crate::domain::state::{GameId, GameState, GameStatus, Occupant, Scoreboard, Seat};
use crate::domain::Card;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub occupant: Occupant,
    pub cards_in_hand: u8,
    pub tricks_won: u8,
    pub bid: Option<Bid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub status: GameStatus,
    pub mode: GameMode,
    pub format: GameFormat,
    pub rated: bool,
    pub round_no: u32,
    pub dealer: Seat,
    pub turn: Option<Seat>,
    pub seats: Vec<SeatView>,
    pub trick_no: Option<u8>,
    pub current_trick: Vec<(Seat, Card)>,
    pub trump_broken: bool,
    pub scores: Scoreboard,
    pub winner: Option<u8>,
}

impl GameSnapshot {
    pub fn of(state: &GameState) -> Self {
        let bids = state.bids();
        let seats = state
            .seats
            .iter()
            .enumerate()
            .map(|(i, s)| SeatView {
                seat: i as Seat,
                occupant: s.occupant.clone(),
                cards_in_hand: s.hand.len() as u8,
                tricks_won: s.tricks_won,
                bid: bids[i],
            })
            .collect();
        let play = state.play.as_ref();
        Self {
            game_id: state.id,
            status: state.status,
            mode: state.settings.mode,
            format: state.settings.format,
            rated: state.settings.rated,
            round_no: state.round_no,
            dealer: state.dealer,
            turn: state.turn(),
            seats,
            trick_no: play.map(|p| p.trick_no),
            current_trick: play.map(|p| p.current_trick.clone()).unwrap_or_default(),
            trump_broken: play.is_some_and(|p| p.trump_broken),
            scores: state.scores.clone(),
            winner: state.winner,
        }
    }
}
