use serde::{Deserialize, Serialize};

use crate::domain::bidding::{Bid, BiddingState};
use crate::domain::rules::{GameMode, GameSettings, PLAYERS};
use crate::domain::scoring::RoundScore;
use crate::domain::tricks::PlayState;
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

pub type Seat = u8; // 0..=3
pub type GameId = u64;

/// Overall game progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, seats filling.
    Waiting,
    Bidding,
    /// Trick play; `PlayState::trick_no` is 1-based.
    Playing,
    /// Thirteenth trick resolved, scoring pending.
    HandComplete,
    Finished,
    Cancelled,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Cancelled)
    }

    /// Statuses in which a departing last human cancels the game.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            GameStatus::Waiting | GameStatus::Bidding | GameStatus::Playing
        )
    }
}

/// The kind of action a seat on turn owes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Bidding,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Occupant {
    Empty,
    Human { user_id: String, name: String },
    /// Backed by the named decision provider.
    Bot { provider: String },
}

impl Occupant {
    pub fn human(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Occupant::Human {
            user_id: user_id.into(),
            name: name.into(),
        }
    }

    pub fn bot(provider: impl Into<String>) -> Self {
        Occupant::Bot {
            provider: provider.into(),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Occupant::Human { .. })
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, Occupant::Bot { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct SeatState {
    pub occupant: Occupant,
    pub hand: Vec<Card>,
    /// Tricks won this round.
    pub tricks_won: u8,
    /// Bags taken this round, set at hand completion.
    pub bags: u8,
}

impl SeatState {
    pub fn empty() -> Self {
        Self {
            occupant: Occupant::Empty,
            hand: Vec::with_capacity(13),
            tricks_won: 0,
            bags: 0,
        }
    }
}

/// Running totals per side. Partners use indices 0 and 1; solo uses all four.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub points: [i32; PLAYERS],
    pub bags: [u32; PLAYERS],
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone)]
pub struct GameState {
    pub id: GameId,
    pub settings: GameSettings,
    pub status: GameStatus,
    pub dealer: Seat,
    /// 1-based; 0 until the game starts.
    pub round_no: u32,
    pub seats: [SeatState; PLAYERS],
    /// Present from the start of bidding until the next round resets it.
    pub bidding: Option<BiddingState>,
    /// Present once all four bids are in.
    pub play: Option<PlayState>,
    pub scores: Scoreboard,
    pub history: Vec<RoundScore>,
    /// Winning side once Finished.
    pub winner: Option<u8>,
    /// Base seed for deals.
    pub seed: u64,
    /// Bumped on every turn change; timers armed under an older value are inert.
    pub turn_generation: u64,
}

impl GameState {
    pub fn new(id: GameId, settings: GameSettings, seed: u64) -> Self {
        Self {
            id,
            settings,
            status: GameStatus::Waiting,
            dealer: 0,
            round_no: 0,
            seats: std::array::from_fn(|_| SeatState::empty()),
            bidding: None,
            play: None,
            scores: Scoreboard::default(),
            history: Vec::new(),
            winner: None,
            seed,
            turn_generation: 0,
        }
    }

    /// Seat expected to act, if any.
    pub fn turn(&self) -> Option<Seat> {
        match self.status {
            GameStatus::Bidding => self.bidding.as_ref().map(|b| b.current),
            GameStatus::Playing => self.play.as_ref().map(|p| p.current),
            _ => None,
        }
    }

    pub fn turn_phase(&self) -> Option<TurnPhase> {
        match self.status {
            GameStatus::Bidding => Some(TurnPhase::Bidding),
            GameStatus::Playing => Some(TurnPhase::Playing),
            _ => None,
        }
    }

    pub fn bump_generation(&mut self) -> u64 {
        self.turn_generation = self.turn_generation.wrapping_add(1);
        self.turn_generation
    }

    /// Put a new occupant in `seat`. The turn generation moves on when the
    /// seat is on turn, so no timer armed for the old occupant can fire.
    pub fn set_occupant(&mut self, seat: Seat, occupant: Occupant) {
        self.seats[seat as usize].occupant = occupant;
        if self.turn() == Some(seat) {
            self.bump_generation();
        }
    }

    pub fn bids(&self) -> [Option<Bid>; PLAYERS] {
        self.bidding.as_ref().map(|b| b.bids).unwrap_or([None; PLAYERS])
    }

    pub fn occupant(&self, seat: Seat) -> &Occupant {
        &self.seats[seat as usize].occupant
    }

    pub fn has_human(&self) -> bool {
        self.seats.iter().any(|s| s.occupant.is_human())
    }

    pub fn all_seats_filled(&self) -> bool {
        self.seats.iter().all(|s| !s.occupant.is_empty())
    }

    /// Scoring side for a seat: parity in partners, the seat itself in solo.
    pub fn side_of(&self, seat: Seat) -> u8 {
        side_of(self.settings.mode, seat)
    }
}

pub fn side_of(mode: GameMode, seat: Seat) -> u8 {
    match mode {
        GameMode::Partners => seat % 2,
        GameMode::Solo => seat,
    }
}

pub fn side_count(mode: GameMode) -> usize {
    match mode {
        GameMode::Partners => 2,
        GameMode::Solo => PLAYERS,
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3, clockwise is +1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    ((seat as i16 + delta as i16).rem_euclid(PLAYERS as i16)) as Seat
}

#[inline]
pub fn next_player(p: Seat) -> Seat {
    seat_offset(p, 1)
}

#[inline]
pub fn partner_of(p: Seat) -> Seat {
    seat_offset(p, 2)
}

pub fn require_seat(seat: u8) -> Result<Seat, DomainError> {
    if (seat as usize) < PLAYERS {
        Ok(seat)
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidSeat,
            format!("seat {seat} out of range 0..=3"),
        ))
    }
}
