use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::cards_logic::count_suit;
use crate::domain::rules::{GameFormat, GameMode, GameSettings, GimmickVariant, MAX_BID, PLAYERS};
use crate::domain::state::{next_player, partner_of, GameState, GameStatus, Seat};
use crate::domain::tricks::PlayState;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Tricks a seat commits to. Zero is nil; `blind` marks blind nil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub tricks: u8,
    #[serde(default)]
    pub blind: bool,
}

impl Bid {
    pub const fn new(tricks: u8) -> Self {
        Self {
            tricks,
            blind: false,
        }
    }

    pub const fn nil() -> Self {
        Self::new(0)
    }

    pub const fn blind_nil() -> Self {
        Self {
            tricks: 0,
            blind: true,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.tricks == 0
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tricks, self.blind) {
            (0, true) => f.write_str("blind nil"),
            (0, false) => f.write_str("nil"),
            (n, _) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiddingState {
    pub current: Seat,
    pub bids: [Option<Bid>; PLAYERS],
}

impl BiddingState {
    /// Bidding opens left of the dealer.
    pub fn new(dealer: Seat) -> Self {
        Self {
            current: next_player(dealer),
            bids: [None; PLAYERS],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bids.iter().all(Option::is_some)
    }

    pub fn nil_markers(&self) -> [bool; PLAYERS] {
        self.bids.map(|b| b.is_some_and(|b| b.is_nil()))
    }

    pub fn blind_nil_markers(&self) -> [bool; PLAYERS] {
        self.bids.map(|b| b.is_some_and(|b| b.blind))
    }
}

/// Bid values the format admits for `seat` given its hand and the bids so far.
///
/// Zero appears only when nil is allowed, or when the format forces it
/// (e.g. mirror with no spades).
pub fn legal_bid_values(
    settings: &GameSettings,
    hand: &[Card],
    seat: Seat,
    bids: &[Option<Bid>; PLAYERS],
) -> Vec<u8> {
    let allow_nil = settings.rules.allow_nil;
    let with_nil = |mut v: Vec<u8>| {
        if allow_nil && !v.contains(&0) {
            v.insert(0, 0);
        }
        v
    };
    let spades = count_suit(hand, Suit::Spades);

    match settings.format {
        GameFormat::Regular => with_nil((1..=MAX_BID).collect()),
        GameFormat::Whiz => with_nil(vec![spades]),
        GameFormat::Mirror => vec![spades],
        GameFormat::Gimmick(variant) => match variant {
            GimmickVariant::Suicide if settings.mode == GameMode::Partners => {
                match bids[partner_of(seat) as usize] {
                    Some(p) if p.is_nil() => (1..=MAX_BID).collect(),
                    Some(_) => vec![0],
                    None => (0..=MAX_BID).collect(),
                }
            }
            GimmickVariant::Suicide => with_nil((1..=MAX_BID).collect()),
            GimmickVariant::Bid4OrNil => with_nil(vec![4]),
            GimmickVariant::Bid3 => vec![3],
            GimmickVariant::BidHearts => vec![count_suit(hand, Suit::Hearts)],
            GimmickVariant::CrazyAces => {
                let aces = hand.iter().filter(|c| c.rank == Rank::Ace).count() as u8;
                vec![aces * 3]
            }
        },
    }
}

pub fn validate_bid(
    settings: &GameSettings,
    hand: &[Card],
    seat: Seat,
    bids: &[Option<Bid>; PLAYERS],
    bid: Bid,
) -> Result<(), DomainError> {
    let legal = legal_bid_values(settings, hand, seat, bids);

    if bid.blind {
        if bid.tricks != 0 {
            return Err(DomainError::validation(
                ValidationKind::IllegalBid,
                "Blind bids must be nil",
            ));
        }
        if !settings.rules.allow_blind_nil || !legal.contains(&0) {
            return Err(DomainError::validation(
                ValidationKind::IllegalBid,
                "Blind nil is not allowed in this game",
            ));
        }
        return Ok(());
    }

    if bid.is_nil() && !legal.contains(&0) {
        let detail = if settings.rules.allow_nil {
            "Nil is not a legal bid here"
        } else {
            "Nil bids are not allowed in this game"
        };
        return Err(DomainError::validation(ValidationKind::IllegalBid, detail));
    }

    if !legal.contains(&bid.tricks) {
        return Err(DomainError::validation(
            ValidationKind::IllegalBid,
            format!("Bid {} is outside the legal set {legal:?}", bid.tricks),
        ));
    }
    Ok(())
}

/// Force a proposed bid into legality: disallowed nil becomes 1, then the
/// nearest legal value wins (ties go low).
pub fn clamp_bid(
    settings: &GameSettings,
    hand: &[Card],
    seat: Seat,
    bids: &[Option<Bid>; PLAYERS],
    proposed: Bid,
) -> Bid {
    if validate_bid(settings, hand, seat, bids, proposed).is_ok() {
        return proposed;
    }
    let mut wanted = proposed.tricks.min(MAX_BID);
    if wanted == 0 && !settings.rules.allow_nil {
        wanted = 1;
    }
    let legal = legal_bid_values(settings, hand, seat, bids);
    let chosen = legal
        .iter()
        .copied()
        .min_by_key(|v| (v.abs_diff(wanted), *v))
        .unwrap_or(wanted);
    Bid::new(chosen)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidOutcome {
    /// Seat to act next (a bidder, or the first leader once bidding closes).
    pub next_seat: Seat,
    pub bidding_complete: bool,
}

/// Record a bid for the seat on turn.
pub fn place_bid(state: &mut GameState, seat: Seat, bid: Bid) -> Result<BidOutcome, DomainError> {
    if state.status != GameStatus::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Cannot bid while {:?}", state.status),
        ));
    }
    let dealer = state.dealer;
    let Some(bidding) = state.bidding.as_mut() else {
        return Err(DomainError::validation_other(
            "Invariant violated: Bidding status without bidding state",
        ));
    };
    if bidding.current != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Seat {seat} bid out of turn (seat {} to act)", bidding.current),
        ));
    }
    validate_bid(
        &state.settings,
        &state.seats[seat as usize].hand,
        seat,
        &bidding.bids,
        bid,
    )?;

    bidding.bids[seat as usize] = Some(bid);

    let outcome = if bidding.is_complete() {
        let leader = next_player(dealer);
        state.play = Some(PlayState::new(leader));
        state.status = GameStatus::Playing;
        BidOutcome {
            next_seat: leader,
            bidding_complete: true,
        }
    } else {
        bidding.current = next_player(seat);
        BidOutcome {
            next_seat: bidding.current,
            bidding_complete: false,
        }
    };
    state.bump_generation();
    Ok(outcome)
}
