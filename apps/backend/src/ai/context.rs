//! Read-only views handed to decision providers.

use crate::domain::bidding::legal_bid_values;
use crate::domain::rules::{GameFormat, GameMode, GameSettings, GimmickVariant, SpecialRule, PLAYERS};
use crate::domain::state::{next_player, partner_of, GameState, Seat};
use crate::domain::tricks::legal_moves;
use crate::domain::{Bid, Card, Suit};

#[derive(Debug, Clone, Copy)]
pub struct BidContext<'a> {
    pub hand: &'a [Card],
    pub seat: Seat,
    pub existing_bids: &'a [Option<Bid>; PLAYERS],
    pub dealer: Seat,
    pub settings: &'a GameSettings,
}

impl<'a> BidContext<'a> {
    pub fn new(
        hand: &'a [Card],
        seat: Seat,
        existing_bids: &'a [Option<Bid>; PLAYERS],
        dealer: Seat,
        settings: &'a GameSettings,
    ) -> Self {
        Self {
            hand,
            seat,
            existing_bids,
            dealer,
            settings,
        }
    }

    pub fn format(&self) -> GameFormat {
        self.settings.format
    }

    pub fn gimmick(&self) -> Option<GimmickVariant> {
        self.settings.format.gimmick()
    }

    pub fn legal_values(&self) -> Vec<u8> {
        legal_bid_values(self.settings, self.hand, self.seat, self.existing_bids)
    }

    /// The dealer bids last.
    pub fn is_last_bidder(&self) -> bool {
        self.seat == self.dealer
    }

    pub fn is_first_bidder(&self) -> bool {
        self.seat == next_player(self.dealer)
    }

    pub fn table_total(&self) -> u8 {
        self.existing_bids.iter().flatten().map(|b| b.tricks).sum()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub hand: &'a [Card],
    pub seat: Seat,
    pub current_trick: &'a [(Seat, Card)],
    pub trump_broken: bool,
    pub special: Option<SpecialRule>,
    pub mode: GameMode,
}

impl PlayContext<'_> {
    pub fn partner(&self) -> Option<Seat> {
        (self.mode == GameMode::Partners).then(|| partner_of(self.seat))
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.current_trick.first().map(|(_, c)| c.suit)
    }

    pub fn legal_cards(&self) -> Vec<Card> {
        legal_moves(self.hand, self.current_trick, self.trump_broken, self.special)
    }
}

/// Bidding view for `seat`, if the game is bidding.
pub fn bid_context(state: &GameState, seat: Seat) -> Option<BidContext<'_>> {
    let bidding = state.bidding.as_ref()?;
    Some(BidContext::new(
        &state.seats[seat as usize].hand,
        seat,
        &bidding.bids,
        state.dealer,
        &state.settings,
    ))
}

/// Play view for `seat`, if a trick is in progress.
pub fn play_context(state: &GameState, seat: Seat) -> Option<PlayContext<'_>> {
    let play = state.play.as_ref()?;
    Some(PlayContext {
        hand: &state.seats[seat as usize].hand,
        seat,
        current_trick: &play.current_trick,
        trump_broken: play.trump_broken,
        special: state.settings.rules.special,
        mode: state.settings.mode,
    })
}
