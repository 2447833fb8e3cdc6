//! Hand queries and card strength under the fixed spade trump.

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// True when every card left in the hand is a spade (vacuously false when empty).
pub fn hand_is_trump_only(hand: &[Card]) -> bool {
    !hand.is_empty() && hand.iter().all(Card::is_trump)
}

pub fn count_suit(hand: &[Card], suit: Suit) -> u8 {
    hand.iter().filter(|c| c.suit == suit).count() as u8
}

/// Does `a` beat `b` in a trick led with `lead`?
pub fn card_beats(a: Card, b: Card, lead: Suit) -> bool {
    match (a.is_trump(), b.is_trump()) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => a.rank > b.rank,
        (false, false) => match (a.suit == lead, b.suit == lead) {
            (true, false) => true,
            (true, true) => a.rank > b.rank,
            // An off-suit non-trump never beats anything.
            (false, _) => false,
        },
    }
}
