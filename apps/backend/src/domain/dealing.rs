//! Deterministic dealing: the same seed always yields the same four hands.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::state::{next_player, Seat};
use crate::domain::{Card, Rank, Suit};

/// The 52-card deck in suit-then-rank order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Shuffle with `seed` and deal one card at a time starting left of `dealer`.
///
/// Hands come back indexed by seat and sorted.
pub fn deal_hands(dealer: Seat, seed: u64) -> [Vec<Card>; PLAYERS] {
    let mut deck = full_deck();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for hand in hands.iter_mut() {
        hand.reserve(HAND_SIZE as usize);
    }
    let mut seat = next_player(dealer);
    for card in deck {
        hands[seat as usize].push(card);
        seat = next_player(seat);
    }
    for hand in hands.iter_mut() {
        hand.sort();
    }
    hands
}
