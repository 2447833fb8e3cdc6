// Proptest generators for domain types.
// Cards drawn together are always unique.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::state::Seat;
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..=3u8
}

/// `count` distinct cards in random order.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(full_deck(), count).prop_shuffle()
}

pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count).prop_flat_map(unique_cards)
}

/// A full trick: (leader, plays in seat order from the leader).
pub fn complete_trick() -> impl Strategy<Value = (Seat, [(Seat, Card); 4])> {
    (seat(), unique_cards(4)).prop_map(|(leader, cards)| {
        let plays = std::array::from_fn(|i| ((leader + i as u8) % 4, cards[i]));
        (leader, plays)
    })
}

/// A hand plus a partial trick (0..=3 plays) built from disjoint cards.
pub fn hand_and_partial_trick() -> impl Strategy<Value = (Vec<Card>, Vec<(Seat, Card)>, bool)> {
    (1usize..=13, 0usize..=3, any::<bool>()).prop_flat_map(|(hand_len, trick_len, broken)| {
        unique_cards(hand_len + trick_len).prop_map(move |cards| {
            let (hand, played) = cards.split_at(hand_len);
            let trick = played
                .iter()
                .enumerate()
                .map(|(i, c)| (i as Seat, *c))
                .collect();
            (hand.to_vec(), trick, broken)
        })
    })
}
