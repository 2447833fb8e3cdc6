use proptest::prelude::*;

use crate::domain::cards_logic::hand_has_suit;
use crate::domain::{test_gens, test_prelude};
use crate::domain::tricks::{auto_play_card, legal_moves};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Holding the lead suit means every legal card is of that suit.
    #[test]
    fn prop_follow_suit_legality((hand, trick, broken) in test_gens::hand_and_partial_trick()) {
        let legal = legal_moves(&hand, &trick, broken, None);
        prop_assert!(!legal.is_empty());
        if let Some(lead) = trick.first().map(|(_, c)| c.suit) {
            if hand_has_suit(&hand, lead) {
                prop_assert!(legal.iter().all(|c| c.suit == lead));
            }
        }
    }

    /// Auto-play picks a legal card that follows suit whenever possible.
    #[test]
    fn prop_auto_play_is_legal(
        (hand, trick, broken) in test_gens::hand_and_partial_trick(),
        hint_idx in 0usize..13,
    ) {
        let hint = hand.get(hint_idx).copied();
        let chosen = auto_play_card(&hand, &trick, broken, None, hint).unwrap();
        prop_assert!(legal_moves(&hand, &trick, broken, None).contains(&chosen));
        if let Some(lead) = trick.first().map(|(_, c)| c.suit) {
            if hand_has_suit(&hand, lead) {
                prop_assert_eq!(chosen.suit, lead);
            }
        }
        if trick.is_empty() && !broken && hand.iter().any(|c| !c.is_trump()) {
            prop_assert!(!chosen.is_trump());
        }
    }
}
