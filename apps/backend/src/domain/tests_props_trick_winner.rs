use proptest::prelude::*;

use crate::domain::state::Seat;
use crate::domain::tricks::resolve_trick;
use crate::domain::{test_gens, test_prelude, Card};

/// Reference winner: best trump if any, else best of the lead suit.
fn oracle_winner(plays: &[(Seat, Card); 4]) -> Seat {
    let lead = plays[0].1.suit;
    let pool: Vec<&(Seat, Card)> = if plays.iter().any(|(_, c)| c.is_trump()) {
        plays.iter().filter(|(_, c)| c.is_trump()).collect()
    } else {
        plays.iter().filter(|(_, c)| c.suit == lead).collect()
    };
    pool.into_iter()
        .max_by_key(|(_, c)| c.rank)
        .map(|(s, _)| *s)
        .expect("lead card is always in the pool")
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// The highest trump wins regardless of lead; otherwise the highest lead-suit card.
    #[test]
    fn prop_trick_winner_matches_oracle((_leader, plays) in test_gens::complete_trick()) {
        let lead = plays[0].1.suit;
        let r = resolve_trick(&plays, lead);
        prop_assert_eq!(r.winner, oracle_winner(&plays));
        prop_assert_eq!(r.trump_broken_delta, plays.iter().any(|(_, c)| c.is_trump()));
    }

    /// The winning card is never an off-suit non-trump.
    #[test]
    fn prop_winner_is_trump_or_lead((_leader, plays) in test_gens::complete_trick()) {
        let lead = plays[0].1.suit;
        let r = resolve_trick(&plays, lead);
        let (_, winning) = plays.iter().find(|(s, _)| *s == r.winner).copied().unwrap();
        prop_assert!(winning.is_trump() || winning.suit == lead);
    }
}
