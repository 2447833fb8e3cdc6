//! Per-format bid heuristics, dispatched through a table keyed by format.
//!
//! Trick estimates are counted in half tricks and rounded down, so the
//! strategies lean conservative.

use crate::ai::context::BidContext;
use crate::domain::cards_logic::count_suit;
use crate::domain::rules::{GameFormat, GimmickVariant};
use crate::domain::state::partner_of;
use crate::domain::{Bid, Card, Rank, Suit};

pub type BidStrategy = fn(&BidContext<'_>) -> Bid;

pub struct BidStrategyEntry {
    pub format: GameFormat,
    pub name: &'static str,
    pub choose: BidStrategy,
}

static BID_STRATEGIES: &[BidStrategyEntry] = &[
    BidStrategyEntry {
        format: GameFormat::Regular,
        name: "regular",
        choose: regular_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Whiz,
        name: "whiz",
        choose: whiz_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Mirror,
        name: "mirror",
        choose: forced_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Gimmick(GimmickVariant::Suicide),
        name: "suicide",
        choose: suicide_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Gimmick(GimmickVariant::Bid4OrNil),
        name: "bid4_or_nil",
        choose: four_or_nil_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Gimmick(GimmickVariant::Bid3),
        name: "bid3",
        choose: forced_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Gimmick(GimmickVariant::BidHearts),
        name: "bid_hearts",
        choose: forced_bid,
    },
    BidStrategyEntry {
        format: GameFormat::Gimmick(GimmickVariant::CrazyAces),
        name: "crazy_aces",
        choose: forced_bid,
    },
];

pub fn strategies() -> &'static [BidStrategyEntry] {
    BID_STRATEGIES
}

/// Entry for `format`; regular when nothing more specific is registered.
pub fn strategy_for(format: GameFormat) -> &'static BidStrategyEntry {
    BID_STRATEGIES
        .iter()
        .find(|e| e.format == format)
        .unwrap_or(&BID_STRATEGIES[0])
}

fn has(hand: &[Card], suit: Suit, rank: Rank) -> bool {
    hand.contains(&Card::new(suit, rank))
}

const SIDE_SUITS: [Suit; 3] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs];

/// Likely tricks from honours, spade length and shortness.
pub fn estimate_tricks(hand: &[Card]) -> u8 {
    let mut halves = 0u8;

    for suit in SIDE_SUITS {
        let len = count_suit(hand, suit);
        if has(hand, suit, Rank::Ace) {
            halves += 2;
        }
        // Kings in long suits get ruffed.
        if has(hand, suit, Rank::King) && len <= 3 {
            halves += 2;
        }
        if has(hand, suit, Rank::Queen) && len >= 3 {
            halves += 1;
        }
    }

    let spades = count_suit(hand, Suit::Spades);
    let (ace, king, queen, jack) = (
        has(hand, Suit::Spades, Rank::Ace),
        has(hand, Suit::Spades, Rank::King),
        has(hand, Suit::Spades, Rank::Queen),
        has(hand, Suit::Spades, Rank::Jack),
    );
    halves += 2 * ace as u8 + 2 * king as u8;
    if queen {
        halves += match spades {
            0..=1 => 0,
            2 => 1,
            _ => 2,
        };
    }
    if spades >= 5 && ace && jack {
        halves += 2;
    }

    let short_side = SIDE_SUITS.iter().any(|&s| count_suit(hand, s) <= 2);
    if spades >= 4 && short_side {
        halves += 1;
    }

    halves / 2
}

/// Weak, short spades and no exposed side aces.
pub fn nil_is_safe(hand: &[Card]) -> bool {
    let spades = count_suit(hand, Suit::Spades);
    let high_spade = hand
        .iter()
        .filter(|c| c.is_trump())
        .map(|c| c.rank)
        .max();
    if high_spade.is_some_and(|r| r >= Rank::Jack) {
        return false;
    }
    let exposed_ace = SIDE_SUITS
        .iter()
        .any(|&s| has(hand, s, Rank::Ace) && count_suit(hand, s) <= 4);
    !exposed_ace && spades <= 2
}

fn contract_estimate(ctx: &BidContext<'_>) -> u8 {
    let hand = ctx.hand;
    let spades = count_suit(hand, Suit::Spades);
    let side_ace = SIDE_SUITS.iter().any(|&s| has(hand, s, Rank::Ace));
    let mut est = estimate_tricks(hand).clamp(1, 6);

    if ctx.is_first_bidder() && spades <= 1 && !side_ace {
        est = est.saturating_sub(1).max(1);
    }

    if ctx.is_last_bidder() && ctx.table_total() + est < 10 && est < 4 {
        let short_ace = SIDE_SUITS
            .iter()
            .any(|&s| has(hand, s, Rank::Ace) && count_suit(hand, s) <= 3);
        if spades >= 5 || has(hand, Suit::Spades, Rank::Ace) || short_ace {
            est += 1;
        }
    }
    est
}

pub fn regular_bid(ctx: &BidContext<'_>) -> Bid {
    if ctx.settings.rules.allow_nil && nil_is_safe(ctx.hand) {
        return Bid::nil();
    }
    Bid::new(contract_estimate(ctx))
}

pub fn whiz_bid(ctx: &BidContext<'_>) -> Bid {
    let spades = count_suit(ctx.hand, Suit::Spades);
    if spades == 0 || (ctx.settings.rules.allow_nil && nil_is_safe(ctx.hand)) {
        return Bid::nil();
    }
    Bid::new(spades)
}

pub fn suicide_bid(ctx: &BidContext<'_>) -> Bid {
    match ctx.existing_bids[partner_of(ctx.seat) as usize] {
        Some(partner) if partner.is_nil() => Bid::new(contract_estimate(ctx)),
        Some(_) => Bid::nil(),
        None if nil_is_safe(ctx.hand) => Bid::nil(),
        None => Bid::new(contract_estimate(ctx)),
    }
}

pub fn four_or_nil_bid(ctx: &BidContext<'_>) -> Bid {
    if estimate_tricks(ctx.hand) >= 3 || !ctx.settings.rules.allow_nil {
        Bid::new(4)
    } else {
        Bid::nil()
    }
}

/// Formats with a single legal value.
pub fn forced_bid(ctx: &BidContext<'_>) -> Bid {
    ctx.legal_values()
        .first()
        .copied()
        .map(Bid::new)
        .unwrap_or_else(Bid::nil)
}
