//! Heuristic: a deterministic baseline bot.
//!
//! Bidding dispatches to the per-format table in `bid_strategies`.
//!
//! Play strategy:
//! - On lead: low card from the longest side suit, keeping spades back.
//! - Partner already winning: play low and do not overtake.
//! - Otherwise win as cheaply as possible, or discard the lowest card.
use crate::ai::bid_strategies::strategy_for;
use crate::ai::context::{BidContext, PlayContext};
use crate::ai::trait_def::{AiError, DecisionProvider};
use crate::domain::cards_logic::count_suit;
use crate::domain::state::Seat;
use crate::domain::{card_beats, Bid, Card, Suit};

#[derive(Clone, Default)]
pub struct Heuristic;

impl Heuristic {
    pub const NAME: &'static str = "heuristic";
    pub const VERSION: &'static str = "1.0.0";

    /// Seed is accepted for factory symmetry; play is fully deterministic.
    pub fn new(_seed: Option<u64>) -> Self {
        Self
    }

    /// Lowest by rank, spades after side suits at equal rank.
    fn lowest(cards: &[Card]) -> Option<Card> {
        cards.iter().copied().min_by_key(|c| (c.rank, c.is_trump()))
    }

    fn lowest_off_trump(cards: &[Card]) -> Option<Card> {
        let side: Vec<Card> = cards.iter().copied().filter(|c| !c.is_trump()).collect();
        Self::lowest(&side).or_else(|| Self::lowest(cards))
    }

    fn current_winner(trick: &[(Seat, Card)]) -> Option<(Seat, Card)> {
        let (first_seat, first_card) = *trick.first()?;
        let lead = first_card.suit;
        Some(
            trick
                .iter()
                .skip(1)
                .fold((first_seat, first_card), |best, &(seat, card)| {
                    if card_beats(card, best.1, lead) {
                        (seat, card)
                    } else {
                        best
                    }
                }),
        )
    }

    fn choose_lead(hand: &[Card], legal: &[Card]) -> Option<Card> {
        let longest = [Suit::Hearts, Suit::Diamonds, Suit::Clubs]
            .into_iter()
            .filter(|&s| legal.iter().any(|c| c.suit == s))
            .max_by_key(|&s| (count_suit(hand, s), std::cmp::Reverse(s)));
        match longest {
            Some(suit) => {
                let in_suit: Vec<Card> = legal.iter().copied().filter(|c| c.suit == suit).collect();
                Self::lowest(&in_suit)
            }
            None => Self::lowest(legal),
        }
    }

    fn choose_follow(ctx: &PlayContext<'_>, legal: &[Card]) -> Option<Card> {
        let (winner_seat, winning) = Self::current_winner(ctx.current_trick)?;
        let lead = ctx.lead_suit()?;

        if ctx.partner() == Some(winner_seat) {
            return Self::lowest_off_trump(legal);
        }

        let winners: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|&c| card_beats(c, winning, lead))
            .collect();
        Self::lowest(&winners).or_else(|| Self::lowest_off_trump(legal))
    }
}

impl DecisionProvider for Heuristic {
    fn choose_bid(&self, ctx: &BidContext<'_>) -> Result<Bid, AiError> {
        let entry = strategy_for(ctx.format());
        Ok((entry.choose)(ctx))
    }

    fn choose_card(&self, ctx: &PlayContext<'_>) -> Result<Card, AiError> {
        let legal = ctx.legal_cards();
        if legal.is_empty() {
            return Err(AiError::NoLegalMove("no legal cards available".into()));
        }
        let choice = if ctx.current_trick.is_empty() {
            Self::choose_lead(ctx.hand, &legal)
        } else {
            Self::choose_follow(ctx, &legal)
        };
        choice.ok_or_else(|| AiError::Internal("heuristic produced no card".into()))
    }
}
