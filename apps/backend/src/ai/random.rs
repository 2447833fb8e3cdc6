//! Random provider: uniform choice among legal bids and cards.
//!
//! Seeded instances are reproducible, which the engine relies on when it
//! derives a per-seat seed from the game seed.

use std::sync::Mutex;

use rand::prelude::*;

use super::context::{BidContext, PlayContext};
use super::trait_def::{AiError, DecisionProvider};
use crate::domain::{Bid, Card};

pub struct RandomPlayer {
    /// `DecisionProvider` takes `&self`, the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn pick<T: Copy>(&self, options: &[T], what: &str) -> Result<T, AiError> {
        if options.is_empty() {
            return Err(AiError::NoLegalMove(format!("no legal {what} available")));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal(format!("failed to choose random {what}")))
    }
}

impl DecisionProvider for RandomPlayer {
    fn choose_bid(&self, ctx: &BidContext<'_>) -> Result<Bid, AiError> {
        let values = ctx.legal_values();
        self.pick(&values, "bids").map(Bid::new)
    }

    fn choose_card(&self, ctx: &PlayContext<'_>) -> Result<Card, AiError> {
        let legal = ctx.legal_cards();
        self.pick(&legal, "cards")
    }
}
