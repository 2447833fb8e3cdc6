//! Decision provider trait used for bot seats and timed-out turns.

use std::fmt;

use crate::ai::context::{BidContext, PlayContext};
use crate::domain::{Bid, Card};
use crate::error::AppError;

#[derive(Debug)]
pub enum AiError {
    /// Provider had nothing legal to offer
    NoLegalMove(String),
    /// Provider state failure (poisoned RNG, bad config)
    Internal(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::NoLegalMove(msg) => write!(f, "no legal move: {msg}"),
            AiError::Internal(msg) => write!(f, "provider internal error: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("decision provider: {err}"))
    }
}

/// Chooses bids and cards for seats the engine acts for.
///
/// Implementations should return legal values, but the engine re-validates
/// and replaces anything illegal before it touches game state.
pub trait DecisionProvider: Send + Sync {
    fn choose_bid(&self, ctx: &BidContext<'_>) -> Result<Bid, AiError>;

    fn choose_card(&self, ctx: &PlayContext<'_>) -> Result<Card, AiError>;
}
