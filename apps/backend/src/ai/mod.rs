//! Automated decisions for bot seats and timed-out turns.
//!
//! - `DecisionProvider`: the seam the engine calls through
//! - `Heuristic`: deterministic baseline, the default
//! - `RandomPlayer`: uniform legal moves, seedable for tests
//! - `registry`: name to factory lookup

pub mod bid_strategies;
pub mod context;
mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use context::{bid_context, play_context, BidContext, PlayContext};
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use registry::{by_name, registered_ais, AiFactory, DEFAULT_PROVIDER};
pub use trait_def::{AiError, DecisionProvider};
