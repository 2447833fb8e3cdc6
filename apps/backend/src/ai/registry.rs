//! Registered decision providers.
//!
//! To add one: implement `DecisionProvider`, then append an `AiFactory`
//! entry with a stable `name`. Same seed must give the same behaviour.

use crate::ai::{DecisionProvider, Heuristic, RandomPlayer};

/// Factory definition for constructing providers.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn DecisionProvider>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        make: make_heuristic,
    },
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
];

/// Name used when a bot seat or a timeout does not name a provider.
pub const DEFAULT_PROVIDER: &str = Heuristic::NAME;

pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

fn make_random_player(seed: Option<u64>) -> Box<dyn DecisionProvider> {
    Box::new(RandomPlayer::new(seed))
}

fn make_heuristic(seed: Option<u64>) -> Box<dyn DecisionProvider> {
    Box::new(Heuristic::new(seed))
}
