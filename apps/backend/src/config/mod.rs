pub mod engine;

pub use engine::{EngineConfig, RatedEscalation};
