//! Infrastructure layer: wiring the engine's services together.

pub mod state;
