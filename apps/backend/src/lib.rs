#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod realtime;
pub mod services;
pub mod state;

// Re-exports for public API
pub use config::{EngineConfig, RatedEscalation};
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::state::build_state;
pub use services::GameFlowService;
pub use state::app_state::EngineState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
