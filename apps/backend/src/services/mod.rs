pub mod game_flow;
pub mod notifications;
pub mod persistence;
pub mod registry;
pub mod timeouts;

pub use game_flow::GameFlowService;
