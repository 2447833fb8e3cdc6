//! In-process fan-out of game notifications.

mod hub;

pub use hub::GameEventHub;
