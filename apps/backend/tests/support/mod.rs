#![allow(dead_code)]

pub mod engine;
pub mod manual_scheduler;
pub mod recorder;

pub use engine::{bot_game, first_bidder, test_engine, TestEngine};
pub use manual_scheduler::ManualScheduler;
pub use recorder::RecordingNotifier;
