//! Shared test support for the spades engine crates.

pub mod logging;
