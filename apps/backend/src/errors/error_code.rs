//! Error codes surfaced by the engine to callers.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are what a transport layer
//! forwards to the acting seat.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn and move validation
    /// Seat acted when it was not on turn
    OutOfTurn,
    /// Bid outside the format's legal set or nil while disallowed
    IllegalBid,
    /// Card not in hand
    CardNotInHand,
    /// Must follow suit
    MustFollowSuit,
    /// Spades led before broken while holding another suit
    SpadesNotBroken,
    /// Screamer / Assassin restriction
    SpecialRule,
    /// Phase mismatch
    PhaseMismatch,
    /// Invalid seat number
    InvalidSeat,
    /// Invalid game settings
    InvalidSettings,
    /// Parse card error
    ParseCard,
    /// General validation error
    ValidationError,

    // Resource not found
    GameNotFound,
    SeatNotFound,
    NotFound,

    // Conflicts
    SeatTaken,
    GameAlreadyStarted,
    Conflict,

    // Infrastructure
    PersistenceUnavailable,
    SchedulerUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::IllegalBid => "ILLEGAL_BID",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::SpadesNotBroken => "SPADES_NOT_BROKEN",
            Self::SpecialRule => "SPECIAL_RULE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidSeat => "INVALID_SEAT",
            Self::InvalidSettings => "INVALID_SETTINGS",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::SeatNotFound => "SEAT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::SeatTaken => "SEAT_TAKEN",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::Conflict => "CONFLICT",

            Self::PersistenceUnavailable => "PERSISTENCE_UNAVAILABLE",
            Self::SchedulerUnavailable => "SCHEDULER_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
