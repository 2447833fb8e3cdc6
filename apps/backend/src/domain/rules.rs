//! Game variants, rule flags and settings validation.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: u8 = 13;
pub const TRICKS_PER_ROUND: u8 = 13;
pub const MAX_BID: u8 = 13;

/// Allowed range for either score threshold.
pub const MIN_LIMIT: i32 = -1000;
pub const MAX_LIMIT: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Seats 0/2 against 1/3.
    Partners,
    /// Every seat for itself.
    Solo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GimmickVariant {
    /// One partner per side must bid nil.
    Suicide,
    Bid4OrNil,
    Bid3,
    BidHearts,
    /// Three tricks per ace held.
    CrazyAces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "variant")]
pub enum GameFormat {
    Regular,
    /// Nil or the number of spades held.
    Whiz,
    /// Exactly the number of spades held.
    Mirror,
    Gimmick(GimmickVariant),
}

impl GameFormat {
    pub fn gimmick(&self) -> Option<GimmickVariant> {
        match self {
            GameFormat::Gimmick(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRule {
    /// No spades unless spades were led or nothing else is held.
    Screamer,
    /// Lead spades once broken and cut with spades when void.
    Assassin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFlags {
    pub allow_nil: bool,
    pub allow_blind_nil: bool,
    pub special: Option<SpecialRule>,
}

impl Default for RuleFlags {
    fn default() -> Self {
        Self {
            allow_nil: true,
            allow_blind_nil: false,
            special: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLimits {
    pub min_points: i32,
    pub max_points: i32,
}

impl Default for ScoreLimits {
    fn default() -> Self {
        Self {
            min_points: -100,
            max_points: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub mode: GameMode,
    pub format: GameFormat,
    pub rules: RuleFlags,
    pub limits: ScoreLimits,
    /// League game: escalation follows the rated policy.
    pub rated: bool,
    /// Base seed for deals. Drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Partners,
            format: GameFormat::Regular,
            rules: RuleFlags::default(),
            limits: ScoreLimits::default(),
            rated: false,
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        let ScoreLimits {
            min_points,
            max_points,
        } = self.limits;
        if min_points >= max_points {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                format!("min_points {min_points} must be below max_points {max_points}"),
            ));
        }
        for v in [min_points, max_points] {
            if !(MIN_LIMIT..=MAX_LIMIT).contains(&v) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSettings,
                    format!("score limit {v} outside {MIN_LIMIT}..={MAX_LIMIT}"),
                ));
            }
        }
        if self.format == GameFormat::Gimmick(GimmickVariant::Suicide) {
            if self.mode != GameMode::Partners {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSettings,
                    "suicide requires partners mode",
                ));
            }
            if !self.rules.allow_nil {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSettings,
                    "suicide requires nil bids",
                ));
            }
        }
        if self.rules.allow_blind_nil && !self.rules.allow_nil {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "blind nil requires nil bids",
            ));
        }
        Ok(())
    }
}
