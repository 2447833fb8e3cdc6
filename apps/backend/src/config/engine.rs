use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::scoring::ScoringRules;
use crate::domain::state::TurnPhase;
use crate::error::AppError;

/// What to do with a rated seat that keeps timing out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatedEscalation {
    /// Hand the seat to a bot so the game can finish.
    #[default]
    SubstituteBot,
    /// Empty the seat, as for unrated games.
    Vacate,
}

impl FromStr for RatedEscalation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substitute_bot" | "bot" => Ok(RatedEscalation::SubstituteBot),
            "vacate" => Ok(RatedEscalation::Vacate),
            other => Err(AppError::config(format!(
                "SPADES_RATED_ESCALATION must be 'substitute_bot' or 'vacate', got '{other}'"
            ))),
        }
    }
}

/// Engine tunables. `Default` holds the production values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub bidding_timeout: Duration,
    pub playing_timeout: Duration,
    /// How long before the hard deadline the countdown warning fires.
    pub warning_lead: Duration,
    pub consecutive_timeout_limit: u32,
    pub rated_escalation: RatedEscalation,
    pub scoring: ScoringRules,
    /// Provider used for bot seats and auto-actions.
    pub provider: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bidding_timeout: Duration::from_millis(30_000),
            playing_timeout: Duration::from_millis(45_000),
            warning_lead: Duration::from_millis(10_000),
            consecutive_timeout_limit: 3,
            rated_escalation: RatedEscalation::default(),
            scoring: ScoringRules::default(),
            provider: crate::ai::DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by any `SPADES_*` variables that are set.
    pub fn from_env() -> Result<Self, AppError> {
        let mut cfg = Self::default();
        if let Some(ms) = parse_var::<u64>("SPADES_BIDDING_TIMEOUT_MS")? {
            cfg.bidding_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>("SPADES_PLAYING_TIMEOUT_MS")? {
            cfg.playing_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>("SPADES_WARNING_LEAD_MS")? {
            cfg.warning_lead = Duration::from_millis(ms);
        }
        if let Some(limit) = parse_var::<u32>("SPADES_CONSECUTIVE_TIMEOUT_LIMIT")? {
            cfg.consecutive_timeout_limit = limit;
        }
        if let Some(policy) = parse_var::<RatedEscalation>("SPADES_RATED_ESCALATION")? {
            cfg.rated_escalation = policy;
        }
        if let Some(threshold) = parse_var::<u32>("SPADES_BAG_THRESHOLD")? {
            cfg.scoring.bag_threshold = threshold;
        }
        if let Some(penalty) = parse_var::<i32>("SPADES_BAG_PENALTY")? {
            cfg.scoring.bag_penalty = penalty;
        }
        if let Some(name) = var("SPADES_BOT_PROVIDER")? {
            if crate::ai::by_name(&name).is_none() {
                return Err(AppError::config(format!("Unknown SPADES_BOT_PROVIDER '{name}'")));
            }
            cfg.provider = name;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.consecutive_timeout_limit == 0 {
            return Err(AppError::config("SPADES_CONSECUTIVE_TIMEOUT_LIMIT must be at least 1"));
        }
        if self.bidding_timeout.is_zero() || self.playing_timeout.is_zero() {
            return Err(AppError::config("Turn timeouts must be positive"));
        }
        if self.scoring.bag_threshold == 0 {
            return Err(AppError::config("SPADES_BAG_THRESHOLD must be at least 1"));
        }
        Ok(())
    }

    pub fn turn_timeout(&self, phase: TurnPhase) -> Duration {
        match phase {
            TurnPhase::Bidding => self.bidding_timeout,
            TurnPhase::Playing => self.playing_timeout,
        }
    }

    /// Delay until the countdown warning, or None when the lead covers the whole turn.
    pub fn warning_delay(&self, phase: TurnPhase) -> Option<Duration> {
        let timeout = self.turn_timeout(phase);
        (self.warning_lead > Duration::ZERO && self.warning_lead < timeout)
            .then(|| timeout - self.warning_lead)
    }
}

fn var(name: &str) -> Result<Option<String>, AppError> {
    match env::var(name) {
        Ok(v) if v.trim().is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::from(e)),
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(name)?
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::config(format!("Invalid {name}='{raw}': {e}")))
        })
        .transpose()
}
