use tracing::{debug, warn};

use super::{Effects, GameFlowService};
use crate::ai::{self, bid_context, play_context, AiFactory, DecisionProvider, PlayContext};
use crate::domain::bidding::clamp_bid;
use crate::domain::seed_derivation::derive_bot_seed;
use crate::domain::state::{GameState, Seat, TurnPhase};
use crate::domain::tricks::{auto_play_card, check_play};
use crate::domain::{Bid, Card};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::notifications::AutoAction;

fn factory_for(name: &str) -> Option<&'static AiFactory> {
    ai::by_name(name).or_else(|| {
        warn!(provider = name, "unknown provider, using default");
        ai::by_name(ai::DEFAULT_PROVIDER)
    })
}

/// Seeded from the game, seat and turn so replays choose the same moves.
fn provider_for(state: &GameState, seat: Seat, name: &str) -> Result<Box<dyn DecisionProvider>, DomainError> {
    let factory = factory_for(name).ok_or_else(|| {
        DomainError::validation_other(format!("no decision provider registered as '{name}'"))
    })?;
    let seed = derive_bot_seed(state.seed ^ state.turn_generation, seat);
    Ok((factory.make)(Some(seed)))
}

impl GameFlowService {
    /// Provider bid, clamped to what the seat may legally bid.
    fn pick_bid(&self, state: &GameState, seat: Seat, name: &str) -> Result<Bid, DomainError> {
        let provider = provider_for(state, seat, name)?;
        let ctx = bid_context(state, seat).ok_or_else(|| {
            DomainError::validation(ValidationKind::PhaseMismatch, "No bidding in progress")
        })?;
        let suggested = match provider.choose_bid(&ctx) {
            Ok(bid) => bid,
            Err(err) => {
                debug!(game_id = state.id, seat, error = %err, "provider bid failed");
                Bid::new(1)
            }
        };
        Ok(clamp_bid(
            &state.settings,
            ctx.hand,
            seat,
            ctx.existing_bids,
            suggested,
        ))
    }

    fn play_view<'a>(&self, state: &'a GameState, seat: Seat) -> Result<PlayContext<'a>, DomainError> {
        play_context(state, seat).ok_or_else(|| {
            DomainError::validation(ValidationKind::PhaseMismatch, "No trick in progress")
        })
    }

    fn suggested_card(&self, state: &GameState, ctx: &PlayContext<'_>, name: &str) -> Result<Option<Card>, DomainError> {
        let provider = provider_for(state, ctx.seat, name)?;
        Ok(match provider.choose_card(ctx) {
            Ok(card) => Some(card),
            Err(err) => {
                debug!(game_id = state.id, seat = ctx.seat, error = %err, "provider card failed");
                None
            }
        })
    }

    /// Card for a timed-out seat: the provider's choice when it satisfies the
    /// auto-play preference, otherwise the engine's fallback.
    fn pick_auto_card(&self, state: &GameState, seat: Seat, name: &str) -> Result<Card, DomainError> {
        let ctx = self.play_view(state, seat)?;
        let suggested = self.suggested_card(state, &ctx, name)?;
        auto_play_card(ctx.hand, ctx.current_trick, ctx.trump_broken, ctx.special, suggested)
            .ok_or_else(|| DomainError::validation(ValidationKind::CardNotInHand, "No card left to play"))
    }

    /// Card for a bot seat: any legal provider choice is accepted.
    fn pick_bot_card(&self, state: &GameState, seat: Seat, name: &str) -> Result<Card, DomainError> {
        let ctx = self.play_view(state, seat)?;
        if let Some(card) = self.suggested_card(state, &ctx, name)? {
            if check_play(ctx.hand, ctx.current_trick, ctx.trump_broken, ctx.special, card).is_ok() {
                return Ok(card);
            }
            warn!(game_id = state.id, seat, %card, "provider chose an illegal card");
        }
        auto_play_card(ctx.hand, ctx.current_trick, ctx.trump_broken, ctx.special, None)
            .ok_or_else(|| DomainError::validation(ValidationKind::CardNotInHand, "No card left to play"))
    }

    pub(super) fn bot_act(
        &self,
        state: &mut GameState,
        seat: Seat,
        phase: TurnPhase,
        provider: &str,
        fx: &mut Effects,
    ) -> Result<(), DomainError> {
        match phase {
            TurnPhase::Bidding => {
                let bid = self.pick_bid(state, seat, provider)?;
                debug!(game_id = state.id, seat, %bid, "bot bids");
                self.apply_bid(state, seat, bid, fx)?;
            }
            TurnPhase::Playing => {
                let card = self.pick_bot_card(state, seat, provider)?;
                debug!(game_id = state.id, seat, %card, "bot plays");
                self.apply_card(state, seat, card, fx)?;
            }
        }
        Ok(())
    }

    /// Act for a human seat whose clock ran out.
    pub(super) fn auto_act(
        &self,
        state: &mut GameState,
        seat: Seat,
        phase: TurnPhase,
        fx: &mut Effects,
    ) -> Result<AutoAction, DomainError> {
        let provider = self.config.provider.clone();
        match phase {
            TurnPhase::Bidding => {
                let bid = self.pick_bid(state, seat, &provider)?;
                self.apply_bid(state, seat, bid, fx)?;
                Ok(AutoAction::Bid { bid })
            }
            TurnPhase::Playing => {
                let card = self.pick_auto_card(state, seat, &provider)?;
                self.apply_card(state, seat, card, fx)?;
                Ok(AutoAction::Card { card })
            }
        }
    }
}
