use tracing::info;

use super::{Effect, Effects, GameFlowService};
use crate::domain::round::{self, complete_hand};
use crate::domain::scoring::GameOutcome;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::GameState;
use crate::errors::domain::DomainError;
use crate::services::notifications::Notification;

impl GameFlowService {
    /// Deal round 1 and open the first persisted round.
    pub(super) fn begin_game(&self, state: &mut GameState, fx: &mut Effects) -> Result<(), DomainError> {
        round::start_game(state)?;
        info!(game_id = state.id, dealer = state.dealer, "game started");
        fx.push(Effect::StartRound(state.round_no));
        fx.notify(Notification::game_update(GameSnapshot::of(state)));
        Ok(())
    }

    /// Score the thirteenth trick's round, then either finish or deal again.
    pub(super) fn finish_hand(&self, state: &mut GameState, fx: &mut Effects) -> Result<(), DomainError> {
        let result = complete_hand(state, &self.config.scoring)?;
        info!(
            game_id = state.id,
            round_no = result.score.round_no,
            points = ?state.scores.points,
            "hand complete"
        );
        fx.push(Effect::LogRoundScore(result.score.clone()));
        fx.notify(Notification::HandSummary {
            score: result.score,
        });

        match result.outcome {
            GameOutcome::Winner(winner) => {
                info!(game_id = state.id, winner, "game finished");
                let sides = crate::domain::state::side_count(state.settings.mode);
                fx.notify(Notification::GameComplete {
                    winner,
                    points: state.scores.points[..sides].to_vec(),
                });
            }
            GameOutcome::Continue => {
                if let Some(next) = result.next_round {
                    fx.push(Effect::StartRound(next));
                }
            }
        }
        Ok(())
    }
}
