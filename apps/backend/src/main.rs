//! Self-play runner: seats four bots, plays full games and reports the result.
//!
//! Usage: `spades-backend [games] [seed]`

use std::sync::Arc;

use spades_backend::domain::rules::GameSettings;
use spades_backend::domain::state::{GameStatus, Occupant};
use spades_backend::infra::state::build_state;
use spades_backend::services::persistence::InMemoryPersistence;
use tracing::info;

mod telemetry;

fn arg<T: std::str::FromStr>(pos: usize, name: &str) -> Option<T> {
    let raw = std::env::args().nth(pos)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("❌ {name} must be a number, got '{raw}'");
            std::process::exit(2);
        }
    }
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    let games: u32 = arg(1, "games").unwrap_or(1);
    let base_seed: Option<u64> = arg(2, "seed");

    let store = Arc::new(InMemoryPersistence::new());
    let state = match build_state().with_env_config() {
        Ok(builder) => builder.with_persistence(store.clone()).build().await,
        Err(e) => Err(e),
    };
    let state = match state {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build engine state: {e}");
            std::process::exit(1);
        }
    };
    let flow = state.flow();
    let provider = flow.config().provider.clone();

    for n in 0..games {
        let settings = GameSettings {
            seed: base_seed.map(|s| s.wrapping_add(u64::from(n))),
            ..GameSettings::default()
        };
        let result = async {
            let game_id = flow.create_game(settings)?;
            for seat in 0..4 {
                flow.join_seat(game_id, seat, Occupant::bot(provider.clone()))?;
            }
            flow.start_game(game_id)?;
            let last = flow.snapshot(game_id)?;
            let (status, rounds, points, winner) = (last.status, last.round_no, last.scores.points, last.winner);
            let stats = flow.stats(game_id).await?;
            Ok::<_, spades_backend::AppError>((game_id, status, rounds, points, winner, stats))
        }
        .await;

        match result {
            Ok((game_id, status, rounds, points, winner, stats)) => {
                info!(game_id, ?status, rounds, ?points, ?winner, tricks = stats.tricks, "self-play game done");
                if status == GameStatus::Finished {
                    println!(
                        "game {game_id}: side {} wins after {rounds} rounds ({} - {}), {} tricks logged",
                        winner.unwrap_or_default(),
                        points[0],
                        points[1],
                        stats.tricks
                    );
                } else {
                    println!("game {game_id}: stopped while {status:?}");
                }
            }
            Err(e) => {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
        }
    }
}
