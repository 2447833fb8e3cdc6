//! Engine wiring for integration tests.

use std::sync::Arc;

use spades_backend::domain::rules::GameSettings;
use spades_backend::domain::state::{GameId, Occupant, Seat};
use spades_backend::infra::state::build_state;
use spades_backend::services::persistence::InMemoryPersistence;
use spades_backend::services::timeouts::Scheduler;
use spades_backend::{EngineConfig, EngineState, GameFlowService};

use super::RecordingNotifier;

pub struct TestEngine {
    pub state: EngineState,
    pub store: Arc<InMemoryPersistence>,
    pub events: Arc<RecordingNotifier>,
}

impl TestEngine {
    pub fn flow(&self) -> &GameFlowService {
        self.state.flow()
    }

    /// One human at `human`, bots everywhere else, not yet started.
    pub fn seat_table(&self, settings: GameSettings, human: Seat) -> GameId {
        self.seat_humans(settings, &[human])
    }

    /// Humans at `humans`, bots everywhere else, not yet started.
    pub fn seat_humans(&self, settings: GameSettings, humans: &[Seat]) -> GameId {
        let flow = self.flow();
        let game_id = flow.create_game(settings).expect("valid settings");
        for seat in 0..4 {
            let occupant = if humans.contains(&seat) {
                Occupant::human(format!("user-{seat}"), format!("Player {seat}"))
            } else {
                Occupant::bot("heuristic")
            };
            flow.join_seat(game_id, seat, occupant).expect("empty seat");
        }
        game_id
    }
}

pub async fn test_engine(config: EngineConfig, scheduler: Option<Arc<dyn Scheduler>>) -> TestEngine {
    let store = Arc::new(InMemoryPersistence::new());
    let events = Arc::new(RecordingNotifier::default());
    let mut builder = build_state()
        .with_config(config)
        .with_persistence(store.clone())
        .with_notifier(events.clone());
    if let Some(s) = scheduler {
        builder = builder.with_scheduler(s);
    }
    let state = builder.build().await.expect("engine builds");
    TestEngine { state, store, events }
}

/// Four bots with the default provider, started; they play it out inline.
pub fn bot_game(engine: &TestEngine, seed: u64) -> GameId {
    let flow = engine.flow();
    let settings = GameSettings {
        seed: Some(seed),
        ..GameSettings::default()
    };
    let game_id = flow.create_game(settings).expect("valid settings");
    for seat in 0..4 {
        flow.join_seat(game_id, seat, Occupant::bot("heuristic")).expect("empty seat");
    }
    flow.start_game(game_id).expect("four seats filled");
    game_id
}

/// Seat that bids (and leads) first for a game seeded with `seed`.
pub fn first_bidder(seed: u64) -> Seat {
    ((seed % 4 + 1) % 4) as Seat
}
