//! Live games by id, plus the final snapshots of recently finished ones.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::rules::GameSettings;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{GameId, GameState};
use crate::errors::domain::{DomainError, NotFoundKind};

pub type GameHandle = Arc<Mutex<GameState>>;

pub const DEFAULT_FINISHED_RETENTION: usize = 128;

#[derive(Debug)]
pub struct GameRegistry {
    games: DashMap<GameId, GameHandle>,
    /// Oldest first; capped at `retention`.
    finished: Mutex<VecDeque<GameSnapshot>>,
    retention: usize,
    next_id: AtomicU64,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_FINISHED_RETENTION)
    }

    pub fn with_retention(retention: usize) -> Self {
        Self {
            games: DashMap::new(),
            finished: Mutex::new(VecDeque::new()),
            retention,
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a fresh Waiting game.
    pub fn create(&self, settings: GameSettings, seed: u64) -> GameHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = Arc::new(Mutex::new(GameState::new(id, settings, seed)));
        self.games.insert(id, handle.clone());
        handle
    }

    pub fn get(&self, game_id: GameId) -> Result<GameHandle, DomainError> {
        self.games
            .get(&game_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found")))
    }

    pub fn remove(&self, game_id: GameId) -> Option<GameHandle> {
        self.games.remove(&game_id).map(|(_, handle)| handle)
    }

    /// Drop a finished game from the live set, keeping its final snapshot.
    pub fn retire(&self, game_id: GameId, last: GameSnapshot) -> Option<GameHandle> {
        let handle = self.remove(game_id);
        if self.retention > 0 {
            let mut finished = self.finished.lock();
            if finished.len() == self.retention {
                finished.pop_front();
            }
            finished.push_back(last);
        }
        handle
    }

    pub fn finished(&self, game_id: GameId) -> Option<GameSnapshot> {
        self.finished
            .lock()
            .iter()
            .rev()
            .find(|snap| snap.game_id == game_id)
            .cloned()
    }

    pub fn contains(&self, game_id: GameId) -> bool {
        self.games.contains_key(&game_id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
