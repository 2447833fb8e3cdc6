//! Durable trick logging.
//!
//! The engine never awaits persistence on the turn path. Writes go through
//! [`PersistenceQueue`], an ordered channel drained by one background task;
//! failures are logged and dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::scoring::RoundScore;
use crate::domain::state::{GameId, Seat};
use crate::domain::tricks::CompletedTrick;
use crate::domain::{Bid, Rank, Suit};
use crate::error::AppError;

pub type RoundId = u64;
pub type TrickId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    pub seat: Seat,
    pub suit: Suit,
    pub rank: Rank,
    /// Order of play within the trick, 0 for the lead.
    pub position: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickRecord {
    pub trick_no: u8,
    pub lead_seat: Seat,
    pub winner_seat: Seat,
    pub cards: Vec<CardRecord>,
}

impl TrickRecord {
    pub fn from_completed(trick: &CompletedTrick) -> Self {
        let cards = trick
            .plays
            .iter()
            .enumerate()
            .map(|(position, &(seat, card))| CardRecord {
                seat,
                suit: card.suit,
                rank: card.rank,
                position: position as u8,
            })
            .collect();
        Self {
            trick_no: trick.trick_no,
            lead_seat: trick.leader,
            winner_seat: trick.winner,
            cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScoreRecord {
    pub round_no: u32,
    pub bids: Vec<Bid>,
    pub tricks: Vec<u8>,
    pub side_points: Vec<i32>,
    pub side_totals: Vec<i32>,
    pub side_bags: Vec<u32>,
}

impl From<&RoundScore> for RoundScoreRecord {
    fn from(score: &RoundScore) -> Self {
        Self {
            round_no: score.round_no,
            bids: score.bids.to_vec(),
            tricks: score.tricks.to_vec(),
            side_points: score.sides.iter().map(|s| s.points).collect(),
            side_totals: score.sides.iter().map(|s| s.total_points).collect(),
            side_bags: score.sides.iter().map(|s| s.total_bags).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub rounds: usize,
    pub tricks: usize,
    pub cards: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("persistence backend unavailable: {0}")]
    Unavailable(String),
    #[error("unknown round {0}")]
    UnknownRound(RoundId),
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        AppError::persistence_unavailable(err.to_string())
    }
}

#[async_trait]
pub trait PersistenceLogger: Send + Sync {
    async fn start_round(&self, game_id: GameId, round_no: u32)
        -> Result<RoundId, PersistenceError>;

    async fn log_trick(
        &self,
        round_id: RoundId,
        record: TrickRecord,
    ) -> Result<TrickId, PersistenceError>;

    async fn log_round_score(
        &self,
        round_id: RoundId,
        record: RoundScoreRecord,
    ) -> Result<(), PersistenceError>;

    async fn get_stats(&self, game_id: GameId) -> Result<GameStats, PersistenceError>;

    async fn delete_game(&self, game_id: GameId) -> Result<(), PersistenceError>;
}

/// Accepts everything, stores nothing.
#[derive(Debug, Default)]
pub struct NoopPersistence;

#[async_trait]
impl PersistenceLogger for NoopPersistence {
    async fn start_round(&self, _game_id: GameId, _round_no: u32) -> Result<RoundId, PersistenceError> {
        Ok(0)
    }

    async fn log_trick(&self, _round_id: RoundId, _record: TrickRecord) -> Result<TrickId, PersistenceError> {
        Ok(0)
    }

    async fn log_round_score(
        &self,
        _round_id: RoundId,
        _record: RoundScoreRecord,
    ) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn get_stats(&self, _game_id: GameId) -> Result<GameStats, PersistenceError> {
        Ok(GameStats::default())
    }

    async fn delete_game(&self, _game_id: GameId) -> Result<(), PersistenceError> {
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryInner {
    next_id: u64,
    rounds: HashMap<RoundId, (GameId, u32)>,
    tricks: Vec<(RoundId, TrickId, TrickRecord)>,
    scores: Vec<(RoundId, RoundScoreRecord)>,
}

impl InMemoryInner {
    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn rounds_of(&self, game_id: GameId) -> impl Iterator<Item = RoundId> + '_ {
        self.rounds
            .iter()
            .filter(move |(_, (g, _))| *g == game_id)
            .map(|(id, _)| *id)
    }
}

/// Process-local store for tests and the self-play runner.
#[derive(Default)]
pub struct InMemoryPersistence {
    inner: Mutex<InMemoryInner>,
    unavailable: AtomicBool,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with `Unavailable`.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(PersistenceError::Unavailable("store offline".into()))
        } else {
            Ok(())
        }
    }

    /// Tricks for a game in insertion order.
    pub fn tricks_for(&self, game_id: GameId) -> Vec<TrickRecord> {
        let inner = self.inner.lock();
        inner
            .tricks
            .iter()
            .filter(|(round, _, _)| inner.rounds.get(round).is_some_and(|(g, _)| *g == game_id))
            .map(|(_, _, record)| record.clone())
            .collect()
    }

    pub fn round_scores_for(&self, game_id: GameId) -> Vec<RoundScoreRecord> {
        let inner = self.inner.lock();
        inner
            .scores
            .iter()
            .filter(|(round, _)| inner.rounds.get(round).is_some_and(|(g, _)| *g == game_id))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

#[async_trait]
impl PersistenceLogger for InMemoryPersistence {
    async fn start_round(&self, game_id: GameId, round_no: u32) -> Result<RoundId, PersistenceError> {
        self.check()?;
        let mut inner = self.inner.lock();
        let id = inner.alloc();
        inner.rounds.insert(id, (game_id, round_no));
        Ok(id)
    }

    async fn log_trick(&self, round_id: RoundId, record: TrickRecord) -> Result<TrickId, PersistenceError> {
        self.check()?;
        let mut inner = self.inner.lock();
        if !inner.rounds.contains_key(&round_id) {
            return Err(PersistenceError::UnknownRound(round_id));
        }
        let id = inner.alloc();
        inner.tricks.push((round_id, id, record));
        Ok(id)
    }

    async fn log_round_score(
        &self,
        round_id: RoundId,
        record: RoundScoreRecord,
    ) -> Result<(), PersistenceError> {
        self.check()?;
        let mut inner = self.inner.lock();
        if !inner.rounds.contains_key(&round_id) {
            return Err(PersistenceError::UnknownRound(round_id));
        }
        inner.scores.push((round_id, record));
        Ok(())
    }

    async fn get_stats(&self, game_id: GameId) -> Result<GameStats, PersistenceError> {
        self.check()?;
        let inner = self.inner.lock();
        let rounds: Vec<RoundId> = inner.rounds_of(game_id).collect();
        let tricks: Vec<&TrickRecord> = inner
            .tricks
            .iter()
            .filter(|(round, _, _)| rounds.contains(round))
            .map(|(_, _, record)| record)
            .collect();
        Ok(GameStats {
            rounds: rounds.len(),
            tricks: tricks.len(),
            cards: tricks.iter().map(|t| t.cards.len()).sum(),
        })
    }

    async fn delete_game(&self, game_id: GameId) -> Result<(), PersistenceError> {
        self.check()?;
        let mut inner = self.inner.lock();
        let rounds: Vec<RoundId> = inner.rounds_of(game_id).collect();
        inner.tricks.retain(|(round, _, _)| !rounds.contains(round));
        inner.scores.retain(|(round, _)| !rounds.contains(round));
        inner.rounds.retain(|id, _| !rounds.contains(id));
        Ok(())
    }
}

enum Command {
    StartRound {
        game_id: GameId,
        round_no: u32,
    },
    LogTrick {
        game_id: GameId,
        round_no: u32,
        record: TrickRecord,
    },
    LogRoundScore {
        game_id: GameId,
        round_no: u32,
        record: RoundScoreRecord,
    },
    DeleteGame {
        game_id: GameId,
    },
    CloseGame {
        game_id: GameId,
    },
    Flush(oneshot::Sender<()>),
}

/// Ordered, fire-and-forget front for a [`PersistenceLogger`].
///
/// Round ids are resolved inside the worker, so callers address rounds by
/// `(game_id, round_no)`.
#[derive(Clone)]
pub struct PersistenceQueue {
    tx: mpsc::UnboundedSender<Command>,
    logger: Arc<dyn PersistenceLogger>,
}

impl PersistenceQueue {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(logger: Arc<dyn PersistenceLogger>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(logger.clone(), rx));
        Self { tx, logger }
    }

    pub fn logger(&self) -> &Arc<dyn PersistenceLogger> {
        &self.logger
    }

    fn send(&self, cmd: Command) {
        if self.tx.send(cmd).is_err() {
            warn!(code = "PERSISTENCE_UNAVAILABLE", "persistence worker stopped; write dropped");
        }
    }

    pub fn start_round(&self, game_id: GameId, round_no: u32) {
        self.send(Command::StartRound { game_id, round_no });
    }

    pub fn log_trick(&self, game_id: GameId, round_no: u32, trick: &CompletedTrick) {
        self.send(Command::LogTrick {
            game_id,
            round_no,
            record: TrickRecord::from_completed(trick),
        });
    }

    pub fn log_round_score(&self, game_id: GameId, score: &RoundScore) {
        self.send(Command::LogRoundScore {
            game_id,
            round_no: score.round_no,
            record: RoundScoreRecord::from(score),
        });
    }

    pub fn delete_game(&self, game_id: GameId) {
        self.send(Command::DeleteGame { game_id });
    }

    /// Forget a finished game's round ids. Its records stay.
    pub fn close_game(&self, game_id: GameId) {
        self.send(Command::CloseGame { game_id });
    }

    /// Resolves once every write queued before the call has been attempted.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(Command::Flush(done_tx));
        let _ = done_rx.await;
    }

    pub async fn stats(&self, game_id: GameId) -> Result<GameStats, AppError> {
        self.flush().await;
        Ok(self.logger.get_stats(game_id).await?)
    }
}

async fn run_worker(logger: Arc<dyn PersistenceLogger>, mut rx: mpsc::UnboundedReceiver<Command>) {
    let mut round_ids: HashMap<(GameId, u32), RoundId> = HashMap::new();

    while let Some(cmd) = rx.recv().await {
        match cmd {
            Command::StartRound { game_id, round_no } => {
                match logger.start_round(game_id, round_no).await {
                    Ok(id) => {
                        round_ids.insert((game_id, round_no), id);
                    }
                    Err(err) => {
                        warn!(game_id, round_no, error = %err, code = "PERSISTENCE_UNAVAILABLE", "start_round failed");
                    }
                }
            }
            Command::LogTrick {
                game_id,
                round_no,
                record,
            } => {
                let Some(&round_id) = round_ids.get(&(game_id, round_no)) else {
                    warn!(game_id, round_no, trick_no = record.trick_no, "no persisted round; trick dropped");
                    continue;
                };
                if let Err(err) = logger.log_trick(round_id, record).await {
                    warn!(game_id, round_no, error = %err, code = "PERSISTENCE_UNAVAILABLE", "log_trick failed");
                }
            }
            Command::LogRoundScore {
                game_id,
                round_no,
                record,
            } => {
                let Some(&round_id) = round_ids.get(&(game_id, round_no)) else {
                    warn!(game_id, round_no, "no persisted round; score dropped");
                    continue;
                };
                if let Err(err) = logger.log_round_score(round_id, record).await {
                    warn!(game_id, round_no, error = %err, code = "PERSISTENCE_UNAVAILABLE", "log_round_score failed");
                }
            }
            Command::DeleteGame { game_id } => {
                round_ids.retain(|(g, _), _| *g != game_id);
                if let Err(err) = logger.delete_game(game_id).await {
                    warn!(game_id, error = %err, code = "PERSISTENCE_UNAVAILABLE", "delete_game failed");
                }
            }
            Command::CloseGame { game_id } => {
                round_ids.retain(|(g, _), _| *g != game_id);
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("persistence worker exiting");
}
