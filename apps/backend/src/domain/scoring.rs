//! Round scoring and game completion.
//!
//! A made contract scores 10 per bid trick plus 1 per overtrick; a set
//! contract loses 10 per bid trick. Nil is worth 100 (blind nil 200) either
//! way. Overtricks accumulate as bags; crossing the bag threshold costs the
//! bag penalty and the threshold is taken off the running count.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Bid;
use crate::domain::rules::{GameMode, ScoreLimits, PLAYERS};
use crate::domain::state::{side_count, side_of, Scoreboard, Seat};

pub const NIL_VALUE: i32 = 100;
pub const BLIND_NIL_VALUE: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub bag_threshold: u32,
    pub bag_penalty: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            bag_threshold: 10,
            bag_penalty: 100,
        }
    }
}

/// Bags a single seat took this round.
pub fn seat_bags(bid: Bid, tricks_won: u8) -> u8 {
    tricks_won.saturating_sub(bid.tricks)
}

fn nil_points(bid: Bid, tricks_won: u8) -> i32 {
    let value = if bid.blind { BLIND_NIL_VALUE } else { NIL_VALUE };
    if tricks_won == 0 {
        value
    } else {
        -value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideScore {
    pub side: u8,
    pub seats: Vec<Seat>,
    /// Sum of the non-nil bids.
    pub bid: u8,
    pub tricks: u8,
    /// Points earned this round, bag penalty included.
    pub points: i32,
    pub bags_added: u32,
    pub bag_penalty_applied: bool,
    pub total_points: i32,
    pub total_bags: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round_no: u32,
    pub bids: [Bid; PLAYERS],
    pub tricks: [u8; PLAYERS],
    pub seat_bags: [u8; PLAYERS],
    pub sides: Vec<SideScore>,
}

/// Score one round and fold it into `board`.
pub fn score_round(
    mode: GameMode,
    round_no: u32,
    bids: [Bid; PLAYERS],
    tricks: [u8; PLAYERS],
    board: &mut Scoreboard,
    rules: &ScoringRules,
) -> RoundScore {
    let seat_bags: [u8; PLAYERS] = std::array::from_fn(|i| seat_bags(bids[i], tricks[i]));

    let mut sides = Vec::with_capacity(side_count(mode));
    for side in 0..side_count(mode) as u8 {
        let seats: Vec<Seat> = (0..PLAYERS as Seat)
            .filter(|&s| side_of(mode, s) == side)
            .collect();

        let mut points = 0i32;
        let mut contract = 0u8;
        let mut side_tricks = 0u8;
        for &s in &seats {
            let (bid, won) = (bids[s as usize], tricks[s as usize]);
            side_tricks += won;
            if bid.is_nil() {
                points += nil_points(bid, won);
            } else {
                contract += bid.tricks;
            }
        }

        // A double-nil side has a contract of 0, so every trick it takes is a bag.
        let bags_added = if side_tricks >= contract {
            points += 10 * contract as i32 + (side_tricks - contract) as i32;
            (side_tricks - contract) as u32
        } else {
            points -= 10 * contract as i32;
            0
        };

        let idx = side as usize;
        board.bags[idx] += bags_added;
        let mut bag_penalty_applied = false;
        if rules.bag_threshold > 0 && board.bags[idx] >= rules.bag_threshold {
            board.bags[idx] -= rules.bag_threshold;
            points -= rules.bag_penalty;
            bag_penalty_applied = true;
        }
        board.points[idx] += points;

        sides.push(SideScore {
            side,
            seats,
            bid: contract,
            tricks: side_tricks,
            points,
            bags_added,
            bag_penalty_applied,
            total_points: board.points[idx],
            total_bags: board.bags[idx],
        });
    }

    RoundScore {
        round_no,
        bids,
        tricks,
        seat_bags,
        sides,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Continue,
    Winner(u8),
}

/// Finished once any side reaches max_points or falls to min_points.
/// The highest total wins; a tie for the top plays another round.
pub fn evaluate_completion(mode: GameMode, board: &Scoreboard, limits: &ScoreLimits) -> GameOutcome {
    let totals = &board.points[..side_count(mode)];
    let crossed = totals
        .iter()
        .any(|&p| p >= limits.max_points || p <= limits.min_points);
    if !crossed {
        return GameOutcome::Continue;
    }
    let Some(&top) = totals.iter().max() else {
        return GameOutcome::Continue;
    };
    let mut leaders = totals.iter().enumerate().filter(|&(_, &p)| p == top);
    match (leaders.next(), leaders.next()) {
        (Some((side, _)), None) => GameOutcome::Winner(side as u8),
        _ => GameOutcome::Continue,
    }
}
