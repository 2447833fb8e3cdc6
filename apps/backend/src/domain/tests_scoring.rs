use crate::domain::bidding::Bid;
use crate::domain::rules::{GameMode, ScoreLimits};
use crate::domain::scoring::{evaluate_completion, score_round, GameOutcome, ScoringRules};
use crate::domain::state::Scoreboard;

fn bids(values: [u8; 4]) -> [Bid; 4] {
    values.map(Bid::new)
}

#[test]
fn partners_made_contract_scores_ten_per_trick_plus_bags() {
    let mut board = Scoreboard::default();
    // Side 0 (seats 0/2) bids 4+3 and takes 8; side 1 bids 3+2 and takes 5.
    let score = score_round(
        GameMode::Partners,
        1,
        bids([4, 3, 3, 2]),
        [5, 3, 3, 2],
        &mut board,
        &ScoringRules::default(),
    );
    assert_eq!(score.sides[0].points, 71);
    assert_eq!(score.sides[0].bags_added, 1);
    assert_eq!(score.sides[1].points, 50);
    assert_eq!(board.points[..2], [71, 50]);
    assert_eq!(score.seat_bags, [1, 0, 0, 0]);
}

#[test]
fn set_contract_loses_ten_per_trick() {
    let mut board = Scoreboard::default();
    let score = score_round(
        GameMode::Partners,
        1,
        bids([5, 2, 4, 1]),
        [3, 4, 3, 3],
        &mut board,
        &ScoringRules::default(),
    );
    assert_eq!(score.sides[0].points, -90);
    assert_eq!(score.sides[0].bags_added, 0);
    assert_eq!(score.sides[1].points, 34);
}

#[test]
fn nil_and_blind_nil_results() {
    let mut board = Scoreboard::default();
    let mut b = bids([0, 0, 4, 4]);
    b[1] = Bid::blind_nil();
    // Seat 0 makes nil; seat 1 fails blind nil with one trick.
    let score = score_round(
        GameMode::Partners,
        1,
        b,
        [0, 1, 6, 6],
        &mut board,
        &ScoringRules::default(),
    );
    assert_eq!(score.sides[0].points, 100 + 40 + 2);
    assert_eq!(score.sides[1].points, -200 + 40 + 3);
    assert_eq!(score.seat_bags, [0, 1, 2, 2]);
}

#[test]
fn double_nil_side_counts_every_trick_as_a_bag() {
    let mut board = Scoreboard::default();
    let score = score_round(
        GameMode::Partners,
        1,
        bids([0, 5, 0, 4]),
        [0, 7, 2, 4],
        &mut board,
        &ScoringRules::default(),
    );
    assert_eq!(score.sides[0].points, 100 - 100 + 2);
    assert_eq!(score.sides[0].bags_added, 2);
    assert_eq!(board.bags[0], 2);
    assert_eq!(score.sides[1].points, 92);
}

#[test]
fn side_bags_match_seat_bags_when_both_nils_fail() {
    let mut board = Scoreboard::default();
    let score = score_round(
        GameMode::Partners,
        1,
        bids([0, 5, 0, 5]),
        [2, 5, 1, 5],
        &mut board,
        &ScoringRules::default(),
    );
    assert_eq!(score.seat_bags, [2, 0, 1, 0]);
    for side in &score.sides {
        let seat_total: u32 = side.seats.iter().map(|&s| u32::from(score.seat_bags[s as usize])).sum();
        assert_eq!(side.bags_added, seat_total);
    }
    assert_eq!(score.sides[0].points, -200 + 3);
    assert_eq!(score.sides[1].points, 100);
}

#[test]
fn bag_penalty_applies_at_threshold() {
    let mut board = Scoreboard::default();
    board.bags[0] = 8;
    let score = score_round(
        GameMode::Partners,
        3,
        bids([2, 3, 2, 3]),
        [4, 3, 3, 3],
        &mut board,
        &ScoringRules::default(),
    );
    let side = &score.sides[0];
    assert_eq!(side.bags_added, 3);
    assert!(side.bag_penalty_applied);
    assert_eq!(side.points, 43 - 100);
    assert_eq!(board.bags[0], 1);
}

#[test]
fn solo_scores_each_seat() {
    let mut board = Scoreboard::default();
    let score = score_round(
        GameMode::Solo,
        1,
        bids([3, 0, 4, 5]),
        [4, 0, 4, 5],
        &mut board,
        &ScoringRules::default(),
    );
    assert_eq!(score.sides.len(), 4);
    assert_eq!(board.points, [31, 100, 40, 50]);
}

#[test]
fn bags_formula_holds_per_seat() {
    let b = bids([2, 5, 0, 3]);
    let tricks = [4, 3, 2, 4];
    let mut board = Scoreboard::default();
    let score = score_round(GameMode::Partners, 1, b, tricks, &mut board, &ScoringRules::default());
    for seat in 0..4 {
        let expected = tricks[seat].saturating_sub(b[seat].tricks);
        assert_eq!(score.seat_bags[seat], expected);
    }
}

#[test]
fn completion_rules() {
    let limits = ScoreLimits::default();
    let mut board = Scoreboard::default();
    board.points[0] = 480;
    board.points[1] = 200;
    assert_eq!(
        evaluate_completion(GameMode::Partners, &board, &limits),
        GameOutcome::Continue
    );

    board.points[0] = 510;
    assert_eq!(
        evaluate_completion(GameMode::Partners, &board, &limits),
        GameOutcome::Winner(0)
    );

    // Falling through the floor hands the win to the leader.
    board.points = [-120, 90, 0, 0];
    assert_eq!(
        evaluate_completion(GameMode::Partners, &board, &limits),
        GameOutcome::Winner(1)
    );

    // Level at the top after crossing: keep playing.
    board.points = [520, 520, 0, 0];
    assert_eq!(
        evaluate_completion(GameMode::Partners, &board, &limits),
        GameOutcome::Continue
    );
}
