// Whole-round flows through the pure domain API.

use crate::domain::bidding::{clamp_bid, place_bid, Bid};
use crate::domain::round::{complete_hand, start_game};
use crate::domain::rules::GameSettings;
use crate::domain::scoring::ScoringRules;
use crate::domain::state::{GameState, GameStatus, Occupant, Seat};
use crate::domain::tricks::{auto_play_card, play_card};

fn seated_game(seed: u64) -> GameState {
    let mut state = GameState::new(7, GameSettings::default(), seed);
    for seat in state.seats.iter_mut() {
        seat.occupant = Occupant::bot("test");
    }
    start_game(&mut state).expect("four filled seats start");
    state
}

/// Bid 3 everywhere, then always play the auto-play card; returns winners per trick.
fn play_one_round(state: &mut GameState) -> Vec<Seat> {
    while state.status == GameStatus::Bidding {
        let seat = state.turn().unwrap();
        let bid = clamp_bid(
            &state.settings,
            &state.seats[seat as usize].hand,
            seat,
            &state.bids(),
            Bid::new(3),
        );
        place_bid(state, seat, bid).unwrap();
    }
    let mut winners = Vec::new();
    while state.status == GameStatus::Playing {
        let seat = state.turn().unwrap();
        let play = state.play.as_ref().unwrap();
        let card = auto_play_card(
            &state.seats[seat as usize].hand,
            &play.current_trick,
            play.trump_broken,
            state.settings.rules.special,
            None,
        )
        .unwrap();
        if let Some(trick) = play_card(state, seat, card).unwrap().completed_trick {
            winners.push(trick.winner);
        }
    }
    winners
}

#[test]
fn full_round_has_thirteen_tricks_of_four_cards() {
    let mut state = seated_game(2024);
    let winners = play_one_round(&mut state);
    assert_eq!(state.status, GameStatus::HandComplete);
    assert_eq!(winners.len(), 13);

    let play = state.play.as_ref().unwrap();
    assert_eq!(play.completed.len(), 13);
    assert!(play.completed.iter().all(|t| t.plays.len() == 4));
    assert!(state.seats.iter().all(|s| s.hand.is_empty()));
    let total: u8 = state.seats.iter().map(|s| s.tricks_won).sum();
    assert_eq!(total, 13);
}

#[test]
fn hand_completion_scores_and_rotates_dealer() {
    let mut state = seated_game(99);
    let dealer = state.dealer;
    play_one_round(&mut state);
    let tricks: Vec<u8> = state.seats.iter().map(|s| s.tricks_won).collect();

    let result = complete_hand(&mut state, &ScoringRules::default()).unwrap();
    for seat in 0..4 {
        let bid = result.score.bids[seat].tricks;
        assert_eq!(result.score.seat_bags[seat], tricks[seat].saturating_sub(bid));
    }
    assert_eq!(result.next_round, Some(2));
    assert_eq!(state.status, GameStatus::Bidding);
    assert_eq!(state.dealer, (dealer + 1) % 4);
    assert_eq!(state.turn(), Some((dealer + 2) % 4));
    assert!(state.seats.iter().all(|s| s.hand.len() == 13));
    assert_eq!(state.history.len(), 1);
}

#[test]
fn replay_is_deterministic() {
    let run = || {
        let mut state = seated_game(31337);
        let mut all_winners = Vec::new();
        for _ in 0..3 {
            all_winners.extend(play_one_round(&mut state));
            complete_hand(&mut state, &ScoringRules::default()).unwrap();
            if state.status == GameStatus::Finished {
                break;
            }
        }
        (all_winners, state.scores.clone())
    };
    assert_eq!(run(), run());
}

#[test]
fn changing_hands_on_turn_moves_the_generation() {
    let mut state = seated_game(3);
    let on_turn = state.turn().unwrap();
    let before = state.turn_generation;

    state.set_occupant((on_turn + 1) % 4, Occupant::Empty);
    assert_eq!(state.turn_generation, before);

    state.set_occupant(on_turn, Occupant::Empty);
    state.set_occupant(on_turn, Occupant::human("u9", "Nia"));
    assert_eq!(state.turn_generation, before + 2);
    assert_eq!(state.turn(), Some(on_turn));
}
