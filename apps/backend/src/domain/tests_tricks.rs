use crate::domain::bidding::Bid;
use crate::domain::rules::{GameSettings, RuleFlags, SpecialRule};
use crate::domain::state::GameStatus;
use crate::domain::test_state_helpers::{parse_cards, playing_state};
use crate::domain::tricks::{auto_play_card, check_play, legal_moves, play_card, resolve_trick};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::ValidationKind;

fn card(token: &str) -> Card {
    token.parse().expect("valid token")
}

fn settings_with(special: Option<SpecialRule>) -> GameSettings {
    GameSettings {
        rules: RuleFlags {
            special,
            ..RuleFlags::default()
        },
        ..GameSettings::default()
    }
}

#[test]
fn trump_wins_over_lead_suit() {
    let plays = [
        (0, card("7D")),
        (1, card("KD")),
        (2, card("2S")),
        (3, card("AD")),
    ];
    let r = resolve_trick(&plays, Suit::Diamonds);
    assert_eq!(r.winner, 2);
    assert!(r.trump_broken_delta);
}

#[test]
fn highest_lead_suit_wins_without_trump() {
    let plays = [
        (0, card("7D")),
        (1, card("9D")),
        (2, card("KD")),
        (3, card("3D")),
    ];
    let r = resolve_trick(&plays, Suit::Diamonds);
    assert_eq!(r.winner, 2);
    assert!(!r.trump_broken_delta);
}

#[test]
fn off_suit_ace_cannot_win() {
    let plays = [
        (1, card("4C")),
        (2, card("AH")),
        (3, card("2C")),
        (0, card("AD")),
    ];
    assert_eq!(resolve_trick(&plays, Suit::Clubs).winner, 1);
}

#[test]
fn must_follow_lead_suit() {
    let hand = parse_cards(&["2D", "KH", "3S"]);
    let trick = vec![(0, card("7D"))];
    let err = check_play(&hand, &trick, false, None, card("KH")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::MustFollowSuit));
    assert_eq!(legal_moves(&hand, &trick, false, None), vec![card("2D")]);
}

#[test]
fn cannot_lead_spades_before_broken() {
    let hand = parse_cards(&["2D", "AS"]);
    let err = check_play(&hand, &[], false, None, card("AS")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::SpadesNotBroken));
    assert!(check_play(&hand, &[], true, None, card("AS")).is_ok());
}

#[test]
fn spade_only_hand_may_lead_spades_unbroken() {
    let hand = parse_cards(&["2S", "AS"]);
    assert!(check_play(&hand, &[], false, None, card("2S")).is_ok());
}

#[test]
fn card_not_in_hand_is_rejected_first() {
    let hand = parse_cards(&["2D"]);
    let err = check_play(&hand, &[], false, None, card("AS")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardNotInHand));
}

#[test]
fn screamer_blocks_spade_sluff() {
    let hand = parse_cards(&["3S", "KH"]);
    let trick = vec![(0, card("7D"))];
    let err = check_play(&hand, &trick, true, Some(SpecialRule::Screamer), card("3S")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::SpecialRule));
    assert!(check_play(&hand, &trick, true, None, card("3S")).is_ok());
}

#[test]
fn assassin_forces_cut_and_spade_lead() {
    let hand = parse_cards(&["3S", "KH"]);
    let trick = vec![(0, card("7D"))];
    let special = Some(SpecialRule::Assassin);
    assert_eq!(
        legal_moves(&hand, &trick, false, special),
        vec![card("3S")]
    );
    // Before spades break the ordinary lead rule still applies.
    assert_eq!(legal_moves(&hand, &[], false, special), vec![card("KH")]);
    assert_eq!(legal_moves(&hand, &[], true, special), vec![card("3S")]);
}

#[test]
fn auto_play_prefers_off_trump_when_void() {
    let hand = parse_cards(&["2S", "9H", "4C"]);
    let trick = vec![(0, card("7D"))];
    assert_eq!(
        auto_play_card(&hand, &trick, false, None, None),
        Some(card("4C"))
    );
    // A legal suggestion that dumps a spade before broken is overridden.
    assert_eq!(
        auto_play_card(&hand, &trick, false, None, Some(card("2S"))),
        Some(card("4C"))
    );
    assert_eq!(
        auto_play_card(&hand, &trick, true, None, Some(card("2S"))),
        Some(card("2S"))
    );
}

#[test]
fn auto_play_follows_suit() {
    let hand = parse_cards(&["2S", "9D", "QD"]);
    let trick = vec![(3, card("7D"))];
    let chosen = auto_play_card(&hand, &trick, true, None, Some(card("2S"))).unwrap();
    assert_eq!(chosen.suit, Suit::Diamonds);
}

fn round_hands() -> [Vec<Card>; 4] {
    [
        parse_cards(&["AD", "2C"]),
        parse_cards(&["KD", "3C"]),
        parse_cards(&["2S", "4C"]),
        parse_cards(&["QD", "5C"]),
    ]
}

#[test]
fn play_card_rejects_out_of_turn_and_keeps_state() {
    let mut state = playing_state(GameSettings::default(), round_hands(), [Bid::new(1); 4], 0);
    let before = state.turn_generation;
    let err = play_card(&mut state, 1, card("KD")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state.turn_generation, before);
    assert_eq!(state.seats[1].hand.len(), 2);
}

#[test]
fn trick_resolves_and_winner_leads() {
    let mut state = playing_state(GameSettings::default(), round_hands(), [Bid::new(1); 4], 0);
    play_card(&mut state, 0, card("AD")).unwrap();
    play_card(&mut state, 1, card("KD")).unwrap();
    // Seat 2 is void in diamonds and cuts.
    play_card(&mut state, 2, card("2S")).unwrap();
    let res = play_card(&mut state, 3, card("QD")).unwrap();

    let trick = res.completed_trick.expect("trick completes on the fourth play");
    assert_eq!(trick.winner, 2);
    assert_eq!(trick.leader, 0);
    assert_eq!(res.next_seat, Some(2));
    let play = state.play.as_ref().unwrap();
    assert!(play.trump_broken);
    assert_eq!(play.trick_no, 2);
    assert!(play.current_trick.is_empty());
    assert_eq!(state.seats[2].tricks_won, 1);
}

#[test]
fn thirteenth_trick_sets_hand_complete() {
    let mut state = playing_state(
        settings_with(None),
        [
            parse_cards(&["AD"]),
            parse_cards(&["KD"]),
            parse_cards(&["QD"]),
            parse_cards(&["JD"]),
        ],
        [Bid::new(1); 4],
        0,
    );
    if let Some(play) = state.play.as_mut() {
        play.trick_no = 13;
    }
    for (seat, token) in [(0, "AD"), (1, "KD"), (2, "QD")] {
        assert!(!play_card(&mut state, seat, card(token)).unwrap().round_complete);
    }
    let res = play_card(&mut state, 3, card("JD")).unwrap();
    assert!(res.round_complete);
    assert_eq!(res.next_seat, None);
    assert_eq!(state.status, GameStatus::HandComplete);
    assert_eq!(state.play.as_ref().unwrap().trick_no, 13);
    assert_eq!(state.turn(), None);
}

#[test]
fn suit_order_is_only_for_sorting() {
    let low_spade = Card::new(Suit::Spades, Rank::Two);
    let ace_clubs = Card::new(Suit::Clubs, Rank::Ace);
    assert!(low_spade > ace_clubs);
}
