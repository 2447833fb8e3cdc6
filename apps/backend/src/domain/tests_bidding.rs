use crate::domain::bidding::{clamp_bid, legal_bid_values, place_bid, validate_bid, Bid};
use crate::domain::rules::{GameFormat, GameSettings, GimmickVariant, RuleFlags};
use crate::domain::state::GameStatus;
use crate::domain::test_state_helpers::{bidding_state, parse_cards};
use crate::domain::Card;
use crate::errors::domain::ValidationKind;

fn empty_hands() -> [Vec<Card>; 4] {
    Default::default()
}

fn format(format: GameFormat) -> GameSettings {
    GameSettings {
        format,
        ..GameSettings::default()
    }
}

fn no_nil() -> GameSettings {
    GameSettings {
        rules: RuleFlags {
            allow_nil: false,
            ..RuleFlags::default()
        },
        ..GameSettings::default()
    }
}

#[test]
fn bidding_starts_left_of_dealer_and_completes_in_order() {
    let mut state = bidding_state(GameSettings::default(), empty_hands(), 2);
    assert_eq!(state.turn(), Some(3));

    let order = [3, 0, 1, 2];
    for (i, seat) in order.into_iter().enumerate() {
        assert_eq!(state.status, GameStatus::Bidding);
        let out = place_bid(&mut state, seat, Bid::new(3)).unwrap();
        assert_eq!(out.bidding_complete, i == 3);
    }
    assert_eq!(state.status, GameStatus::Playing);
    // First lead is left of the dealer.
    assert_eq!(state.turn(), Some(3));
    assert!(state.bidding.as_ref().unwrap().is_complete());
}

#[test]
fn out_of_turn_bid_is_rejected() {
    let mut state = bidding_state(GameSettings::default(), empty_hands(), 0);
    let err = place_bid(&mut state, 2, Bid::new(4)).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state.bids(), [None; 4]);
}

#[test]
fn nil_rejected_when_disallowed() {
    let mut state = bidding_state(no_nil(), empty_hands(), 0);
    let err = place_bid(&mut state, 1, Bid::nil()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::IllegalBid));
}

#[test]
fn blind_nil_needs_flag() {
    let hands = empty_hands();
    let bids = [None; 4];
    let plain = GameSettings::default();
    assert!(validate_bid(&plain, &hands[0], 0, &bids, Bid::blind_nil()).is_err());

    let mut blind = GameSettings::default();
    blind.rules.allow_blind_nil = true;
    assert!(validate_bid(&blind, &hands[0], 0, &bids, Bid::blind_nil()).is_ok());
}

#[test]
fn bids_above_thirteen_are_illegal() {
    let hands = empty_hands();
    let err = validate_bid(&GameSettings::default(), &hands[0], 0, &[None; 4], Bid::new(14))
        .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::IllegalBid));
}

#[test]
fn mirror_and_whiz_follow_spade_count() {
    let hand = parse_cards(&["2S", "9S", "KS", "4H"]);
    let bids = [None; 4];
    assert_eq!(
        legal_bid_values(&format(GameFormat::Mirror), &hand, 0, &bids),
        vec![3]
    );
    assert_eq!(
        legal_bid_values(&format(GameFormat::Whiz), &hand, 0, &bids),
        vec![0, 3]
    );
}

#[test]
fn mirror_without_spades_forces_zero_even_without_nil() {
    let hand = parse_cards(&["4H"]);
    let mut settings = format(GameFormat::Mirror);
    settings.rules.allow_nil = false;
    assert!(validate_bid(&settings, &hand, 0, &[None; 4], Bid::nil()).is_ok());
}

#[test]
fn gimmick_variants() {
    let hand = parse_cards(&["AS", "AH", "2H", "3H", "5C"]);
    let bids = [None; 4];
    let values = |v| legal_bid_values(&format(GameFormat::Gimmick(v)), &hand, 0, &bids);
    assert_eq!(values(GimmickVariant::Bid3), vec![3]);
    assert_eq!(values(GimmickVariant::Bid4OrNil), vec![0, 4]);
    assert_eq!(values(GimmickVariant::BidHearts), vec![3]);
    assert_eq!(values(GimmickVariant::CrazyAces), vec![6]);
}

#[test]
fn suicide_needs_exactly_one_nil_per_side() {
    let settings = format(GameFormat::Gimmick(GimmickVariant::Suicide));
    let hand = Vec::new();

    let mut bids = [None; 4];
    bids[0] = Some(Bid::new(5));
    assert_eq!(legal_bid_values(&settings, &hand, 2, &bids), vec![0]);

    bids[0] = Some(Bid::nil());
    let after_nil = legal_bid_values(&settings, &hand, 2, &bids);
    assert!(!after_nil.contains(&0));
    assert_eq!(after_nil.len(), 13);
}

#[test]
fn clamp_turns_disallowed_nil_into_one() {
    let hand = Vec::new();
    let bid = clamp_bid(&no_nil(), &hand, 0, &[None; 4], Bid::nil());
    assert_eq!(bid, Bid::new(1));
}

#[test]
fn clamp_snaps_to_nearest_legal_value() {
    let hand = parse_cards(&["2S", "9S"]);
    let bid = clamp_bid(&format(GameFormat::Mirror), &hand, 0, &[None; 4], Bid::new(6));
    assert_eq!(bid, Bid::new(2));

    let four_or_nil = format(GameFormat::Gimmick(GimmickVariant::Bid4OrNil));
    assert_eq!(
        clamp_bid(&four_or_nil, &hand, 0, &[None; 4], Bid::new(1)),
        Bid::nil()
    );
    assert_eq!(
        clamp_bid(&four_or_nil, &hand, 0, &[None; 4], Bid::new(3)),
        Bid::new(4)
    );
}

#[test]
fn legal_bids_pass_through_clamp_unchanged() {
    let hand = Vec::new();
    for n in 0..=13 {
        let bid = Bid::new(n);
        assert_eq!(
            clamp_bid(&GameSettings::default(), &hand, 0, &[None; 4], bid),
            bid
        );
    }
}
