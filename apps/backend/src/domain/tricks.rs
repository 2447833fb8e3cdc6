use serde::Serialize;

use crate::domain::cards_logic::{card_beats, hand_has_suit, hand_is_trump_only};
use crate::domain::rules::{SpecialRule, PLAYERS, TRICKS_PER_ROUND};
use crate::domain::state::{next_player, GameState, GameStatus, Seat};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTrick {
    pub trick_no: u8,
    pub leader: Seat,
    /// In play order.
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayState {
    pub current: Seat,
    pub leader: Seat,
    pub current_trick: Vec<(Seat, Card)>,
    /// 1-based, never above 13.
    pub trick_no: u8,
    pub completed: Vec<CompletedTrick>,
    pub trump_broken: bool,
}

impl PlayState {
    pub fn new(leader: Seat) -> Self {
        Self {
            current: leader,
            leader,
            current_trick: Vec::with_capacity(PLAYERS),
            trick_no: 1,
            completed: Vec::with_capacity(TRICKS_PER_ROUND as usize),
            trump_broken: false,
        }
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.current_trick.first().map(|(_, c)| c.suit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickResolution {
    pub winner: Seat,
    /// The trick contained a spade.
    pub trump_broken_delta: bool,
}

/// Winner of a full trick. Spades are trump.
pub fn resolve_trick(plays: &[(Seat, Card); PLAYERS], lead: Suit) -> TrickResolution {
    let mut best = plays[0];
    for &play in &plays[1..] {
        if card_beats(play.1, best.1, lead) {
            best = play;
        }
    }
    TrickResolution {
        winner: best.0,
        trump_broken_delta: plays.iter().any(|(_, c)| c.is_trump()),
    }
}

/// Check one card against hand, follow-suit, spade-leading and special rules.
pub fn check_play(
    hand: &[Card],
    trick: &[(Seat, Card)],
    trump_broken: bool,
    special: Option<SpecialRule>,
    card: Card,
) -> Result<(), DomainError> {
    if !hand.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card {card} not in hand"),
        ));
    }
    let has_spade = hand_has_suit(hand, Suit::Spades);
    let trump_only = hand_is_trump_only(hand);

    match trick.first().map(|(_, c)| c.suit) {
        Some(lead) => {
            if card.suit != lead && hand_has_suit(hand, lead) {
                return Err(DomainError::validation(
                    ValidationKind::MustFollowSuit,
                    format!("Must follow {lead:?}"),
                ));
            }
            if card.suit != lead {
                match special {
                    Some(SpecialRule::Screamer) if card.is_trump() && !trump_only => {
                        return Err(DomainError::validation(
                            ValidationKind::SpecialRule,
                            "Screamer: no spades while holding another suit",
                        ));
                    }
                    Some(SpecialRule::Assassin) if !card.is_trump() && has_spade => {
                        return Err(DomainError::validation(
                            ValidationKind::SpecialRule,
                            "Assassin: must cut with a spade",
                        ));
                    }
                    _ => {}
                }
            }
        }
        None => {
            if card.is_trump() && !trump_broken && !trump_only {
                return Err(DomainError::validation(
                    ValidationKind::SpadesNotBroken,
                    "Spades not broken",
                ));
            }
            match special {
                Some(SpecialRule::Screamer) if card.is_trump() && !trump_only => {
                    return Err(DomainError::validation(
                        ValidationKind::SpecialRule,
                        "Screamer: no spade leads while holding another suit",
                    ));
                }
                Some(SpecialRule::Assassin) if trump_broken && has_spade && !card.is_trump() => {
                    return Err(DomainError::validation(
                        ValidationKind::SpecialRule,
                        "Assassin: must lead spades",
                    ));
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Cards the holder may play right now, sorted.
pub fn legal_moves(
    hand: &[Card],
    trick: &[(Seat, Card)],
    trump_broken: bool,
    special: Option<SpecialRule>,
) -> Vec<Card> {
    let mut v: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| check_play(hand, trick, trump_broken, special, c).is_ok())
        .collect();
    v.sort();
    v
}

/// Card the engine plays for a stalled or bot seat.
///
/// Keeps `suggested` when it is legal and respects the non-trump preference,
/// otherwise plays the lowest preferred legal card.
pub fn auto_play_card(
    hand: &[Card],
    trick: &[(Seat, Card)],
    trump_broken: bool,
    special: Option<SpecialRule>,
    suggested: Option<Card>,
) -> Option<Card> {
    let legal = legal_moves(hand, trick, trump_broken, special);
    let off_trump: Vec<Card> = legal.iter().copied().filter(|c| !c.is_trump()).collect();
    let preferred = if trump_broken || off_trump.is_empty() {
        legal
    } else {
        off_trump
    };
    if let Some(card) = suggested.filter(|c| preferred.contains(c)) {
        return Some(card);
    }
    preferred.into_iter().min_by_key(|c| (c.rank, c.suit))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    pub completed_trick: Option<CompletedTrick>,
    /// None once the thirteenth trick is resolved.
    pub next_seat: Option<Seat>,
    pub round_complete: bool,
}

/// Play a card for the seat on turn, resolving the trick when it fills.
pub fn play_card(
    state: &mut GameState,
    seat: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    if state.status != GameStatus::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Cannot play while {:?}", state.status),
        ));
    }
    let special = state.settings.rules.special;
    let Some(play) = state.play.as_mut() else {
        return Err(DomainError::validation_other(
            "Invariant violated: Playing status without play state",
        ));
    };
    if play.current != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Seat {seat} played out of turn (seat {} to act)", play.current),
        ));
    }

    let hand = &mut state.seats[seat as usize].hand;
    check_play(hand, &play.current_trick, play.trump_broken, special, card)?;

    if play.current_trick.is_empty() {
        play.leader = seat;
    }
    hand.retain(|&c| c != card);
    play.current_trick.push((seat, card));
    if card.is_trump() {
        play.trump_broken = true;
    }

    let mut result = PlayCardResult {
        completed_trick: None,
        next_seat: None,
        round_complete: false,
    };

    if play.current_trick.len() < PLAYERS {
        play.current = next_player(seat);
        result.next_seat = Some(play.current);
        state.bump_generation();
        return Ok(result);
    }

    let plays: [(Seat, Card); PLAYERS] =
        std::array::from_fn(|i| play.current_trick[i]);
    let lead = plays[0].1.suit;
    let resolution = resolve_trick(&plays, lead);
    play.trump_broken |= resolution.trump_broken_delta;

    let completed = CompletedTrick {
        trick_no: play.trick_no,
        leader: play.leader,
        plays: plays.to_vec(),
        winner: resolution.winner,
    };
    play.completed.push(completed.clone());
    play.current_trick.clear();
    play.current = resolution.winner;
    play.leader = resolution.winner;

    let round_complete = play.trick_no >= TRICKS_PER_ROUND;
    if !round_complete {
        play.trick_no += 1;
    }
    state.seats[resolution.winner as usize].tricks_won += 1;

    if round_complete {
        state.status = GameStatus::HandComplete;
    } else {
        result.next_seat = Some(resolution.winner);
    }
    result.completed_trick = Some(completed);
    result.round_complete = round_complete;
    state.bump_generation();
    Ok(result)
}
