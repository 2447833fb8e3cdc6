// Error mapping from domain kinds to caller-facing codes.
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_move_validation_codes() {
    let cases = [
        (ValidationKind::OutOfTurn, "OUT_OF_TURN"),
        (ValidationKind::IllegalBid, "ILLEGAL_BID"),
        (ValidationKind::CardNotInHand, "CARD_NOT_IN_HAND"),
        (ValidationKind::MustFollowSuit, "MUST_FOLLOW_SUIT"),
        (ValidationKind::SpadesNotBroken, "SPADES_NOT_BROKEN"),
        (ValidationKind::SpecialRule, "SPECIAL_RULE"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "nope").into();
        assert_eq!(app.code().as_str(), code);
        assert!(app.is_rejection());
    }
}

#[test]
fn maps_other_validation_to_generic_code() {
    let app: AppError = DomainError::validation_other("bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.detail(), "bad field");
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "no game 7").into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
    assert!(!app.is_rejection());
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::SeatTaken, "seat 2").into();
    assert_eq!(app.code().as_str(), "SEAT_TAKEN");

    let other: AppError =
        DomainError::conflict(ConflictKind::Other("x".into()), "generic").into();
    assert_eq!(other.code(), ErrorCode::Conflict);
}

#[test]
fn maps_persistence_unavailable() {
    let app: AppError =
        DomainError::infra(InfraErrorKind::PersistenceUnavailable, "queue closed").into();
    assert!(matches!(app, AppError::PersistenceUnavailable { .. }));
    assert_eq!(app.code().as_str(), "PERSISTENCE_UNAVAILABLE");
}
