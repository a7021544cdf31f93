//! Tests for the domain error payload and its serialised form.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn song_too_long() -> DomainError {
    DomainError::invalid_argument("song name must be at most 100 characters")
        .with_details(json!({"field": "songName", "max": 100}))
}

#[rstest]
#[case(DomainError::invalid_argument("bad"), ErrorCode::InvalidArgument)]
#[case(DomainError::not_found("missing"), ErrorCode::NotFound)]
#[case(DomainError::out_of_range("past the end"), ErrorCode::OutOfRange)]
fn convenience_constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
    assert!(error.details().is_none());
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidArgument, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_panics_on_empty_message() {
    let result = std::panic::catch_unwind(|| DomainError::new(ErrorCode::NotFound, ""));
    assert!(result.is_err());
}

#[rstest]
fn display_renders_message_only(song_too_long: DomainError) {
    assert_eq!(
        song_too_long.to_string(),
        "song name must be at most 100 characters"
    );
}

#[rstest]
fn serialises_code_in_snake_case(song_too_long: DomainError) {
    let value = serde_json::to_value(&song_too_long).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_argument",
            "message": "song name must be at most 100 characters",
            "details": {"field": "songName", "max": 100},
        })
    );
}

#[rstest]
fn omits_absent_details() {
    let value = serde_json::to_value(DomainError::out_of_range("index 3 out of range"))
        .expect("serialise error");
    assert_eq!(
        value,
        json!({"code": "out_of_range", "message": "index 3 out of range"})
    );
}

#[rstest]
fn deserialisation_rejects_blank_message() {
    let result =
        serde_json::from_value::<DomainError>(json!({"code": "not_found", "message": "  "}));
    assert!(result.is_err());
}

#[rstest]
fn code_strings_match_serialised_form() {
    for code in [
        ErrorCode::InvalidArgument,
        ErrorCode::NotFound,
        ErrorCode::OutOfRange,
    ] {
        let value = serde_json::to_value(code).expect("serialise code");
        assert_eq!(value, json!(code.as_str()));
    }
}
