//! Application workflow tests
//!
//! These validate the status state machine, the intake bounds checks, and
//! the notification mapping for each transition, without needing a database
//! pool.

use chrono::Utc;
use lendora_server::models::{ApplicationStatus, NotificationType, Settings};
use lendora_server::services::application::{processing_fee_amount, validate_against_settings};

fn settings(min_loan: f64, max_loan: f64, max_months: i32) -> Settings {
    Settings {
        id: 1,
        interest_rate_default: 0.06,
        processing_fee_percent: 2.5,
        min_loan,
        max_loan,
        max_months,
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Status State Machine
// ============================================================================

#[test]
fn test_submitted_can_move_to_every_decision() {
    use ApplicationStatus::*;

    assert!(Submitted.can_transition_to(Approved));
    assert!(Submitted.can_transition_to(Rejected));
    assert!(Submitted.can_transition_to(Review));
}

#[test]
fn test_review_resolves_to_a_decision() {
    use ApplicationStatus::*;

    assert!(Review.can_transition_to(Approved));
    assert!(Review.can_transition_to(Rejected));
    assert!(!Review.can_transition_to(Submitted));
}

#[test]
fn test_decisions_are_terminal() {
    use ApplicationStatus::*;

    for next in [Submitted, Approved, Review] {
        assert!(!Rejected.can_transition_to(next));
    }
    for next in [Submitted, Rejected, Review] {
        assert!(!Approved.can_transition_to(next));
    }
}

#[test]
fn test_no_self_transitions() {
    use ApplicationStatus::*;

    for status in [Submitted, Approved, Rejected, Review] {
        assert!(!status.can_transition_to(status));
    }
}

// ============================================================================
// Transition Notifications
// ============================================================================

#[test]
fn test_approval_emits_success() {
    assert_eq!(
        ApplicationStatus::Approved.notification_type(),
        NotificationType::Success
    );
}

#[test]
fn test_rejection_emits_error() {
    assert_eq!(
        ApplicationStatus::Rejected.notification_type(),
        NotificationType::Error
    );
}

#[test]
fn test_review_emits_info() {
    assert_eq!(
        ApplicationStatus::Review.notification_type(),
        NotificationType::Info
    );
}

// ============================================================================
// Intake Bounds
// ============================================================================

#[test]
fn test_amount_below_minimum_is_rejected() {
    let settings = settings(5_000.0, 500_000.0, 36);

    // 1_000 against a 5_000 minimum
    let result = validate_against_settings(&settings, 1_000.0, 12);
    assert!(result.is_err());
}

#[test]
fn test_amount_above_maximum_is_rejected() {
    let settings = settings(5_000.0, 500_000.0, 36);

    let result = validate_against_settings(&settings, 500_000.01, 12);
    assert!(result.is_err());
}

#[test]
fn test_amounts_on_the_bounds_are_accepted() {
    let settings = settings(5_000.0, 500_000.0, 36);

    assert!(validate_against_settings(&settings, 5_000.0, 12).is_ok());
    assert!(validate_against_settings(&settings, 500_000.0, 12).is_ok());
}

#[test]
fn test_period_beyond_max_months_is_rejected() {
    let settings = settings(5_000.0, 500_000.0, 36);

    assert!(validate_against_settings(&settings, 25_000.0, 37).is_err());
    assert!(validate_against_settings(&settings, 25_000.0, 36).is_ok());
}

#[test]
fn test_non_positive_period_is_rejected() {
    let settings = settings(5_000.0, 500_000.0, 36);

    assert!(validate_against_settings(&settings, 25_000.0, 0).is_err());
    assert!(validate_against_settings(&settings, 25_000.0, -3).is_err());
}

#[test]
fn test_validation_error_maps_to_bad_request() {
    use axum::http::StatusCode;

    let settings = settings(5_000.0, 500_000.0, 36);
    let err = validate_against_settings(&settings, 1_000.0, 12).unwrap_err();

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Processing Fee
// ============================================================================

#[test]
fn test_processing_fee_is_percent_of_amount() {
    assert_eq!(processing_fee_amount(25_000.0, 2.5), 625.0);
    assert_eq!(processing_fee_amount(100_000.0, 1.0), 1_000.0);
    assert_eq!(processing_fee_amount(50_000.0, 0.0), 0.0);
}
