//! Loan schedule computation tests
//!
//! These validate the flat-rate repayment math used at disbursement,
//! including the reference scenario and rounding behavior.

use chrono::{TimeZone, Utc};
use lendora_server::models::{LoanSchedule, MONTHLY_INTEREST_RATE};

// ============================================================================
// Reference Scenario
// ============================================================================

#[test]
fn test_reference_scenario_25k_over_12_months() {
    let schedule = LoanSchedule::compute(25_000.0, 12);

    // monthly_interest = 25_000 * 0.06 = 1_500; over 12 months = 18_000
    assert_eq!(schedule.total_interest, 18_000.0);
    assert_eq!(schedule.total_repayment, 43_000.0);
    assert!((schedule.monthly_installment - 3_583.33).abs() < 0.01);
    assert_eq!(schedule.monthly_rate, MONTHLY_INTEREST_RATE);
}

#[test]
fn test_single_month_term() {
    let schedule = LoanSchedule::compute(10_000.0, 1);

    assert_eq!(schedule.total_interest, 600.0);
    assert_eq!(schedule.total_repayment, 10_600.0);
    assert_eq!(schedule.monthly_installment, 10_600.0);
}

// ============================================================================
// Schedule Invariants
// ============================================================================

#[test]
fn test_installments_sum_to_total_repayment() {
    for (principal, months) in [
        (5_000.0, 3),
        (25_000.0, 12),
        (100_000.0, 24),
        (499_999.99, 36),
    ] {
        let schedule = LoanSchedule::compute(principal, months);
        let paid = schedule.monthly_installment * months as f64;
        assert!(
            (paid - schedule.total_repayment).abs() < 0.01,
            "installments for {}/{} months drifted from total repayment",
            principal,
            months
        );
    }
}

#[test]
fn test_total_repayment_is_principal_plus_interest() {
    let schedule = LoanSchedule::compute(80_000.0, 18);
    assert_eq!(
        schedule.total_repayment,
        schedule.principal + schedule.total_interest
    );
}

#[test]
fn test_interest_scales_linearly_with_term() {
    let short = LoanSchedule::compute(20_000.0, 6);
    let long = LoanSchedule::compute(20_000.0, 12);

    assert!((long.total_interest - short.total_interest * 2.0).abs() < f64::EPSILON);
}

// ============================================================================
// Term Dates
// ============================================================================

#[test]
fn test_end_date_advances_by_term_months() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let schedule = LoanSchedule::compute(25_000.0, 12);

    let end = schedule.end_date(start);
    assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
}

#[test]
fn test_end_date_clamps_to_month_end() {
    // Jan 31 + 1 month clamps to Feb 29 in a leap year
    let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
    let schedule = LoanSchedule::compute(5_000.0, 1);

    let end = schedule.end_date(start);
    assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
}
