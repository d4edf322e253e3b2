//! Loan models and the repayment schedule computation

use chrono::Months;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Flat monthly interest rate applied at disbursement.
pub const MONTHLY_INTEREST_RATE: f64 = 0.06;

/// Loan status enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Active,
    Completed,
    Defaulted,
}

/// Loan model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Loan {
    pub id: Uuid,
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub principal_amount: f64,
    pub interest_rate: f64,
    pub total_interest: f64,
    pub total_repayment: f64,
    pub monthly_installment: f64,
    pub outstanding_balance: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repayment model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Repayment {
    pub id: Uuid,
    pub loan_id: Uuid,
    pub amount: f64,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

/// Request to record a repayment
#[derive(Debug, Deserialize, Validate)]
pub struct RepaymentRequest {
    #[validate(range(min = 0.01, message = "repayment amount must be positive"))]
    pub amount: f64,

    /// Client payment reference; generated server-side when absent
    #[validate(length(min = 1, message = "payment reference cannot be empty"))]
    pub reference: Option<String>,
}

/// Query for listing loans
#[derive(Debug, Deserialize)]
pub struct ListLoansQuery {
    pub status: Option<LoanStatus>,
    pub user_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Computed repayment schedule for a disbursed loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanSchedule {
    pub principal: f64,
    pub months: i32,
    pub monthly_rate: f64,
    pub total_interest: f64,
    pub total_repayment: f64,
    pub monthly_installment: f64,
}

impl LoanSchedule {
    /// Compute the flat-rate schedule for a principal over `months`.
    ///
    /// monthly_interest = principal * rate, accrued once per month of the
    /// term; the installment spreads principal plus interest evenly.
    pub fn compute(principal: f64, months: i32) -> Self {
        let monthly_interest = principal * MONTHLY_INTEREST_RATE;
        let total_interest = monthly_interest * months as f64;
        let total_repayment = principal + total_interest;
        let monthly_installment = total_repayment / months as f64;

        Self {
            principal,
            months,
            monthly_rate: MONTHLY_INTEREST_RATE,
            total_interest,
            total_repayment,
            monthly_installment,
        }
    }

    /// Term end date counted in calendar months from `start`
    pub fn end_date(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        start
            .checked_add_months(Months::new(self.months as u32))
            .unwrap_or(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_reference_figures() {
        // 25_000 over 12 months at the flat 6%/month rate
        let schedule = LoanSchedule::compute(25_000.0, 12);

        assert_eq!(schedule.total_interest, 18_000.0);
        assert_eq!(schedule.total_repayment, 43_000.0);
        assert!((schedule.monthly_installment - 3_583.33).abs() < 0.01);
    }

    #[test]
    fn test_installments_cover_total_repayment() {
        for (principal, months) in [(5_000.0, 3), (25_000.0, 12), (499_999.0, 36)] {
            let schedule = LoanSchedule::compute(principal, months);
            let paid = schedule.monthly_installment * months as f64;
            assert!(
                (paid - schedule.total_repayment).abs() < 0.01,
                "installments for {principal}/{months} drifted from total"
            );
        }
    }

    #[test]
    fn test_end_date_counts_calendar_months() {
        use chrono::TimeZone;

        let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let schedule = LoanSchedule::compute(10_000.0, 12);
        let end = schedule.end_date(start);

        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap());
    }
}
