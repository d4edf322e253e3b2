//! Loan application models and the status state machine

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::NotificationType;

/// Application status enum
///
/// Transitions: submitted -> approved | rejected | review,
/// review -> approved | rejected. Rejected is terminal; approved is terminal
/// until fee confirmation materializes the loan.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Submitted,
    Approved,
    Rejected,
    Review,
}

impl ApplicationStatus {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Submitted, Approved)
                | (Submitted, Rejected)
                | (Submitted, Review)
                | (Review, Approved)
                | (Review, Rejected)
        )
    }

    /// Notification type emitted when an application lands in this status
    pub fn notification_type(self) -> NotificationType {
        match self {
            ApplicationStatus::Approved => NotificationType::Success,
            ApplicationStatus::Rejected => NotificationType::Error,
            ApplicationStatus::Submitted | ApplicationStatus::Review => NotificationType::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Review => "review",
        }
    }
}

/// Application model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub loan_amount: f64,
    pub repayment_period: i32,
    pub status: ApplicationStatus,
    pub processing_fee_paid: bool,
    pub processing_progress: i32,
    pub progress_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new application
#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    pub user_id: Uuid,

    #[validate(range(min = 1.0, message = "loan amount must be positive"))]
    pub loan_amount: f64,

    #[validate(range(min = 1, message = "repayment period must be at least one month"))]
    pub repayment_period: i32,
}

/// Request body for a status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// Query for listing applications
#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub status: Option<ApplicationStatus>,
    pub user_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Result of a fee confirmation: the updated application, plus the loan if
/// the application was already approved
#[derive(Debug, Serialize)]
pub struct FeeConfirmation {
    pub application: Application,
    pub loan: Option<super::Loan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        use ApplicationStatus::*;

        assert!(Submitted.can_transition_to(Approved));
        assert!(Submitted.can_transition_to(Rejected));
        assert!(Submitted.can_transition_to(Review));
        assert!(Review.can_transition_to(Approved));
        assert!(Review.can_transition_to(Rejected));
    }

    #[test]
    fn test_refused_transitions() {
        use ApplicationStatus::*;

        // Rejected is terminal
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Rejected.can_transition_to(Review));
        assert!(!Rejected.can_transition_to(Submitted));

        // Approved never moves again through this handler
        assert!(!Approved.can_transition_to(Review));
        assert!(!Approved.can_transition_to(Rejected));

        // No self-loops, no re-submission
        assert!(!Submitted.can_transition_to(Submitted));
        assert!(!Review.can_transition_to(Submitted));
        assert!(!Review.can_transition_to(Review));
    }

    #[test]
    fn test_notification_type_per_status() {
        assert_eq!(
            ApplicationStatus::Approved.notification_type(),
            NotificationType::Success
        );
        assert_eq!(
            ApplicationStatus::Rejected.notification_type(),
            NotificationType::Error
        );
        assert_eq!(
            ApplicationStatus::Review.notification_type(),
            NotificationType::Info
        );
    }
}
