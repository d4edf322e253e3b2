//! Application service - intake, status transitions, and fee confirmation
//!
//! The request -> validate -> mutate -> notify pipeline for loan
//! applications. Each database statement runs in its own transaction;
//! a notification failure after a successful status change surfaces as an
//! error without undoing the change.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    Application, ApplicationStatus, ChargeType, CreateApplicationRequest, FeeConfirmation,
    ListApplicationsQuery, Loan, LoanSchedule, LoanStatus, NewNotification, NotificationType,
    PaginatedResponse, PaginationParams, Settings,
};
use crate::services::{NotificationService, SettingsService};

/// Service for the application lifecycle
#[derive(Clone)]
pub struct ApplicationService {
    db_pool: PgPool,
    settings: SettingsService,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(
        db_pool: PgPool,
        settings: SettingsService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            db_pool,
            settings,
            notifications,
        }
    }

    /// Create a new application in `submitted` status.
    ///
    /// Bounds come from the settings row at the time of the request. An
    /// unpaid processing-fee charge is recorded alongside the application.
    pub async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> ApiResult<Application> {
        let settings = self.settings.get().await?;
        validate_against_settings(&settings, request.loan_amount, request.repayment_period)?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (
                user_id, loan_amount, repayment_period, status,
                processing_fee_paid, processing_progress, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, FALSE, 0, $5, $5)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.loan_amount)
        .bind(request.repayment_period)
        .bind(ApplicationStatus::Submitted)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        let fee = processing_fee_amount(request.loan_amount, settings.processing_fee_percent);
        sqlx::query(
            r#"
            INSERT INTO charges (application_id, charge_type, amount, paid, created_at)
            VALUES ($1, $2, $3, FALSE, $4)
            "#,
        )
        .bind(application.id)
        .bind(ChargeType::ProcessingFee)
        .bind(fee)
        .bind(Utc::now())
        .execute(&self.db_pool)
        .await?;

        self.notifications
            .notify(NewNotification {
                user_id: application.user_id,
                application_id: Some(application.id),
                loan_id: None,
                notification_type: NotificationType::Info,
                title: "Application received".to_string(),
                message: format!(
                    "Your loan application for {:.2} over {} months has been received and is awaiting review.",
                    application.loan_amount, application.repayment_period
                ),
                persistent: false,
            })
            .await?;

        tracing::info!(
            application_id = %application.id,
            user_id = %application.user_id,
            amount = application.loan_amount,
            "Application created"
        );

        Ok(application)
    }

    /// Fetch a single application
    pub async fn get_application(&self, id: Uuid) -> ApiResult<Application> {
        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db_pool)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("no application with id {}", id)))?;

        Ok(application)
    }

    /// List applications with optional status/user filters
    pub async fn list_applications(
        &self,
        query: ListApplicationsQuery,
    ) -> ApiResult<PaginatedResponse<Application>> {
        let pagination = PaginationParams {
            page: query.page,
            limit: query.limit,
        };
        let (page, limit) = pagination.resolve();

        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE ($1::application_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.status)
        .bind(query.user_id)
        .bind(limit)
        .bind(pagination.offset())
        .fetch_all(&self.db_pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM applications
            WHERE ($1::application_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            "#,
        )
        .bind(query.status)
        .bind(query.user_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(PaginatedResponse {
            data: applications,
            total,
            page,
            limit,
        })
    }

    /// List a user's applications, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(applications)
    }

    /// Move an application to a new status.
    ///
    /// The transition table is the only guard; concurrent transitions on the
    /// same application are not serialized here. Exactly one notification is
    /// written per successful transition.
    pub async fn update_status(
        &self,
        id: Uuid,
        next: ApplicationStatus,
    ) -> ApiResult<Application> {
        let current = self.get_application(id).await?;

        if !current.status.can_transition_to(next) {
            return Err(ApiError::InvalidTransition(format!(
                "cannot move application from {} to {}",
                current.status.as_str(),
                next.as_str()
            )));
        }

        let (progress, note) = transition_progress(next);
        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $1, processing_progress = $2, progress_note = $3, updated_at = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(next)
        .bind(progress)
        .bind(note)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.db_pool)
        .await?;

        let (title, message) = transition_message(&application, next);
        self.notifications
            .notify(NewNotification {
                user_id: application.user_id,
                application_id: Some(application.id),
                loan_id: None,
                notification_type: next.notification_type(),
                title,
                message,
                persistent: next == ApplicationStatus::Approved,
            })
            .await?;

        tracing::info!(
            application_id = %application.id,
            from = current.status.as_str(),
            to = next.as_str(),
            "Application status updated"
        );

        Ok(application)
    }

    /// Confirm the processing fee for an application.
    ///
    /// Marks the fee paid; if the application is already approved, computes
    /// the repayment schedule and disburses the loan. The UNIQUE constraint
    /// on loans.application_id is the only duplicate guard: a second
    /// confirmation fails on the insert instead of creating another loan.
    pub async fn confirm_processing_fee(&self, id: Uuid) -> ApiResult<FeeConfirmation> {
        let application = self.get_application(id).await?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET processing_fee_paid = TRUE, updated_at = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(application.id)
        .fetch_one(&self.db_pool)
        .await?;

        sqlx::query(
            r#"
            UPDATE charges
            SET paid = TRUE, paid_at = $1
            WHERE application_id = $2 AND charge_type = $3 AND paid = FALSE
            "#,
        )
        .bind(Utc::now())
        .bind(application.id)
        .bind(ChargeType::ProcessingFee)
        .execute(&self.db_pool)
        .await?;

        if application.status != ApplicationStatus::Approved {
            return Ok(FeeConfirmation {
                application,
                loan: None,
            });
        }

        let loan = self.disburse_loan(&application).await?;

        self.notifications
            .notify(NewNotification {
                user_id: application.user_id,
                application_id: Some(application.id),
                loan_id: Some(loan.id),
                notification_type: NotificationType::Success,
                title: "Loan disbursed".to_string(),
                message: format!(
                    "Your loan of {:.2} has been disbursed. Monthly installment: {:.2} over {} months.",
                    loan.principal_amount, loan.monthly_installment, application.repayment_period
                ),
                persistent: true,
            })
            .await?;

        Ok(FeeConfirmation {
            application,
            loan: Some(loan),
        })
    }

    async fn disburse_loan(&self, application: &Application) -> ApiResult<Loan> {
        let schedule = LoanSchedule::compute(application.loan_amount, application.repayment_period);
        let start = Utc::now();
        let end = schedule.end_date(start);

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                application_id, user_id, principal_amount, interest_rate,
                total_interest, total_repayment, monthly_installment,
                outstanding_balance, start_date, end_date, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(application.id)
        .bind(application.user_id)
        .bind(schedule.principal)
        .bind(schedule.monthly_rate)
        .bind(schedule.total_interest)
        .bind(schedule.total_repayment)
        .bind(schedule.monthly_installment)
        .bind(schedule.total_repayment)
        .bind(start)
        .bind(end)
        .bind(LoanStatus::Active)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::Duplicate(
                "a loan has already been disbursed for this application".to_string(),
            ),
            _ => ApiError::from(e),
        })?;

        tracing::info!(
            loan_id = %loan.id,
            application_id = %application.id,
            principal = loan.principal_amount,
            "Loan disbursed"
        );

        Ok(loan)
    }
}

/// Check an application request against the settings bounds
pub fn validate_against_settings(
    settings: &Settings,
    loan_amount: f64,
    repayment_period: i32,
) -> ApiResult<()> {
    if loan_amount < settings.min_loan || loan_amount > settings.max_loan {
        return Err(ApiError::Validation(format!(
            "loan amount must be between {:.2} and {:.2}",
            settings.min_loan, settings.max_loan
        )));
    }
    if repayment_period < 1 || repayment_period > settings.max_months {
        return Err(ApiError::Validation(format!(
            "repayment period must be between 1 and {} months",
            settings.max_months
        )));
    }

    Ok(())
}

/// Processing fee charged at intake
pub fn processing_fee_amount(loan_amount: f64, fee_percent: f64) -> f64 {
    loan_amount * fee_percent / 100.0
}

fn transition_progress(next: ApplicationStatus) -> (i32, &'static str) {
    match next {
        ApplicationStatus::Approved => (100, "Application approved"),
        ApplicationStatus::Rejected => (100, "Application rejected"),
        ApplicationStatus::Review => (50, "Application under review"),
        ApplicationStatus::Submitted => (0, "Application submitted"),
    }
}

fn transition_message(application: &Application, next: ApplicationStatus) -> (String, String) {
    match next {
        ApplicationStatus::Approved => (
            "Application approved".to_string(),
            format!(
                "Your loan application for {:.2} has been approved. Pay the processing fee to receive your disbursement.",
                application.loan_amount
            ),
        ),
        ApplicationStatus::Rejected => (
            "Application rejected".to_string(),
            format!(
                "Your loan application for {:.2} was not approved.",
                application.loan_amount
            ),
        ),
        ApplicationStatus::Review => (
            "Application under review".to_string(),
            format!(
                "Your loan application for {:.2} is being reviewed. We will notify you once a decision is made.",
                application.loan_amount
            ),
        ),
        ApplicationStatus::Submitted => (
            "Application received".to_string(),
            format!(
                "Your loan application for {:.2} has been received.",
                application.loan_amount
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_settings() -> Settings {
        Settings {
            id: 1,
            interest_rate_default: 0.06,
            processing_fee_percent: 2.5,
            min_loan: 5_000.0,
            max_loan: 500_000.0,
            max_months: 36,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_amount_bounds() {
        let settings = test_settings();

        assert!(validate_against_settings(&settings, 5_000.0, 12).is_ok());
        assert!(validate_against_settings(&settings, 500_000.0, 12).is_ok());

        // 1_000 below min_loan of 5_000 is rejected
        assert!(validate_against_settings(&settings, 1_000.0, 12).is_err());
        assert!(validate_against_settings(&settings, 500_001.0, 12).is_err());
    }

    #[test]
    fn test_period_bounds() {
        let settings = test_settings();

        assert!(validate_against_settings(&settings, 25_000.0, 1).is_ok());
        assert!(validate_against_settings(&settings, 25_000.0, 36).is_ok());
        assert!(validate_against_settings(&settings, 25_000.0, 37).is_err());
        assert!(validate_against_settings(&settings, 25_000.0, 0).is_err());
    }

    #[test]
    fn test_processing_fee_amount() {
        assert_eq!(processing_fee_amount(25_000.0, 2.5), 625.0);
        assert_eq!(processing_fee_amount(10_000.0, 0.0), 0.0);
    }

    #[test]
    fn test_transition_progress_markers() {
        assert_eq!(transition_progress(ApplicationStatus::Approved).0, 100);
        assert_eq!(transition_progress(ApplicationStatus::Review).0, 50);
    }
}
