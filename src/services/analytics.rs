//! Analytics service - admin dashboard aggregates

use serde::Serialize;
use sqlx::PgPool;

use crate::error::ApiResult;

/// Counts and sums shown on the admin dashboard
#[derive(Debug, Serialize)]
pub struct AnalyticsOverview {
    pub total_users: i64,
    pub applications: ApplicationCounts,
    pub loans: LoanCounts,
    pub principal_disbursed: f64,
    pub outstanding_balance: f64,
    pub total_repaid: f64,
}

#[derive(Debug, Serialize)]
pub struct ApplicationCounts {
    pub total: i64,
    pub submitted: i64,
    pub approved: i64,
    pub rejected: i64,
    pub review: i64,
}

#[derive(Debug, Serialize)]
pub struct LoanCounts {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub defaulted: i64,
}

/// Raw application statistics from the database
#[derive(Debug, sqlx::FromRow)]
struct ApplicationStats {
    total: Option<i64>,
    submitted: Option<i64>,
    approved: Option<i64>,
    rejected: Option<i64>,
    review: Option<i64>,
}

/// Raw loan statistics from the database
#[derive(Debug, sqlx::FromRow)]
struct LoanStats {
    total: Option<i64>,
    active: Option<i64>,
    completed: Option<i64>,
    defaulted: Option<i64>,
    principal_disbursed: Option<f64>,
    outstanding_balance: Option<f64>,
}

/// Service computing dashboard aggregates
#[derive(Clone)]
pub struct AnalyticsService {
    db_pool: PgPool,
}

impl AnalyticsService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Gather the dashboard overview in a handful of aggregate queries
    pub async fn overview(&self) -> ApiResult<AnalyticsOverview> {
        let (total_users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db_pool)
            .await?;

        let app_stats = sqlx::query_as::<_, ApplicationStats>(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'submitted') as submitted,
                COUNT(*) FILTER (WHERE status = 'approved') as approved,
                COUNT(*) FILTER (WHERE status = 'rejected') as rejected,
                COUNT(*) FILTER (WHERE status = 'review') as review
            FROM applications
            "#,
        )
        .fetch_one(&self.db_pool)
        .await?;

        let loan_stats = sqlx::query_as::<_, LoanStats>(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'active') as active,
                COUNT(*) FILTER (WHERE status = 'completed') as completed,
                COUNT(*) FILTER (WHERE status = 'defaulted') as defaulted,
                COALESCE(SUM(principal_amount), 0) as principal_disbursed,
                COALESCE(SUM(outstanding_balance), 0) as outstanding_balance
            FROM loans
            "#,
        )
        .fetch_one(&self.db_pool)
        .await?;

        let (total_repaid,): (f64,) =
            sqlx::query_as("SELECT COALESCE(SUM(amount), 0)::double precision FROM repayments")
                .fetch_one(&self.db_pool)
                .await?;

        Ok(AnalyticsOverview {
            total_users,
            applications: ApplicationCounts {
                total: app_stats.total.unwrap_or(0),
                submitted: app_stats.submitted.unwrap_or(0),
                approved: app_stats.approved.unwrap_or(0),
                rejected: app_stats.rejected.unwrap_or(0),
                review: app_stats.review.unwrap_or(0),
            },
            loans: LoanCounts {
                total: loan_stats.total.unwrap_or(0),
                active: loan_stats.active.unwrap_or(0),
                completed: loan_stats.completed.unwrap_or(0),
                defaulted: loan_stats.defaulted.unwrap_or(0),
            },
            principal_disbursed: loan_stats.principal_disbursed.unwrap_or(0.0),
            outstanding_balance: loan_stats.outstanding_balance.unwrap_or(0.0),
            total_repaid,
        })
    }
}
