//! Loan service - servicing of disbursed loans

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    ListLoansQuery, Loan, LoanStatus, PaginatedResponse, PaginationParams, Repayment,
    RepaymentRequest,
};

/// Service for loan retrieval, repayments, and default detection
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
}

impl LoanService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Get a loan by ID
    pub async fn get_loan(&self, id: Uuid) -> ApiResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no loan with id {}", id)))?;

        Ok(loan)
    }

    /// List loans with optional status/user filters
    pub async fn list_loans(&self, query: ListLoansQuery) -> ApiResult<PaginatedResponse<Loan>> {
        let pagination = PaginationParams {
            page: query.page,
            limit: query.limit,
        };
        let (page, limit) = pagination.resolve();

        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE ($1::loan_status IS NULL OR status = $1)
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
            SELECT COUNT(*) FROM loans
            WHERE ($1::loan_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            "#,
        )
        .bind(query.status)
        .bind(query.user_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(PaginatedResponse {
            data: loans,
            total,
            page,
            limit,
        })
    }

    /// Record a repayment and update the loan balance.
    ///
    /// Runs in a transaction with a row lock on the loan; the balance floors
    /// at zero and the loan flips to `completed` once fully repaid.
    pub async fn record_repayment(
        &self,
        loan_id: Uuid,
        request: RepaymentRequest,
    ) -> ApiResult<Repayment> {
        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no loan with id {}", loan_id)))?;

        if loan.status != LoanStatus::Active {
            return Err(ApiError::Validation(format!(
                "loan is not active (status: {:?})",
                loan.status
            )));
        }

        let reference = request.reference.unwrap_or_else(generate_payment_reference);

        let repayment = sqlx::query_as::<_, Repayment>(
            r#"
            INSERT INTO repayments (loan_id, amount, reference, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(loan_id)
        .bind(request.amount)
        .bind(&reference)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let new_balance = (loan.outstanding_balance - request.amount).max(0.0);
        let new_status = if new_balance == 0.0 {
            LoanStatus::Completed
        } else {
            loan.status
        };

        sqlx::query(
            "UPDATE loans SET outstanding_balance = $1, status = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(new_balance)
        .bind(new_status)
        .bind(Utc::now())
        .bind(loan_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = %loan_id,
            amount = request.amount,
            balance = new_balance,
            "Repayment recorded"
        );

        Ok(repayment)
    }

    /// Flip past-due active loans with an outstanding balance to `defaulted`.
    ///
    /// Invoked from an admin endpoint; there is no background sweeper.
    pub async fn detect_defaults(&self) -> ApiResult<Vec<Uuid>> {
        let defaulted = sqlx::query_as::<_, (Uuid,)>(
            r#"
            UPDATE loans
            SET status = $1, updated_at = $2
            WHERE status = $3 AND end_date < $2 AND outstanding_balance > 0
            RETURNING id
            "#,
        )
        .bind(LoanStatus::Defaulted)
        .bind(Utc::now())
        .bind(LoanStatus::Active)
        .fetch_all(&self.db_pool)
        .await?;

        let ids: Vec<Uuid> = defaulted.into_iter().map(|(id,)| id).collect();

        if !ids.is_empty() {
            tracing::warn!(count = ids.len(), "Loans marked as defaulted");
        }

        Ok(ids)
    }

    /// List repayments for a loan, oldest first
    pub async fn list_repayments(&self, loan_id: Uuid) -> ApiResult<Vec<Repayment>> {
        let repayments = sqlx::query_as::<_, Repayment>(
            "SELECT * FROM repayments WHERE loan_id = $1 ORDER BY created_at ASC",
        )
        .bind(loan_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(repayments)
    }
}

/// Server-generated payment reference for repayments recorded without one
fn generate_payment_reference() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();

    format!("RPY-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_reference_shape() {
        let reference = generate_payment_reference();
        assert!(reference.starts_with("RPY-"));
        assert_eq!(reference.len(), 14);
        assert!(!reference.contains(char::is_lowercase));
    }

    #[test]
    fn test_generated_references_differ() {
        assert_ne!(generate_payment_reference(), generate_payment_reference());
    }
}
