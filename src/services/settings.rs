//! Settings service - access to the singleton configuration row

use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};
use crate::models::{Settings, UpdateSettingsRequest};

/// Service for reading and updating system settings
#[derive(Clone)]
pub struct SettingsService {
    db_pool: PgPool,
}

impl SettingsService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Fetch the singleton settings row. The row is seeded by migration, so
    /// its absence is a deployment fault, not a 404.
    pub async fn get(&self) -> ApiResult<Settings> {
        let settings = sqlx::query_as::<_, Settings>("SELECT * FROM settings WHERE id = 1")
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::Internal("settings row is missing".to_string()))?;

        Ok(settings)
    }

    /// Apply a partial update to the settings row
    pub async fn update(&self, request: UpdateSettingsRequest) -> ApiResult<Settings> {
        validate_settings_update(&request)?;

        let settings = sqlx::query_as::<_, Settings>(
            r#"
            UPDATE settings SET
                interest_rate_default = COALESCE($1, interest_rate_default),
                processing_fee_percent = COALESCE($2, processing_fee_percent),
                min_loan = COALESCE($3, min_loan),
                max_loan = COALESCE($4, max_loan),
                max_months = COALESCE($5, max_months),
                updated_at = NOW()
            WHERE id = 1
            RETURNING *
            "#,
        )
        .bind(request.interest_rate_default)
        .bind(request.processing_fee_percent)
        .bind(request.min_loan)
        .bind(request.max_loan)
        .bind(request.max_months)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(
            min_loan = settings.min_loan,
            max_loan = settings.max_loan,
            max_months = settings.max_months,
            "Settings updated"
        );

        Ok(settings)
    }
}

/// Reject updates that would leave the bounds unusable
pub fn validate_settings_update(request: &UpdateSettingsRequest) -> ApiResult<()> {
    if let Some(rate) = request.interest_rate_default {
        if rate < 0.0 {
            return Err(ApiError::Validation(
                "interest rate cannot be negative".to_string(),
            ));
        }
    }
    if let Some(fee) = request.processing_fee_percent {
        if !(0.0..=100.0).contains(&fee) {
            return Err(ApiError::Validation(
                "processing fee percent must be between 0 and 100".to_string(),
            ));
        }
    }
    if let Some(min) = request.min_loan {
        if min <= 0.0 {
            return Err(ApiError::Validation(
                "minimum loan must be positive".to_string(),
            ));
        }
    }
    if let (Some(min), Some(max)) = (request.min_loan, request.max_loan) {
        if max < min {
            return Err(ApiError::Validation(
                "maximum loan cannot be below minimum loan".to_string(),
            ));
        }
    }
    if let Some(months) = request.max_months {
        if months < 1 {
            return Err(ApiError::Validation(
                "maximum term must be at least one month".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_validation_accepts_partial() {
        let request = UpdateSettingsRequest {
            max_loan: Some(750_000.0),
            ..Default::default()
        };
        assert!(validate_settings_update(&request).is_ok());
    }

    #[test]
    fn test_update_validation_rejects_inverted_bounds() {
        let request = UpdateSettingsRequest {
            min_loan: Some(10_000.0),
            max_loan: Some(5_000.0),
            ..Default::default()
        };
        assert!(validate_settings_update(&request).is_err());
    }

    #[test]
    fn test_update_validation_rejects_bad_fee() {
        let request = UpdateSettingsRequest {
            processing_fee_percent: Some(150.0),
            ..Default::default()
        };
        assert!(validate_settings_update(&request).is_err());
    }
}
