//! Data models for the Lendora backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

pub mod application;
pub mod loan;

pub use application::*;
pub use loan::*;

/// User model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub credit_score: Option<i32>,
    pub kyc_status: KycStatus,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User roles
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

/// KYC verification status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "kyc_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

/// User response (sanitized for API)
#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub credit_score: Option<i32>,
    pub kyc_status: KycStatus,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            credit_score: user.credit_score,
            kyc_status: user.kyc_status,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// Request to register a new user
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 2, message = "full name is too short"))]
    pub full_name: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 7, max = 20, message = "invalid phone number"))]
    pub phone: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Notification model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub application_id: Option<Uuid>,
    pub loan_id: Option<Uuid>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub persistent: bool,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification types
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "notification_type", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    Success,
    Error,
    Info,
}

/// Payload for an outgoing notification insert
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub application_id: Option<Uuid>,
    pub loan_id: Option<Uuid>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub persistent: bool,
}

/// Charge model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Charge {
    pub id: Uuid,
    pub application_id: Uuid,
    pub charge_type: ChargeType,
    pub amount: f64,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Charge types
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "charge_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeType {
    ProcessingFee,
    LateFee,
}

/// Settings model - the singleton configuration row
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Settings {
    pub id: i32,
    pub interest_rate_default: f64,
    pub processing_fee_percent: f64,
    pub min_loan: f64,
    pub max_loan: f64,
    pub max_months: i32,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the settings row
#[derive(Debug, Deserialize, Default)]
pub struct UpdateSettingsRequest {
    pub interest_rate_default: Option<f64>,
    pub processing_fee_percent: Option<f64>,
    pub min_loan: Option<f64>,
    pub max_loan: Option<f64>,
    pub max_months: Option<i32>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build a success envelope
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Pagination parameters
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Resolve page/limit to sane values (1-based page, limit capped at 100)
    pub fn resolve(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(20).clamp(1, 100);
        (page, limit)
    }

    pub fn offset(&self) -> i64 {
        let (page, limit) = self.resolve();
        (page - 1) * limit
    }
}

/// Paginated response
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams {
            page: None,
            limit: None,
        };
        assert_eq!(params.resolve(), (1, 20));
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_clamping() {
        let params = PaginationParams {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(params.resolve(), (1, 100));

        let params = PaginationParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_register_request_validation() {
        use validator::Validate;

        let ok = RegisterUserRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "08012345678".to_string(),
            password: "correcthorse".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterUserRequest {
            email: "not-an-email".to_string(),
            ..ok_clone(&ok)
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterUserRequest {
            password: "short".to_string(),
            ..ok_clone(&ok)
        };
        assert!(short_password.validate().is_err());
    }

    fn ok_clone(req: &RegisterUserRequest) -> RegisterUserRequest {
        RegisterUserRequest {
            full_name: req.full_name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            password: req.password.clone(),
        }
    }
}
