//! User service - registration and lookup
//!
//! Token issuance is handled elsewhere; this service only manages the user
//! records the loan workflow hangs off.

use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{KycStatus, RegisterUserRequest, User, UserRole};

/// Service for user registration and retrieval
#[derive(Clone)]
pub struct UserService {
    db_pool: PgPool,
}

impl UserService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Register a new user. Duplicate email or phone is a client error.
    pub async fn register(&self, request: RegisterUserRequest) -> ApiResult<User> {
        let password_hash = hash(&request.password, DEFAULT_COST)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                full_name, email, phone, password_hash, role,
                kyc_status, is_verified, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $7)
            RETURNING *
            "#,
        )
        .bind(&request.full_name)
        .bind(request.email.to_lowercase())
        .bind(&request.phone)
        .bind(&password_hash)
        .bind(UserRole::User)
        .bind(KycStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                let field = match db.constraint() {
                    Some(c) if c.contains("email") => "email",
                    Some(c) if c.contains("phone") => "phone number",
                    _ => "email or phone number",
                };
                ApiError::Duplicate(format!("a user with this {} already exists", field))
            }
            _ => ApiError::from(e),
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> ApiResult<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no user with id {}", id)))?;

        Ok(user)
    }
}
