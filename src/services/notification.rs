//! Notification service - best-effort notification rows
//!
//! Notifications are plain inserts: no retry, no deduplication, no delivery
//! acknowledgement. Repeated calls produce repeated rows.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{NewNotification, Notification};

/// Service for writing and listing user notifications
#[derive(Clone)]
pub struct NotificationService {
    db_pool: PgPool,
}

impl NotificationService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Insert a notification row for a user.
    ///
    /// Runs in its own implicit transaction; callers sequence this after
    /// their own writes and a failure here does not undo those.
    pub async fn notify(&self, new: NewNotification) -> ApiResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                user_id, application_id, loan_id, notification_type,
                title, message, persistent, read, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(new.application_id)
        .bind(new.loan_id)
        .bind(new.notification_type)
        .bind(&new.title)
        .bind(&new.message)
        .bind(new.persistent)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        tracing::debug!(
            user_id = %new.user_id,
            title = %new.title,
            "Notification recorded"
        );

        Ok(notification)
    }

    /// List a user's notifications, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(notifications)
    }

    /// Mark a notification as read
    pub async fn mark_read(&self, id: Uuid) -> ApiResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(notification)
    }
}
