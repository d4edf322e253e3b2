//! Notification-related API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{ApiResponse, Notification};
use crate::state::AppState;

/// List a user's notifications
pub async fn list_user_notifications(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Notification>>>> {
    let notifications = app_state
        .notification_service
        .list_for_user(user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Notifications found", notifications)))
}

/// Mark a notification as read
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let notification = app_state.notification_service.mark_read(id).await?;

    Ok(Json(ApiResponse::ok("Notification marked as read", notification)))
}
