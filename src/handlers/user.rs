//! User-related API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{ApiResponse, RegisterUserRequest, UserResponse};
use crate::state::AppState;

/// Register a new user
pub async fn register_user(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    request.validate()?;

    let user = app_state.user_service.register(request).await?;

    Ok(Json(ApiResponse::ok("User registered", user.into())))
}

/// Get a user by ID
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = app_state.user_service.get_user(id).await?;

    Ok(Json(ApiResponse::ok("User found", user.into())))
}
