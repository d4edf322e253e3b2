//! Settings API handlers (admin)

use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::models::{ApiResponse, Settings, UpdateSettingsRequest};
use crate::state::AppState;

/// Get the current system settings
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Settings>>> {
    let settings = app_state.settings_service.get().await?;

    Ok(Json(ApiResponse::ok("Settings found", settings)))
}

/// Update system settings
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<ApiResponse<Settings>>> {
    let settings = app_state.settings_service.update(request).await?;

    Ok(Json(ApiResponse::ok("Settings updated", settings)))
}
