//! Analytics API handlers (admin)

use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::models::ApiResponse;
use crate::services::analytics::AnalyticsOverview;
use crate::state::AppState;

/// Get the admin dashboard overview
pub async fn get_analytics(
    State(app_state): State<AppState>,
) -> ApiResult<Json<ApiResponse<AnalyticsOverview>>> {
    let overview = app_state.analytics_service.overview().await?;

    Ok(Json(ApiResponse::ok("Analytics computed", overview)))
}
