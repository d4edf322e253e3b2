//! Application-related API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{
    ApiResponse, Application, CreateApplicationRequest, FeeConfirmation, ListApplicationsQuery,
    PaginatedResponse, UpdateStatusRequest,
};
use crate::state::AppState;

/// Create a new loan application
pub async fn create_application(
    State(app_state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> ApiResult<Json<ApiResponse<Application>>> {
    request.validate()?;

    let application = app_state
        .application_service
        .create_application(request)
        .await?;

    Ok(Json(ApiResponse::ok("Application submitted", application)))
}

/// Get a single application by ID
pub async fn get_application(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Application>>> {
    let application = app_state.application_service.get_application(id).await?;

    Ok(Json(ApiResponse::ok("Application found", application)))
}

/// List a user's applications
pub async fn list_user_applications(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Application>>>> {
    let applications = app_state
        .application_service
        .list_for_user(user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Applications found", applications)))
}

/// List applications with filters (admin)
pub async fn list_applications(
    State(app_state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<Application>>>> {
    let applications = app_state
        .application_service
        .list_applications(query)
        .await?;

    Ok(Json(ApiResponse::ok("Applications found", applications)))
}

/// Transition an application to a new status (admin)
pub async fn update_application_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<ApiResponse<Application>>> {
    let application = app_state
        .application_service
        .update_status(id, request.status)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("Application {}", application.status.as_str()),
        application,
    )))
}

/// Confirm the processing fee for an application (admin)
pub async fn confirm_processing_fee(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FeeConfirmation>>> {
    let confirmation = app_state
        .application_service
        .confirm_processing_fee(id)
        .await?;

    let message = if confirmation.loan.is_some() {
        "Processing fee confirmed, loan disbursed"
    } else {
        "Processing fee confirmed"
    };

    Ok(Json(ApiResponse::ok(message, confirmation)))
}
