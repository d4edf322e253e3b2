//! Loan-related API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{
    ApiResponse, ListLoansQuery, Loan, PaginatedResponse, Repayment, RepaymentRequest,
};
use crate::state::AppState;

/// Get a single loan by ID
pub async fn get_loan(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Loan>>> {
    let loan = app_state.loan_service.get_loan(id).await?;

    Ok(Json(ApiResponse::ok("Loan found", loan)))
}

/// List loans with filters (admin)
pub async fn list_loans(
    State(app_state): State<AppState>,
    Query(query): Query<ListLoansQuery>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<Loan>>>> {
    let loans = app_state.loan_service.list_loans(query).await?;

    Ok(Json(ApiResponse::ok("Loans found", loans)))
}

/// Record a repayment against a loan
pub async fn record_repayment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RepaymentRequest>,
) -> ApiResult<Json<ApiResponse<Repayment>>> {
    request.validate()?;

    let repayment = app_state.loan_service.record_repayment(id, request).await?;

    Ok(Json(ApiResponse::ok("Repayment recorded", repayment)))
}

/// List repayments for a loan
pub async fn list_repayments(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Repayment>>>> {
    let repayments = app_state.loan_service.list_repayments(id).await?;

    Ok(Json(ApiResponse::ok("Repayments found", repayments)))
}

/// Result of a default sweep
#[derive(Debug, Serialize)]
pub struct DefaultSweepResult {
    pub defaulted_loan_ids: Vec<Uuid>,
}

/// Mark past-due loans as defaulted (admin)
pub async fn detect_defaults(
    State(app_state): State<AppState>,
) -> ApiResult<Json<ApiResponse<DefaultSweepResult>>> {
    let defaulted_loan_ids = app_state.loan_service.detect_defaults().await?;

    Ok(Json(ApiResponse::ok(
        format!("{} loan(s) marked as defaulted", defaulted_loan_ids.len()),
        DefaultSweepResult { defaulted_loan_ids },
    )))
}
