//! Loan route definitions

use axum::{routing::get, routing::post, Router};

use crate::handlers::{get_loan, list_repayments, record_repayment};
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans/:id", get(get_loan))
        .route("/api/loans/:id/repayments", post(record_repayment))
        .route("/api/loans/:id/repayments", get(list_repayments))
}
