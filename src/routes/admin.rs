//! Admin route definitions

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{
    confirm_processing_fee, detect_defaults, get_analytics, get_settings, list_applications,
    list_loans, update_application_status, update_settings,
};
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/applications", get(list_applications))
        .route(
            "/api/admin/applications/:id/status",
            patch(update_application_status),
        )
        .route(
            "/api/admin/applications/:id/confirm-fee",
            post(confirm_processing_fee),
        )
        .route("/api/admin/loans", get(list_loans))
        .route("/api/admin/loans/detect-defaults", post(detect_defaults))
        .route("/api/admin/analytics", get(get_analytics))
        .route("/api/admin/settings", get(get_settings))
        .route("/api/admin/settings", put(update_settings))
}
