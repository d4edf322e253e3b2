//! Application route definitions

use axum::{routing::get, routing::post, Router};

use crate::handlers::{create_application, get_application, list_user_applications};
use crate::state::AppState;

pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/api/applications/create", post(create_application))
        .route("/api/applications/:id", get(get_application))
        .route(
            "/api/users/:id/applications",
            get(list_user_applications),
        )
}
