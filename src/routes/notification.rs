//! Notification route definitions

use axum::{routing::get, routing::post, Router};

use crate::handlers::{list_user_notifications, mark_notification_read};
use crate::state::AppState;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/:id/notifications",
            get(list_user_notifications),
        )
        .route(
            "/api/notifications/:id/read",
            post(mark_notification_read),
        )
}
