//! User route definitions

use axum::{routing::get, routing::post, Router};

use crate::handlers::{get_user, register_user};
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/register", post(register_user))
        .route("/api/users/:id", get(get_user))
}
