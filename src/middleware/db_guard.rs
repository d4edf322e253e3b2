//! Database availability guard
//!
//! Probes database connectivity before handlers run and converts an
//! unreachable database into a 503 instead of letting every handler fail
//! with its own flavor of connection error. The probe is bounded by
//! [`crate::db::DB_PROBE_TIMEOUT`].

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;

use crate::db;
use crate::error::ApiError;

/// Create the database guard middleware layer
pub fn database_guard_layer(
    pool: PgPool,
) -> impl Fn(
    Request<Body>,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone
       + Send {
    move |request: Request<Body>, next: Next| {
        let pool = pool.clone();
        Box::pin(async move {
            if let Err(e) = db::check_health(&pool).await {
                tracing::error!(error = %e, "Database unreachable, refusing request");
                return ApiError::DatabaseUnavailable(e.to_string()).into_response();
            }

            next.run(request).await
        })
    }
}
