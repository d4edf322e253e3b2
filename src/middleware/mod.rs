//! Middleware for the Lendora API
//!
//! Request tracing, rate limiting, security headers, and the database
//! availability guard.

mod db_guard;
mod rate_limiter;
mod security;
mod tracing;

pub use db_guard::database_guard_layer;
pub use rate_limiter::{rate_limit_layer, RateLimiter};
pub use security::{hsts_header, security_headers};
pub use tracing::request_tracing;
