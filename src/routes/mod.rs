//! Route definitions for the Lendora API

mod admin;
mod application;
mod loan;
mod notification;
mod user;

pub use admin::admin_routes;
pub use application::application_routes;
pub use loan::loan_routes;
pub use notification::notification_routes;
pub use user::user_routes;
