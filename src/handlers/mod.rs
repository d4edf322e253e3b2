//! API handlers for the Lendora backend

pub mod analytics;
pub mod application;
pub mod loan;
pub mod notification;
pub mod settings;
pub mod user;

pub use analytics::*;
pub use application::*;
pub use loan::*;
pub use notification::*;
pub use settings::*;
pub use user::*;
