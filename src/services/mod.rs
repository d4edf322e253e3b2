//! Service layer for the Lendora backend

pub mod analytics;
pub mod application;
pub mod loan;
pub mod notification;
pub mod settings;
pub mod user;

pub use analytics::AnalyticsService;
pub use application::ApplicationService;
pub use loan::LoanService;
pub use notification::NotificationService;
pub use settings::SettingsService;
pub use user::UserService;
