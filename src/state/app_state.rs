//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::{
    AnalyticsService, ApplicationService, LoanService, NotificationService, SettingsService,
    UserService,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub application_service: Arc<ApplicationService>,
    pub loan_service: Arc<LoanService>,
    pub user_service: Arc<UserService>,
    pub notification_service: Arc<NotificationService>,
    pub settings_service: Arc<SettingsService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl AppState {
    pub fn new(
        application_service: Arc<ApplicationService>,
        loan_service: Arc<LoanService>,
        user_service: Arc<UserService>,
        notification_service: Arc<NotificationService>,
        settings_service: Arc<SettingsService>,
        analytics_service: Arc<AnalyticsService>,
    ) -> Self {
        Self {
            application_service,
            loan_service,
            user_service,
            notification_service,
            settings_service,
            analytics_service,
        }
    }
}

impl FromRef<AppState> for Arc<ApplicationService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.application_service.clone()
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<NotificationService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notification_service.clone()
    }
}

impl FromRef<AppState> for Arc<SettingsService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.settings_service.clone()
    }
}

impl FromRef<AppState> for Arc<AnalyticsService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.analytics_service.clone()
    }
}
