//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    ActivityService, AuthService, DashboardService, LeadService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Token verification
    pub auth_service: Arc<dyn AuthService>,
    /// Lead lifecycle service
    pub lead_service: Arc<dyn LeadService>,
    /// Activity service
    pub activity_service: Arc<dyn ActivityService>,
    /// Dashboard aggregation
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            lead_service: container.leads(),
            activity_service: container.activities(),
            dashboard_service: container.dashboard(),
            database,
        }
    }
}
