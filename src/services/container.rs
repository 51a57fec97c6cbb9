//! Service Container - Centralized service access with parallel execution support.
//!
//! Features:
//! - Centralized access to all application services
//! - Thread-safe concurrent access via Arc
//! - Parallel execution helper for independent reads

use std::future::Future;
use std::sync::Arc;

use super::{
    ActivityManager, ActivityService, AuthService, Authenticator, DashboardManager,
    DashboardService, LeadManager, LeadService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get lead service
    fn leads(&self) -> Arc<dyn LeadService>;

    /// Get activity service
    fn activities(&self) -> Arc<dyn ActivityService>;

    /// Get dashboard service
    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    lead_service: Arc<dyn LeadService>,
    activity_service: Arc<dyn ActivityService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        lead_service: Arc<dyn LeadService>,
        activity_service: Arc<dyn ActivityService>,
        dashboard_service: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            auth_service,
            lead_service,
            activity_service,
            dashboard_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(config)),
            lead_service: Arc::new(LeadManager::new(uow.clone())),
            activity_service: Arc::new(ActivityManager::new(uow.clone())),
            dashboard_service: Arc::new(DashboardManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn leads(&self) -> Arc<dyn LeadService> {
        self.lead_service.clone()
    }

    fn activities(&self) -> Arc<dyn ActivityService> {
        self.activity_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when both complete.
    /// If either operation fails, the error is returned immediately.
    ///
    /// # Example
    /// ```ignore
    /// let (counts, recent) = parallel::join2(
    ///     uow.leads().count_by_status(),
    ///     uow.activities().recent(10),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
