//! Unit of Work: single entry point to every repository.
//!
//! Services receive one `UnitOfWork` instead of a handful of repositories,
//! and tests swap in mocks per repository through the same trait.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    ActivityRepository, ActivityStore, LeadRepository, LeadStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get lead repository
    fn leads(&self) -> Arc<dyn LeadRepository>;

    /// Get activity repository
    fn activities(&self) -> Arc<dyn ActivityRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    lead_repo: Arc<LeadStore>,
    activity_repo: Arc<ActivityStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            lead_repo: Arc::new(LeadStore::new(db.clone())),
            activity_repo: Arc::new(ActivityStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn leads(&self) -> Arc<dyn LeadRepository> {
        self.lead_repo.clone()
    }

    fn activities(&self) -> Arc<dyn ActivityRepository> {
        self.activity_repo.clone()
    }
}
