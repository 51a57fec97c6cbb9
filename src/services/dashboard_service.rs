//! Dashboard aggregation - read-only rollup over leads and activities.

use async_trait::async_trait;
use std::sync::Arc;

use super::activity_service::describe_activities;
use super::container::parallel;
use crate::config::DASHBOARD_RECENT_ACTIVITY_LIMIT;
use crate::domain::{status_breakdown, DashboardResponse};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Dashboard service trait for dependency injection
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Status distribution, conversion rates and the recent activity feed
    async fn compute(&self) -> AppResult<DashboardResponse>;
}

/// Concrete implementation of DashboardService using Unit of Work.
pub struct DashboardManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardManager<U> {
    /// Create new dashboard service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardManager<U> {
    async fn compute(&self) -> AppResult<DashboardResponse> {
        let leads = self.uow.leads();
        let activities = self.uow.activities();

        // Counts and feed are not read at a single point in time
        let (counts, recent) = parallel::join2(
            leads.count_by_status(),
            activities.recent(DASHBOARD_RECENT_ACTIVITY_LIMIT),
        )
        .await?;

        let recent = describe_activities(self.uow.as_ref(), recent).await?;
        Ok(DashboardResponse::new(status_breakdown(counts), recent))
    }
}
