//! Activity repository implementation.
//!
//! Activities hang off leads; an activity whose lead is soft-deleted is
//! treated as absent by every method here.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::entities::activity::{self, ActiveModel, Entity as ActivityEntity};
use super::entities::lead::{self, Entity as LeadEntity};
use crate::domain::{Activity, ActivityChanges, ActivityQuery, NewActivity};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Activity repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Find activity by ID; none if its lead is soft-deleted
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Activity>>;

    /// Filtered page of activities, newest date first, plus the total count
    async fn list(
        &self,
        query: &ActivityQuery,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Activity>, u64)>;

    /// Whole timeline of one lead, newest date first
    async fn list_for_lead(&self, lead_id: i32) -> AppResult<Vec<Activity>>;

    /// Most recently created activities across all live leads
    async fn recent(&self, limit: u64) -> AppResult<Vec<Activity>>;

    /// Insert an activity
    async fn create(&self, activity: NewActivity) -> AppResult<Activity>;

    /// Apply changes to an activity
    async fn update(&self, id: i32, changes: ActivityChanges) -> AppResult<Activity>;

    /// Permanently remove an activity
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ActivityRepository
pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Activities whose lead is still live
    fn visible() -> Select<ActivityEntity> {
        ActivityEntity::find()
            .inner_join(LeadEntity)
            .filter(lead::Column::DeletedAt.is_null())
    }

    fn timeline() -> Select<ActivityEntity> {
        Self::visible()
            .order_by_desc(activity::Column::Date)
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::Id)
    }

    async fn find_model(&self, id: i32) -> AppResult<activity::Model> {
        Self::visible()
            .filter(activity::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

fn to_domain(models: Vec<activity::Model>) -> AppResult<Vec<Activity>> {
    models.into_iter().map(Activity::try_from).collect()
}

#[async_trait]
impl ActivityRepository for ActivityStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Activity>> {
        Self::visible()
            .filter(activity::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Activity::try_from)
            .transpose()
    }

    async fn list(
        &self,
        query: &ActivityQuery,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Activity>, u64)> {
        let mut select = Self::timeline();

        if let Some(lead_id) = query.lead_id {
            select = select.filter(activity::Column::LeadId.eq(lead_id));
        }
        if let Some(activity_type) = query.activity_type {
            select = select.filter(activity::Column::ActivityType.eq(activity_type.as_str()));
        }

        let paginator = select.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((to_domain(models)?, total))
    }

    async fn list_for_lead(&self, lead_id: i32) -> AppResult<Vec<Activity>> {
        let models = Self::timeline()
            .filter(activity::Column::LeadId.eq(lead_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Activity>> {
        let models = Self::visible()
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn create(&self, new_activity: NewActivity) -> AppResult<Activity> {
        let now = Utc::now();
        let active_model = ActiveModel {
            lead_id: Set(new_activity.lead_id),
            activity_type: Set(new_activity.activity_type.as_str().to_string()),
            title: Set(new_activity.title),
            notes: Set(new_activity.notes),
            date: Set(new_activity.date),
            duration_minutes: Set(new_activity.duration_minutes),
            created_by: Set(new_activity.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Activity::try_from(model)
    }

    async fn update(&self, id: i32, changes: ActivityChanges) -> AppResult<Activity> {
        let mut active: ActiveModel = self.find_model(id).await?.into();

        if let Some(activity_type) = changes.activity_type {
            active.activity_type = Set(activity_type.as_str().to_string());
        }
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(notes) = changes.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(date) = changes.date {
            active.date = Set(date);
        }
        if let Some(duration_minutes) = changes.duration_minutes {
            active.duration_minutes = Set(Some(duration_minutes));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Activity::try_from(model)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let model = self.find_model(id).await?;
        model.delete(&self.db).await?;
        Ok(())
    }
}
