//! Activity service - interactions logged against live leads.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use super::container::parallel;
use crate::domain::{
    lead_display_name, user_display_name, Activity, ActivityChanges, ActivityInput,
    ActivityQuery, ActivityResponse, Actor, CreateActivity, NewActivity, UpdateActivity,
    UserProfile,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Activity service trait for dependency injection.
///
/// Activities of a soft-deleted lead behave as if they did not exist.
#[async_trait]
pub trait ActivityService: Send + Sync {
    /// Log an activity against `lead_id` on behalf of `actor`
    async fn create_for_lead(
        &self,
        actor: &Actor,
        lead_id: i32,
        input: ActivityInput,
    ) -> AppResult<ActivityResponse>;

    /// Log an activity whose lead is named in the body
    async fn create_activity(
        &self,
        actor: &Actor,
        input: CreateActivity,
    ) -> AppResult<ActivityResponse>;

    /// Filtered page of activities
    async fn list_activities(
        &self,
        query: ActivityQuery,
        page: PaginationParams,
    ) -> AppResult<Paginated<ActivityResponse>>;

    /// Whole timeline of a live lead
    async fn list_for_lead(&self, lead_id: i32) -> AppResult<Vec<ActivityResponse>>;

    /// Single activity
    async fn get_activity(&self, id: i32) -> AppResult<ActivityResponse>;

    /// Partial update; per-type rules apply to the merged activity
    async fn update_activity(&self, id: i32, input: UpdateActivity)
        -> AppResult<ActivityResponse>;

    /// Permanently remove an activity
    async fn delete_activity(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of ActivityService using Unit of Work.
pub struct ActivityManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ActivityManager<U> {
    /// Create new activity service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn describe(&self, activity: Activity) -> AppResult<ActivityResponse> {
        describe_activities(self.uow.as_ref(), vec![activity])
            .await?
            .pop()
            .ok_or_not_found()
    }
}

/// Resolve lead and author names for a batch of activities, keeping their order.
pub(crate) async fn describe_activities(
    uow: &dyn UnitOfWork,
    activities: Vec<Activity>,
) -> AppResult<Vec<ActivityResponse>> {
    if activities.is_empty() {
        return Ok(Vec::new());
    }

    let mut lead_ids: Vec<i32> = activities.iter().map(|a| a.lead_id).collect();
    lead_ids.sort_unstable();
    lead_ids.dedup();
    let mut user_ids: Vec<i32> = activities.iter().map(|a| a.created_by).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let (leads, users) = parallel::join2(
        uow.leads().find_many(lead_ids),
        uow.users().find_many(user_ids),
    )
    .await?;

    let lead_names: HashMap<i32, String> = leads
        .into_iter()
        .map(|lead| (lead.id, lead.full_name()))
        .collect();
    let users: HashMap<i32, UserProfile> =
        users.into_iter().map(|user| (user.id, user)).collect();

    Ok(activities
        .into_iter()
        .map(|activity| {
            let lead_name = lead_display_name(lead_names.get(&activity.lead_id).cloned());
            let created_by_name = user_display_name(users.get(&activity.created_by));
            ActivityResponse::new(activity, lead_name, created_by_name)
        })
        .collect())
}

#[async_trait]
impl<U: UnitOfWork> ActivityService for ActivityManager<U> {
    async fn create_for_lead(
        &self,
        actor: &Actor,
        lead_id: i32,
        input: ActivityInput,
    ) -> AppResult<ActivityResponse> {
        let lead = self.uow.leads().find_by_id(lead_id).await?.ok_or_not_found()?;
        let new_activity = NewActivity::from_request(lead.id, input, actor.id, Utc::now())?;

        self.uow.users().upsert(UserProfile::from(actor)).await?;
        let activity = self.uow.activities().create(new_activity).await?;

        tracing::info!(
            activity_id = activity.id,
            lead_id = lead.id,
            activity_type = %activity.activity_type,
            "Activity logged"
        );

        let created_by_name = user_display_name(Some(&UserProfile::from(actor)));
        Ok(ActivityResponse::new(activity, lead.full_name(), created_by_name))
    }

    async fn create_activity(
        &self,
        actor: &Actor,
        input: CreateActivity,
    ) -> AppResult<ActivityResponse> {
        self.create_for_lead(actor, input.lead, input.details).await
    }

    async fn list_activities(
        &self,
        query: ActivityQuery,
        page: PaginationParams,
    ) -> AppResult<Paginated<ActivityResponse>> {
        let (activities, total) = self.uow.activities().list(&query, &page).await?;
        let data = describe_activities(self.uow.as_ref(), activities).await?;
        Ok(Paginated::new(data, &page, total))
    }

    async fn list_for_lead(&self, lead_id: i32) -> AppResult<Vec<ActivityResponse>> {
        let lead = self.uow.leads().find_by_id(lead_id).await?.ok_or_not_found()?;
        let activities = self.uow.activities().list_for_lead(lead.id).await?;
        describe_activities(self.uow.as_ref(), activities).await
    }

    async fn get_activity(&self, id: i32) -> AppResult<ActivityResponse> {
        let activity = self.uow.activities().find_by_id(id).await?.ok_or_not_found()?;
        self.describe(activity).await
    }

    async fn update_activity(
        &self,
        id: i32,
        input: UpdateActivity,
    ) -> AppResult<ActivityResponse> {
        let current = self.uow.activities().find_by_id(id).await?.ok_or_not_found()?;
        let changes = ActivityChanges::from_request(input, &current)?;

        let activity = if changes == ActivityChanges::default() {
            current
        } else {
            self.uow.activities().update(id, changes).await?
        };
        self.describe(activity).await
    }

    async fn delete_activity(&self, id: i32) -> AppResult<()> {
        self.uow.activities().delete(id).await?;
        tracing::info!(activity_id = id, "Activity deleted");
        Ok(())
    }
}
