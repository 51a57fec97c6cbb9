//! Lead lifecycle service - create, read, update, soft delete and restore.
//!
//! Email uniqueness among live leads is enforced by the store; this service
//! never checks it with a read before writing.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use super::activity_service::describe_activities;
use crate::domain::{
    Actor, CreateLead, Lead, LeadChanges, LeadDetail, LeadQuery, LeadResponse, NewLead,
    UpdateLead, UserProfile,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Lead service trait for dependency injection.
///
/// Soft-deleted leads are invisible to every read and update path;
/// only `restore_lead` reaches them.
#[async_trait]
pub trait LeadService: Send + Sync {
    /// Create a lead on behalf of `actor`
    async fn create_lead(&self, actor: &Actor, input: CreateLead) -> AppResult<Lead>;

    /// Live lead with its activity timeline
    async fn get_lead(&self, id: i32) -> AppResult<LeadDetail>;

    /// Filtered page of live leads
    async fn list_leads(&self, query: LeadQuery, page: PaginationParams)
        -> AppResult<Paginated<Lead>>;

    /// Partial update of a live lead
    async fn update_lead(&self, id: i32, input: UpdateLead) -> AppResult<Lead>;

    /// Soft delete; deleting an already deleted lead is a no-op
    async fn delete_lead(&self, id: i32) -> AppResult<()>;

    /// Undo a soft delete
    async fn restore_lead(&self, id: i32) -> AppResult<Lead>;
}

/// Concrete implementation of LeadService using Unit of Work.
pub struct LeadManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LeadManager<U> {
    /// Create new lead service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn live_lead(&self, id: i32) -> AppResult<Lead> {
        self.uow.leads().find_by_id(id).await?.ok_or_not_found()
    }
}

fn log_duplicate(result: &AppResult<Lead>, context: &str) {
    if let Err(AppError::Duplicate { field, value }) = result {
        tracing::warn!(field = %field, value = %value, "Lead {} rejected: duplicate", context);
    }
}

#[async_trait]
impl<U: UnitOfWork> LeadService for LeadManager<U> {
    async fn create_lead(&self, actor: &Actor, input: CreateLead) -> AppResult<Lead> {
        let new_lead = NewLead::from_request(input, Some(actor.id))?;

        self.uow.users().upsert(UserProfile::from(actor)).await?;

        let result = self.uow.leads().create(new_lead).await;
        log_duplicate(&result, "create");
        let lead = result?;

        tracing::info!(lead_id = lead.id, created_by = actor.id, "Lead created");
        Ok(lead)
    }

    async fn get_lead(&self, id: i32) -> AppResult<LeadDetail> {
        let lead = self.live_lead(id).await?;
        let activities = self.uow.activities().list_for_lead(lead.id).await?;
        let activities = describe_activities(self.uow.as_ref(), activities).await?;

        Ok(LeadDetail {
            lead: LeadResponse::from(lead),
            activities,
        })
    }

    async fn list_leads(
        &self,
        query: LeadQuery,
        page: PaginationParams,
    ) -> AppResult<Paginated<Lead>> {
        let (leads, total) = self.uow.leads().list(&query, &page).await?;
        Ok(Paginated::new(leads, &page, total))
    }

    async fn update_lead(&self, id: i32, input: UpdateLead) -> AppResult<Lead> {
        let current = self.live_lead(id).await?;
        let changes = LeadChanges::from_request(input, &current)?;

        if changes.is_empty() {
            return Ok(current);
        }

        let result = self.uow.leads().update(id, changes).await;
        log_duplicate(&result, "update");
        result
    }

    async fn delete_lead(&self, id: i32) -> AppResult<()> {
        let lead = self
            .uow
            .leads()
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_not_found()?;

        if lead.is_deleted() {
            tracing::debug!(lead_id = id, "Lead already deleted");
            return Ok(());
        }

        if self.uow.leads().soft_delete(id, Utc::now()).await? {
            tracing::info!(lead_id = id, "Lead soft-deleted");
        }
        Ok(())
    }

    async fn restore_lead(&self, id: i32) -> AppResult<Lead> {
        let result = self.uow.leads().restore(id).await;
        log_duplicate(&result, "restore");
        let lead = result?;

        tracing::info!(lead_id = id, "Lead restored");
        Ok(lead)
    }
}
