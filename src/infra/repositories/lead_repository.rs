//! Lead repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::entities::lead::{self, ActiveModel, Entity as LeadEntity};
use crate::domain::{Lead, LeadChanges, LeadQuery, LeadSortField, LeadStatus, NewLead};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Lead repository trait for dependency injection.
///
/// By default, all query methods exclude soft-deleted leads.
/// Use `*_with_deleted` variants to include them.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Find live lead by ID (excludes soft-deleted)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Lead>>;

    /// Find lead by ID including soft-deleted
    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Lead>>;

    /// Find live leads among the given IDs
    async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<Lead>>;

    /// Filtered, ordered page of live leads plus the total match count
    async fn list(&self, query: &LeadQuery, page: &PaginationParams) -> AppResult<(Vec<Lead>, u64)>;

    /// Insert a lead; an email held by another live lead yields `Duplicate`
    async fn create(&self, lead: NewLead) -> AppResult<Lead>;

    /// Apply changes to a live lead
    async fn update(&self, id: i32, changes: LeadChanges) -> AppResult<Lead>;

    /// Mark a live lead deleted; returns false when no live lead matched
    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> AppResult<bool>;

    /// Bring a soft-deleted lead back; the email is re-checked by the store
    async fn restore(&self, id: i32) -> AppResult<Lead>;

    /// Number of live leads per status (statuses without leads are absent)
    async fn count_by_status(&self) -> AppResult<Vec<(LeadStatus, u64)>>;
}

/// Concrete implementation of LeadRepository with soft delete
pub struct LeadStore {
    db: DatabaseConnection,
}

impl LeadStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<LeadEntity> {
        LeadEntity::find().filter(lead::Column::DeletedAt.is_null())
    }
}

fn to_domain(models: Vec<lead::Model>) -> AppResult<Vec<Lead>> {
    models.into_iter().map(Lead::try_from).collect()
}

/// `LIKE` metacharacters in user input match literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    [
        lead::Column::FirstName,
        lead::Column::LastName,
        lead::Column::Email,
    ]
    .into_iter()
    .fold(Condition::any(), |condition, column| {
        let like = LikeExpr::new(pattern.clone()).escape('\\');
        condition.add(Expr::expr(Func::lower(Expr::col(column))).like(like))
    })
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: String,
    count: i64,
}

#[async_trait]
impl LeadRepository for LeadStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Lead>> {
        Self::live()
            .filter(lead::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Lead::try_from)
            .transpose()
    }

    async fn find_by_id_with_deleted(&self, id: i32) -> AppResult<Option<Lead>> {
        LeadEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Lead::try_from)
            .transpose()
    }

    async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<Lead>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Self::live()
            .filter(lead::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        to_domain(models)
    }

    async fn list(&self, query: &LeadQuery, page: &PaginationParams) -> AppResult<(Vec<Lead>, u64)> {
        let mut select = Self::live();

        if let Some(status) = query.status {
            select = select.filter(lead::Column::Status.eq(status.as_str()));
        }
        if let Some(term) = query.search.as_deref() {
            select = select.filter(search_condition(term));
        }

        let direction = if query.ordering.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        let column = match query.ordering.field {
            LeadSortField::CreatedAt => lead::Column::CreatedAt,
            LeadSortField::FirstName => lead::Column::FirstName,
            LeadSortField::LastName => lead::Column::LastName,
        };
        select = select
            .order_by(column, direction.clone())
            .order_by(lead::Column::Id, direction);

        let paginator = select.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((to_domain(models)?, total))
    }

    async fn create(&self, new_lead: NewLead) -> AppResult<Lead> {
        let now = Utc::now();
        let email = new_lead.email.clone();
        let active_model = ActiveModel {
            first_name: Set(new_lead.first_name),
            last_name: Set(new_lead.last_name),
            email: Set(new_lead.email),
            phone: Set(new_lead.phone),
            budget_min: Set(new_lead.budget_min),
            budget_max: Set(new_lead.budget_max),
            status: Set(new_lead.status.as_str().to_string()),
            source: Set(new_lead.source.as_str().to_string()),
            property_interest: Set(new_lead.property_interest),
            created_by: Set(new_lead.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "email", &email))?;

        Lead::try_from(model)
    }

    async fn update(&self, id: i32, changes: LeadChanges) -> AppResult<Lead> {
        let mut active = ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = changes.email.clone() {
            active.email = Set(email);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(budget_min) = changes.budget_min {
            active.budget_min = Set(Some(budget_min));
        }
        if let Some(budget_max) = changes.budget_max {
            active.budget_max = Set(Some(budget_max));
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(source) = changes.source {
            active.source = Set(source.as_str().to_string());
        }
        if let Some(property_interest) = changes.property_interest {
            active.property_interest =
                Set(Some(property_interest).filter(|text| !text.is_empty()));
        }

        // Only live leads can be edited; the filter is part of the write itself
        let email = changes.email.unwrap_or_default();
        let result = LeadEntity::update_many()
            .set(active)
            .filter(lead::Column::Id.eq(id))
            .filter(lead::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "email", &email))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        LeadEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
            .and_then(Lead::try_from)
    }

    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> AppResult<bool> {
        // Conditional update so a concurrent delete cannot overwrite deleted_at
        let result = LeadEntity::update_many()
            .col_expr(lead::Column::DeletedAt, Expr::value(Some(at)))
            .col_expr(lead::Column::UpdatedAt, Expr::value(at))
            .filter(lead::Column::Id.eq(id))
            .filter(lead::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn restore(&self, id: i32) -> AppResult<Lead> {
        let deleted = LeadEntity::find_by_id(id)
            .filter(lead::Column::DeletedAt.is_not_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let email = deleted.email.clone();
        let mut active: ActiveModel = deleted.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Utc::now());

        // The partial unique index rejects the row if another live lead took the email
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "email", &email))?;

        Lead::try_from(model)
    }

    async fn count_by_status(&self) -> AppResult<Vec<(LeadStatus, u64)>> {
        let rows = Self::live()
            .select_only()
            .column(lead::Column::Status)
            .column_as(lead::Column::Id.count(), "count")
            .group_by(lead::Column::Status)
            .into_model::<StatusCount>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter()
            .map(|row| {
                let status = row.status.parse::<LeadStatus>().map_err(|_| {
                    AppError::internal(format!("unknown lead status {}", row.status))
                })?;
                Ok((status, u64::try_from(row.count).unwrap_or_default()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("jane"), "jane");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_i"), "a\\_i");
        assert_eq!(escape_like("c:\\dir"), "c:\\\\dir");
    }
}
