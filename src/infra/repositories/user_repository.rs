//! User repository: local copies of identity-provider users.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::UserProfile;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user or refresh its names from the latest token
    async fn upsert(&self, profile: UserProfile) -> AppResult<()>;

    /// Profiles for the given IDs; unknown IDs are skipped
    async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<UserProfile>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn upsert(&self, profile: UserProfile) -> AppResult<()> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(profile.id),
            username: Set(profile.username),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        UserEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::Id)
                    .update_columns([
                        user::Column::Username,
                        user::Column::FirstName,
                        user::Column::LastName,
                        user::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(UserProfile::from).collect())
    }
}
