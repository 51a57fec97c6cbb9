//! Activity handlers for the flat `/activities` collection.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{ActivityListParams, ActivityResponse, CreateActivity, UpdateActivity};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Create activity routes
pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .route(
            "/:id",
            get(get_activity)
                .put(update_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
}

/// List activities
#[utoipa::path(
    get,
    path = "/activities",
    tag = "Activities",
    params(ActivityListParams),
    responses(
        (status = 200, description = "Page of activities", body = PaginatedActivities),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_activities(
    State(state): State<AppState>,
    params: Result<Query<ActivityListParams>, QueryRejection>,
) -> AppResult<Json<Paginated<ActivityResponse>>> {
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;
    let page = PaginationParams::new(params.page, params.per_page);

    let activities = state
        .activity_service
        .list_activities(params.to_query(), page)
        .await?;

    Ok(Json(activities))
}

/// Log an activity; the lead is named in the body
#[utoipa::path(
    post,
    path = "/activities",
    tag = "Activities",
    request_body = CreateActivity,
    responses(
        (status = 201, description = "Activity logged", body = ActivityResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found or deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_activity(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateActivity>,
) -> AppResult<Created<ActivityResponse>> {
    let activity = state
        .activity_service
        .create_activity(current_user.actor(), payload)
        .await?;

    Ok(Created(activity))
}

/// Get an activity
#[utoipa::path(
    get,
    path = "/activities/{id}",
    tag = "Activities",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity", body = ActivityResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Activity not found or its lead is deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ActivityResponse>> {
    let activity = state.activity_service.get_activity(id).await?;
    Ok(Json(activity))
}

/// Update an activity (PUT and PATCH both apply partial updates)
#[utoipa::path(
    patch,
    path = "/activities/{id}",
    tag = "Activities",
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = UpdateActivity,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Activity not found or its lead is deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateActivity>,
) -> AppResult<Json<ActivityResponse>> {
    let activity = state.activity_service.update_activity(id, payload).await?;
    Ok(Json(activity))
}

/// Delete an activity
#[utoipa::path(
    delete,
    path = "/activities/{id}",
    tag = "Activities",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Activity not found or its lead is deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.activity_service.delete_activity(id).await?;
    Ok(NoContent)
}
