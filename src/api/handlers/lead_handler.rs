//! Lead handlers, including the activity timeline nested under a lead.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    ActivityInput, ActivityResponse, CreateLead, LeadDetail, LeadListItem, LeadListParams,
    LeadResponse, UpdateLead,
};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Create lead routes
pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leads).post(create_lead))
        .route(
            "/:id",
            get(get_lead)
                .put(update_lead)
                .patch(update_lead)
                .delete(delete_lead),
        )
        .route("/:id/restore", post(restore_lead))
        .route(
            "/:id/activities",
            get(list_lead_activities).post(create_lead_activity),
        )
}

/// Create a lead
#[utoipa::path(
    post,
    path = "/leads",
    tag = "Leads",
    request_body = CreateLead,
    responses(
        (status = 201, description = "Lead created", body = LeadResponse),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_lead(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateLead>,
) -> AppResult<Created<LeadResponse>> {
    let lead = state
        .lead_service
        .create_lead(current_user.actor(), payload)
        .await?;

    Ok(Created(LeadResponse::from(lead)))
}

/// List live leads
#[utoipa::path(
    get,
    path = "/leads",
    tag = "Leads",
    params(LeadListParams),
    responses(
        (status = 200, description = "Page of leads", body = PaginatedLeads),
        (status = 400, description = "Invalid filter or ordering"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_leads(
    State(state): State<AppState>,
    params: Result<Query<LeadListParams>, QueryRejection>,
) -> AppResult<Json<Paginated<LeadListItem>>> {
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;
    let query = params.to_query()?;
    let page = PaginationParams::new(params.page, params.per_page);

    let leads = state.lead_service.list_leads(query, page).await?;

    Ok(Json(leads.map(LeadListItem::from)))
}

/// Get a lead with its activities
#[utoipa::path(
    get,
    path = "/leads/{id}",
    tag = "Leads",
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead detail", body = LeadDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found or deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LeadDetail>> {
    let lead = state.lead_service.get_lead(id).await?;
    Ok(Json(lead))
}

/// Update a lead (PUT and PATCH both apply partial updates)
#[utoipa::path(
    patch,
    path = "/leads/{id}",
    tag = "Leads",
    params(("id" = i32, Path, description = "Lead ID")),
    request_body = UpdateLead,
    responses(
        (status = 200, description = "Lead updated", body = LeadResponse),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found or deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateLead>,
) -> AppResult<Json<LeadResponse>> {
    let lead = state.lead_service.update_lead(id, payload).await?;
    Ok(Json(LeadResponse::from(lead)))
}

/// Soft delete a lead
#[utoipa::path(
    delete,
    path = "/leads/{id}",
    tag = "Leads",
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 204, description = "Lead deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.lead_service.delete_lead(id).await?;
    Ok(NoContent)
}

/// Restore a soft-deleted lead
#[utoipa::path(
    post,
    path = "/leads/{id}/restore",
    tag = "Leads",
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead restored", body = LeadResponse),
        (status = 400, description = "Email now held by another lead"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found or not deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn restore_lead(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LeadResponse>> {
    let lead = state.lead_service.restore_lead(id).await?;
    Ok(Json(LeadResponse::from(lead)))
}

/// List the activities of a lead
#[utoipa::path(
    get,
    path = "/leads/{id}/activities",
    tag = "Leads",
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Activity timeline", body = [ActivityResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found or deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_lead_activities(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ActivityResponse>>> {
    let activities = state.activity_service.list_for_lead(id).await?;
    Ok(Json(activities))
}

/// Log an activity against a lead
#[utoipa::path(
    post,
    path = "/leads/{id}/activities",
    tag = "Leads",
    params(("id" = i32, Path, description = "Lead ID")),
    request_body = ActivityInput,
    responses(
        (status = 201, description = "Activity logged", body = ActivityResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found or deleted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_lead_activity(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ActivityInput>,
) -> AppResult<Created<ActivityResponse>> {
    let activity = state
        .activity_service
        .create_for_lead(current_user.actor(), id, payload)
        .await?;

    Ok(Created(activity))
}
