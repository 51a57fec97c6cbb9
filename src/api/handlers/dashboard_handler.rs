//! Dashboard handler.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::DashboardResponse;
use crate::errors::AppResult;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

/// Lead counts, conversion rates and the latest activities
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardResponse>> {
    let dashboard = state.dashboard_service.compute().await?;
    Ok(Json(dashboard))
}
