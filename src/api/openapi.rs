//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{activity_handler, dashboard_handler, lead_handler};
use crate::domain::{
    ActivityInput, ActivityResponse, ActivityType, ConversionMetrics, CreateActivity, CreateLead,
    DashboardResponse, LeadDetail, LeadListItem, LeadResponse, LeadSource, LeadStatus,
    UpdateActivity, UpdateLead,
};
use crate::types::{PaginatedActivities, PaginatedLeads, PaginationMeta};

/// OpenAPI documentation for the Lead Tracker API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lead Tracker API",
        version = "0.1.0",
        description = "Real-estate leads, the activities logged against them, and conversion metrics"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Lead endpoints
        lead_handler::create_lead,
        lead_handler::list_leads,
        lead_handler::get_lead,
        lead_handler::update_lead,
        lead_handler::delete_lead,
        lead_handler::restore_lead,
        lead_handler::list_lead_activities,
        lead_handler::create_lead_activity,
        // Activity endpoints
        activity_handler::list_activities,
        activity_handler::create_activity,
        activity_handler::get_activity,
        activity_handler::update_activity,
        activity_handler::delete_activity,
        // Dashboard
        dashboard_handler::get_dashboard,
    ),
    components(
        schemas(
            LeadStatus,
            LeadSource,
            CreateLead,
            UpdateLead,
            LeadResponse,
            LeadListItem,
            LeadDetail,
            ActivityType,
            ActivityInput,
            CreateActivity,
            UpdateActivity,
            ActivityResponse,
            ConversionMetrics,
            DashboardResponse,
            PaginationMeta,
            PaginatedLeads,
            PaginatedActivities,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leads", description = "Lead lifecycle: create, update, soft delete and restore"),
        (name = "Activities", description = "Calls, emails, meetings and notes logged against leads"),
        (name = "Dashboard", description = "Conversion metrics and recent activity")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
