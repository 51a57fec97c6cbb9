//! Domain layer - Core business entities and logic
//!
//! Leads, the activities logged against them, the users who log them and
//! the dashboard read model. Validation rules live next to the types they
//! guard so that services and HTTP handlers share a single definition.

pub mod activity;
pub mod dashboard;
pub mod lead;
pub mod user;

pub use activity::{
    check_activity_rules, Activity, ActivityChanges, ActivityInput, ActivityListParams,
    ActivityQuery, ActivityResponse, ActivityType, CreateActivity, NewActivity, UpdateActivity,
};
pub use dashboard::{percentage, status_breakdown, ConversionMetrics, DashboardResponse};
pub use lead::{
    check_budget, normalize_email, CreateLead, Lead, LeadChanges, LeadDetail, LeadListItem,
    LeadListParams, LeadOrdering, LeadQuery, LeadResponse, LeadSortField, LeadSource, LeadStatus,
    Lifecycle, NewLead, UpdateLead,
};
pub use user::{lead_display_name, user_display_name, Actor, UserProfile};
