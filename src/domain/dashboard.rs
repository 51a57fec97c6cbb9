//! Dashboard read model: status distribution and conversion metrics.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::activity::ActivityResponse;
use super::lead::LeadStatus;

/// Conversion ratios over all live leads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ConversionMetrics {
    /// Closed leads as a percentage of all leads
    #[schema(example = 30.0)]
    pub conversion_rate: f64,
    /// Qualified leads as a percentage of all leads
    #[schema(example = 20.0)]
    pub qualification_rate: f64,
    /// Lost leads as a percentage of all leads
    #[schema(example = 10.0)]
    pub lost_rate: f64,
    pub total_leads: u64,
    pub qualified_leads: u64,
    pub closed_leads: u64,
    pub lost_leads: u64,
}

impl ConversionMetrics {
    pub fn from_breakdown(breakdown: &BTreeMap<LeadStatus, u64>) -> Self {
        let count = |status| breakdown.get(&status).copied().unwrap_or(0);
        let total_leads = breakdown.values().sum();
        let qualified_leads = count(LeadStatus::Qualified);
        let closed_leads = count(LeadStatus::Closed);
        let lost_leads = count(LeadStatus::Lost);

        Self {
            conversion_rate: percentage(closed_leads, total_leads),
            qualification_rate: percentage(qualified_leads, total_leads),
            lost_rate: percentage(lost_leads, total_leads),
            total_leads,
            qualified_leads,
            closed_leads,
            lost_leads,
        }
    }
}

/// `part / total * 100` rounded to one decimal place; 0 when `total` is 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}

/// Collapse raw per-status counts, dropping statuses without leads
pub fn status_breakdown(counts: Vec<(LeadStatus, u64)>) -> BTreeMap<LeadStatus, u64> {
    let mut breakdown = BTreeMap::new();
    for (status, count) in counts.into_iter().filter(|(_, count)| *count > 0) {
        *breakdown.entry(status).or_insert(0) += count;
    }
    breakdown
}

/// Payload of `GET /dashboard`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_leads: u64,
    #[schema(value_type = Object)]
    pub leads_by_status: BTreeMap<LeadStatus, u64>,
    pub recent_activities: Vec<ActivityResponse>,
    pub conversion_metrics: ConversionMetrics,
}

impl DashboardResponse {
    pub fn new(
        leads_by_status: BTreeMap<LeadStatus, u64>,
        recent_activities: Vec<ActivityResponse>,
    ) -> Self {
        let conversion_metrics = ConversionMetrics::from_breakdown(&leads_by_status);
        Self {
            total_leads: conversion_metrics.total_leads,
            leads_by_status,
            recent_activities,
            conversion_metrics,
        }
    }
}
