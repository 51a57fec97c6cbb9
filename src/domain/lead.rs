//! Lead domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::activity::ActivityResponse;
use crate::config::{BUDGET_DECIMAL_PLACES, BUDGET_INTEGER_DIGITS, BUDGET_NOT_SPECIFIED};
use crate::errors::{AppError, AppResult};

/// Sales pipeline stage of a lead
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Negotiation,
    Closed,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Negotiation,
        LeadStatus::Closed,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Closed => "closed",
            LeadStatus::Lost => "lost",
        }
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::invalid_field("status", format!("Unknown status '{}'", s)))
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel a lead came in through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Website,
    Referral,
    Zillow,
    #[default]
    Other,
}

impl LeadSource {
    pub const ALL: [LeadSource; 4] = [
        LeadSource::Website,
        LeadSource::Referral,
        LeadSource::Zillow,
        LeadSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::Zillow => "zillow",
            LeadSource::Other => "other",
        }
    }
}

impl FromStr for LeadSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| AppError::invalid_field("source", format!("Unknown source '{}'", s)))
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Soft-delete state of a lead.
///
/// A lead is either live or deleted at a known instant; there is no
/// "inactive but not deleted" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    /// Build from the nullable `deleted_at` column
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted { at },
            None => Lifecycle::Active,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Lifecycle::Deleted { .. })
    }
}

/// Lead domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub property_interest: Option<String>,
    pub lifecycle: Lifecycle,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Human readable budget, e.g. `$100,000 - $200,000`
    pub fn budget_range(&self) -> String {
        match (self.budget_min, self.budget_max) {
            (Some(min), Some(max)) => format!("${} - ${}", format_dollars(min), format_dollars(max)),
            _ => BUDGET_NOT_SPECIFIED.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.lifecycle.is_deleted()
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle.is_deleted()
    }
}

/// Whole dollars with thousands separators
fn format_dollars(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .trunc()
        .to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

// =============================================================================
// Validation helpers
// =============================================================================

/// Trim a required text field, rejecting blank values.
pub fn require_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_field(field, "This field may not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Canonical form used for storage and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Both bounds non-negative and storable as `NUMERIC(12, 2)`, and
/// `min <= max` when both are present.
pub fn check_budget(min: Option<Decimal>, max: Option<Decimal>) -> AppResult<()> {
    if let Some(min) = min {
        check_budget_bound("budget_min", min)?;
    }
    if let Some(max) = max {
        check_budget_bound("budget_max", max)?;
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::invalid_field(
                "budget_min",
                "Minimum budget cannot be greater than maximum budget",
            ));
        }
    }
    Ok(())
}

fn check_budget_bound(field: &str, value: Decimal) -> AppResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::invalid_field(field, "Budget cannot be negative"));
    }
    if value.normalize().scale() > BUDGET_DECIMAL_PLACES {
        return Err(AppError::invalid_field(
            field,
            format!(
                "Ensure that there are no more than {} decimal places",
                BUDGET_DECIMAL_PLACES
            ),
        ));
    }
    if value.abs() >= Decimal::from(10_i64.pow(BUDGET_INTEGER_DIGITS)) {
        return Err(AppError::invalid_field(
            field,
            format!(
                "Ensure that there are no more than {} digits before the decimal point",
                BUDGET_INTEGER_DIGITS
            ),
        ));
    }
    Ok(())
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

fn trimmed_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(|value| value.map(|v| v.trim().to_string()))
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Write models
// =============================================================================

/// Lead creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLead {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Enter a valid email address"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    #[schema(example = "+1 555 0100")]
    pub phone: String,
    #[schema(value_type = Option<String>, example = "100000.00")]
    pub budget_min: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "200000.00")]
    pub budget_max: Option<Decimal>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    #[schema(example = "3 bedroom house near downtown")]
    pub property_interest: Option<String>,
}

/// Lead update data transfer object.
///
/// Lifecycle state is deliberately absent; it is owned by soft delete and restore.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLead {
    #[validate(length(min = 1, max = 100, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    #[schema(value_type = Option<String>)]
    pub budget_min: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub budget_max: Option<Decimal>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub property_interest: Option<String>,
}

/// Validated lead ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub property_interest: Option<String>,
    pub created_by: Option<i32>,
}

impl NewLead {
    /// Validate and normalize a creation request on behalf of `created_by`.
    pub fn from_request(mut input: CreateLead, created_by: Option<i32>) -> AppResult<Self> {
        input.email = input.email.trim().to_string();
        input.validate()?;
        check_budget(input.budget_min, input.budget_max)?;

        Ok(Self {
            first_name: require_text("first_name", &input.first_name)?,
            last_name: require_text("last_name", &input.last_name)?,
            email: normalize_email(&input.email),
            phone: require_text("phone", &input.phone)?,
            budget_min: input.budget_min,
            budget_max: input.budget_max,
            status: input.status.unwrap_or_default(),
            source: input.source.unwrap_or_default(),
            property_interest: normalize_optional(input.property_interest),
            created_by,
        })
    }
}

/// Validated partial update; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub property_interest: Option<String>,
}

impl LeadChanges {
    /// Validate an update request against the current state of the lead.
    ///
    /// Budget ordering is checked on the merged values so that supplying only
    /// one bound still respects the stored other bound.
    pub fn from_request(mut input: UpdateLead, current: &Lead) -> AppResult<Self> {
        input.email = input.email.map(|v| v.trim().to_string());
        input.validate()?;

        if input.budget_min.is_some() || input.budget_max.is_some() {
            check_budget(
                input.budget_min.or(current.budget_min),
                input.budget_max.or(current.budget_max),
            )?;
        }

        Ok(Self {
            first_name: input
                .first_name
                .map(|v| require_text("first_name", &v))
                .transpose()?,
            last_name: input
                .last_name
                .map(|v| require_text("last_name", &v))
                .transpose()?,
            email: input.email.map(|v| normalize_email(&v)),
            phone: input.phone.map(|v| require_text("phone", &v)).transpose()?,
            budget_min: input.budget_min,
            budget_max: input.budget_max,
            status: input.status,
            source: input.source,
            property_interest: input.property_interest.map(|v| v.trim().to_string()),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == LeadChanges::default()
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Sort key accepted by the lead list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadSortField {
    CreatedAt,
    FirstName,
    LastName,
}

/// Lead list ordering, e.g. `-created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadOrdering {
    pub field: LeadSortField,
    pub descending: bool,
}

impl Default for LeadOrdering {
    fn default() -> Self {
        Self {
            field: LeadSortField::CreatedAt,
            descending: true,
        }
    }
}

impl FromStr for LeadOrdering {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let field = match name {
            "created_at" => LeadSortField::CreatedAt,
            "first_name" => LeadSortField::FirstName,
            "last_name" => LeadSortField::LastName,
            other => {
                return Err(AppError::invalid_field(
                    "ordering",
                    format!("Cannot order by '{}'", other),
                ))
            }
        };
        Ok(Self { field, descending })
    }
}

/// Lead list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadQuery {
    pub status: Option<LeadStatus>,
    pub search: Option<String>,
    pub ordering: LeadOrdering,
}

/// Raw query string for `GET /leads`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadListParams {
    /// Exact status match
    pub status: Option<LeadStatus>,
    /// Case-insensitive match on first name, last name or email
    pub search: Option<String>,
    /// `created_at`, `first_name` or `last_name`, prefixed with `-` for descending
    pub ordering: Option<String>,
    /// Page number (1-indexed)
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

impl LeadListParams {
    pub fn to_query(&self) -> AppResult<LeadQuery> {
        let ordering = match self.ordering.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse()?,
            _ => LeadOrdering::default(),
        };

        Ok(LeadQuery {
            status: self.status,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            ordering,
        })
    }
}

// =============================================================================
// Read models
// =============================================================================

/// Full lead representation returned by create, update and restore
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeadResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[schema(value_type = Option<String>)]
    pub budget_min: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub budget_max: Option<Decimal>,
    #[schema(example = "$100,000 - $200,000")]
    pub budget_range: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub property_interest: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            full_name: lead.full_name(),
            budget_range: lead.budget_range(),
            is_active: lead.is_active(),
            is_deleted: lead.is_deleted(),
            deleted_at: lead.lifecycle.deleted_at(),
            id: lead.id,
            first_name: lead.first_name,
            last_name: lead.last_name,
            email: lead.email,
            phone: lead.phone,
            budget_min: lead.budget_min,
            budget_max: lead.budget_max,
            status: lead.status,
            source: lead.source,
            property_interest: lead.property_interest,
            created_by: lead.created_by,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// Compact row for the lead list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeadListItem {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub budget_range: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub created_at: DateTime<Utc>,
}

impl From<Lead> for LeadListItem {
    fn from(lead: Lead) -> Self {
        Self {
            full_name: lead.full_name(),
            budget_range: lead.budget_range(),
            id: lead.id,
            email: lead.email,
            phone: lead.phone,
            status: lead.status,
            source: lead.source,
            created_at: lead.created_at,
        }
    }
}

/// Lead detail with its activity timeline
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeadDetail {
    #[serde(flatten)]
    pub lead: LeadResponse,
    pub activities: Vec<ActivityResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn dec(v: i64) -> Decimal {
        Decimal::from_i64(v).unwrap()
    }

    fn sample_lead() -> Lead {
        let now = Utc::now();
        Lead {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            budget_min: Some(dec(100_000)),
            budget_max: Some(dec(200_000)),
            status: LeadStatus::New,
            source: LeadSource::Other,
            property_interest: None,
            lifecycle: Lifecycle::Active,
            created_by: Some(7),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request() -> CreateLead {
        CreateLead {
            first_name: " Jane ".to_string(),
            last_name: "Doe".to_string(),
            email: "Jane.Doe@Example.com".to_string(),
            phone: "555-0100".to_string(),
            budget_min: Some(dec(100_000)),
            budget_max: Some(dec(200_000)),
            status: None,
            source: None,
            property_interest: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_budget_range_formatting() {
        let lead = sample_lead();
        assert_eq!(lead.budget_range(), "$100,000 - $200,000");
        assert_eq!(lead.full_name(), "Jane Doe");

        let open_ended = Lead {
            budget_max: None,
            ..sample_lead()
        };
        assert_eq!(open_ended.budget_range(), "Not specified");
    }

    #[test]
    fn test_format_dollars_grouping() {
        assert_eq!(format_dollars(dec(0)), "0");
        assert_eq!(format_dollars(dec(999)), "999");
        assert_eq!(format_dollars(dec(1_000)), "1,000");
        assert_eq!(format_dollars(dec(1_234_567)), "1,234,567");
        assert_eq!(format_dollars(Decimal::new(99_950, 2)), "1,000");
    }

    #[test]
    fn test_check_budget() {
        assert!(check_budget(Some(dec(1)), Some(dec(2))).is_ok());
        assert!(check_budget(Some(dec(2)), Some(dec(2))).is_ok());
        assert!(check_budget(None, Some(dec(2))).is_ok());
        assert!(check_budget(Some(dec(0)), None).is_ok());

        let err = check_budget(Some(dec(3)), Some(dec(2))).unwrap_err();
        assert_eq!(err.field(), Some("budget_min"));

        let err = check_budget(None, Some(dec(-1))).unwrap_err();
        assert_eq!(err.field(), Some("budget_max"));
    }

    #[test]
    fn test_check_budget_rejects_extra_decimal_places() {
        let err = check_budget(Some(Decimal::new(1, 3)), None).unwrap_err();
        assert_eq!(err.field(), Some("budget_min"));

        // Trailing zeros still fit two places
        assert!(check_budget(Some(Decimal::new(100_500, 3)), None).is_ok());
        assert!(check_budget(Some(Decimal::new(12_345, 2)), None).is_ok());
    }

    #[test]
    fn test_check_budget_rejects_too_many_digits() {
        let largest = Decimal::new(999_999_999_999, 2);
        assert!(check_budget(None, Some(largest)).is_ok());

        let err = check_budget(None, Some(dec(10_000_000_000))).unwrap_err();
        assert_eq!(err.field(), Some("budget_max"));

        let err = check_budget(None, Some(Decimal::new(99_999_999_999_999_999, 3))).unwrap_err();
        assert_eq!(err.field(), Some("budget_max"));
    }

    #[test]
    fn test_new_lead_rejects_unstorable_budget() {
        let request = CreateLead {
            budget_min: Some(Decimal::new(1, 3)),
            budget_max: None,
            ..create_request()
        };
        let err = NewLead::from_request(request, Some(7)).unwrap_err();
        assert_eq!(err.field(), Some("budget_min"));
    }

    #[test]
    fn test_new_lead_applies_defaults_and_normalizes() {
        let lead = NewLead::from_request(create_request(), Some(7)).unwrap();
        assert_eq!(lead.first_name, "Jane");
        assert_eq!(lead.email, "jane.doe@example.com");
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.source, LeadSource::Other);
        assert_eq!(lead.property_interest, None);
        assert_eq!(lead.created_by, Some(7));
    }

    #[test]
    fn test_new_lead_rejects_bad_email() {
        let input = CreateLead {
            email: "not-an-email".to_string(),
            ..create_request()
        };
        let err = NewLead::from_request(input, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("email")));
    }

    #[test]
    fn test_new_lead_rejects_blank_name() {
        let input = CreateLead {
            last_name: "   ".to_string(),
            ..create_request()
        };
        let err = NewLead::from_request(input, None).unwrap_err();
        assert_eq!(err.field(), Some("last_name"));
    }

    #[test]
    fn test_new_lead_rejects_inverted_budget() {
        let input = CreateLead {
            budget_min: Some(dec(300_000)),
            ..create_request()
        };
        let err = NewLead::from_request(input, None).unwrap_err();
        assert_eq!(err.field(), Some("budget_min"));
    }

    #[test]
    fn test_changes_merge_budget_with_current() {
        let current = sample_lead();

        let lowered_max = UpdateLead {
            budget_max: Some(dec(50_000)),
            ..Default::default()
        };
        assert!(LeadChanges::from_request(lowered_max, &current).is_err());

        let raised_max = UpdateLead {
            budget_max: Some(dec(250_000)),
            ..Default::default()
        };
        let changes = LeadChanges::from_request(raised_max, &current).unwrap();
        assert_eq!(changes.budget_max, Some(dec(250_000)));
        assert_eq!(changes.budget_min, None);
    }

    #[test]
    fn test_empty_changes() {
        let changes = LeadChanges::from_request(UpdateLead::default(), &sample_lead()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_lifecycle_round_trip_through_column() {
        let at = Utc::now();
        assert_eq!(Lifecycle::from_deleted_at(None), Lifecycle::Active);
        let deleted = Lifecycle::from_deleted_at(Some(at));
        assert!(deleted.is_deleted());
        assert_eq!(deleted.deleted_at(), Some(at));
    }

    #[test]
    fn test_response_exposes_lifecycle_flags() {
        let at = Utc::now();
        let lead = Lead {
            lifecycle: Lifecycle::Deleted { at },
            ..sample_lead()
        };
        let response = LeadResponse::from(lead);
        assert!(response.is_deleted);
        assert!(!response.is_active);
        assert_eq!(response.deleted_at, Some(at));
    }

    #[test]
    fn test_ordering_parse() {
        assert_eq!(
            "-created_at".parse::<LeadOrdering>().unwrap(),
            LeadOrdering::default()
        );
        let by_name: LeadOrdering = "last_name".parse().unwrap();
        assert_eq!(by_name.field, LeadSortField::LastName);
        assert!(!by_name.descending);
        assert!("budget".parse::<LeadOrdering>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("negotiation".parse::<LeadStatus>().unwrap(), LeadStatus::Negotiation);
        assert!("won".parse::<LeadStatus>().is_err());
        assert_eq!("zillow".parse::<LeadSource>().unwrap(), LeadSource::Zillow);
    }

    #[test]
    fn test_list_params_trim_search() {
        let params = LeadListParams {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.search, None);
        assert_eq!(query.ordering, LeadOrdering::default());
    }
}
