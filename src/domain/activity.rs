//! Activity domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::lead::require_text;
use crate::errors::{AppError, AppResult};

/// Kind of interaction logged against a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Note,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Call,
        ActivityType::Email,
        ActivityType::Meeting,
        ActivityType::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Call => "call",
            ActivityType::Email => "email",
            ActivityType::Meeting => "meeting",
            ActivityType::Note => "note",
        }
    }

    /// Label shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityType::Call => "Call",
            ActivityType::Email => "Email",
            ActivityType::Meeting => "Meeting",
            ActivityType::Note => "Note",
        }
    }

    /// Calls must record when they happened and how long they took
    pub fn requires_schedule(&self) -> bool {
        matches!(self, ActivityType::Call)
    }
}

impl FromStr for ActivityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_field("activity_type", format!("Unknown activity type '{}'", s))
            })
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i32,
    pub lead_id: i32,
    pub activity_type: ActivityType,
    pub title: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-type field requirements.
///
/// `date_supplied` is whether the caller provided a date; stored activities
/// always have one.
pub fn check_activity_rules(
    activity_type: ActivityType,
    date_supplied: bool,
    duration_minutes: Option<i32>,
) -> AppResult<()> {
    if duration_minutes.is_some_and(|d| d <= 0) {
        return Err(AppError::invalid_field(
            "duration_minutes",
            "Duration must be a positive number of minutes",
        ));
    }
    if activity_type.requires_schedule() {
        if !date_supplied {
            return Err(AppError::invalid_field("date", "Date is required for calls"));
        }
        if duration_minutes.is_none() {
            return Err(AppError::invalid_field(
                "duration_minutes",
                "Duration is required for calls",
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Write models
// =============================================================================

/// Activity fields as posted to `/leads/{id}/activities`.
///
/// There is no creator field: the author is always the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ActivityInput {
    pub activity_type: ActivityType,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    #[schema(example = "Intro call")]
    pub title: String,
    pub notes: Option<String>,
    /// Defaults to the time of submission
    pub date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Duration must be a positive number of minutes"))]
    #[schema(example = 30)]
    pub duration_minutes: Option<i32>,
}

/// Activity creation body for the flat `/activities` endpoint
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateActivity {
    #[schema(example = 1)]
    pub lead: i32,
    #[serde(flatten)]
    #[validate(nested)]
    pub details: ActivityInput,
}

/// Activity update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateActivity {
    pub activity_type: Option<ActivityType>,
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub notes: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Duration must be a positive number of minutes"))]
    pub duration_minutes: Option<i32>,
}

/// Validated activity ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub lead_id: i32,
    pub activity_type: ActivityType,
    pub title: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub created_by: i32,
}

impl NewActivity {
    /// Validate a creation request; `now` fills in a missing date.
    pub fn from_request(
        lead_id: i32,
        input: ActivityInput,
        created_by: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        input.validate()?;
        check_activity_rules(
            input.activity_type,
            input.date.is_some(),
            input.duration_minutes,
        )?;

        Ok(Self {
            lead_id,
            activity_type: input.activity_type,
            title: require_text("title", &input.title)?,
            notes: input.notes,
            date: input.date.unwrap_or(now),
            duration_minutes: input.duration_minutes,
            created_by,
        })
    }
}

/// Validated partial update; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityChanges {
    pub activity_type: Option<ActivityType>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}

impl ActivityChanges {
    /// Validate an update against the stored activity.
    ///
    /// The per-type rule is applied to the merged result, so turning a note
    /// into a call requires a duration to be present afterwards.
    pub fn from_request(input: UpdateActivity, current: &Activity) -> AppResult<Self> {
        input.validate()?;

        let merged_type = input.activity_type.unwrap_or(current.activity_type);
        let merged_duration = input.duration_minutes.or(current.duration_minutes);
        check_activity_rules(merged_type, true, merged_duration)?;

        Ok(Self {
            activity_type: input.activity_type,
            title: input.title.map(|v| require_text("title", &v)).transpose()?,
            notes: input.notes,
            date: input.date,
            duration_minutes: input.duration_minutes,
        })
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Activity list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityQuery {
    pub lead_id: Option<i32>,
    pub activity_type: Option<ActivityType>,
}

/// Raw query string for `GET /activities`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityListParams {
    /// Only activities of this lead
    pub lead: Option<i32>,
    /// Only activities of this type
    pub activity_type: Option<ActivityType>,
    /// Page number (1-indexed)
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

impl ActivityListParams {
    pub fn to_query(&self) -> ActivityQuery {
        ActivityQuery {
            lead_id: self.lead,
            activity_type: self.activity_type,
        }
    }
}

// =============================================================================
// Read models
// =============================================================================

/// Activity with lead and author names resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub lead: i32,
    #[schema(example = "Jane Doe")]
    pub lead_name: String,
    pub activity_type: ActivityType,
    #[schema(example = "Call")]
    pub activity_type_display: String,
    pub title: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub created_by: i32,
    #[schema(example = "John Agent")]
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivityResponse {
    pub fn new(activity: Activity, lead_name: String, created_by_name: String) -> Self {
        Self {
            id: activity.id,
            lead: activity.lead_id,
            lead_name,
            activity_type_display: activity.activity_type.display_name().to_string(),
            activity_type: activity.activity_type,
            title: activity.title,
            notes: activity.notes,
            date: activity.date,
            duration_minutes: activity.duration_minutes,
            created_by: activity.created_by,
            created_by_name,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(activity_type: ActivityType) -> ActivityInput {
        ActivityInput {
            activity_type,
            title: "Follow up".to_string(),
            notes: None,
            date: None,
            duration_minutes: None,
        }
    }

    fn stored(activity_type: ActivityType, duration_minutes: Option<i32>) -> Activity {
        let now = Utc::now();
        Activity {
            id: 1,
            lead_id: 1,
            activity_type,
            title: "Follow up".to_string(),
            notes: None,
            date: now,
            duration_minutes,
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_note_defaults_date_to_now() {
        let now = Utc::now();
        let activity = NewActivity::from_request(3, input(ActivityType::Note), 9, now).unwrap();
        assert_eq!(activity.date, now);
        assert_eq!(activity.lead_id, 3);
        assert_eq!(activity.created_by, 9);
        assert_eq!(activity.duration_minutes, None);
    }

    #[test]
    fn test_call_requires_duration() {
        let call = ActivityInput {
            date: Some(Utc::now()),
            ..input(ActivityType::Call)
        };
        let err = NewActivity::from_request(1, call, 1, Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("duration_minutes"));
    }

    #[test]
    fn test_call_requires_date() {
        let call = ActivityInput {
            duration_minutes: Some(15),
            ..input(ActivityType::Call)
        };
        let err = NewActivity::from_request(1, call, 1, Utc::now()).unwrap_err();
        assert_eq!(err.field(), Some("date"));
    }

    #[test]
    fn test_complete_call_accepted() {
        let date = Utc::now();
        let call = ActivityInput {
            date: Some(date),
            duration_minutes: Some(15),
            ..input(ActivityType::Call)
        };
        let activity = NewActivity::from_request(1, call, 1, Utc::now()).unwrap();
        assert_eq!(activity.date, date);
        assert_eq!(activity.duration_minutes, Some(15));
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        assert!(check_activity_rules(ActivityType::Meeting, false, Some(0)).is_err());
        assert!(check_activity_rules(ActivityType::Meeting, false, Some(45)).is_ok());
    }

    #[test]
    fn test_update_to_call_needs_duration() {
        let note = stored(ActivityType::Note, None);
        let to_call = UpdateActivity {
            activity_type: Some(ActivityType::Call),
            ..Default::default()
        };
        let err = ActivityChanges::from_request(to_call, &note).unwrap_err();
        assert_eq!(err.field(), Some("duration_minutes"));

        let to_call_with_duration = UpdateActivity {
            activity_type: Some(ActivityType::Call),
            duration_minutes: Some(20),
            ..Default::default()
        };
        assert!(ActivityChanges::from_request(to_call_with_duration, &note).is_ok());
    }

    #[test]
    fn test_update_call_keeps_existing_duration() {
        let call = stored(ActivityType::Call, Some(10));
        let retitle = UpdateActivity {
            title: Some("Second call".to_string()),
            ..Default::default()
        };
        let changes = ActivityChanges::from_request(retitle, &call).unwrap();
        assert_eq!(changes.title.as_deref(), Some("Second call"));
    }

    #[test]
    fn test_response_display_label() {
        let response = ActivityResponse::new(
            stored(ActivityType::Meeting, Some(60)),
            "Jane Doe".to_string(),
            "agent".to_string(),
        );
        assert_eq!(response.activity_type_display, "Meeting");
        assert_eq!(response.lead, 1);
    }

    #[test]
    fn test_flat_create_body_deserializes() {
        let body = r#"{"lead": 4, "activity_type": "note", "title": "Left voicemail"}"#;
        let parsed: CreateActivity = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.lead, 4);
        assert_eq!(parsed.details.activity_type, ActivityType::Note);
        assert!(parsed.details.date.is_none());
    }
}
