//! Mock-backed Unit of Work and fixtures shared by service tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Activity, ActivityType, Actor, Lead, LeadSource, LeadStatus, Lifecycle};
use crate::infra::{
    ActivityRepository, LeadRepository, MockActivityRepository, MockLeadRepository,
    MockUserRepository, UnitOfWork, UserRepository,
};

/// Unit of Work whose repositories are configured mocks
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    leads: Arc<MockLeadRepository>,
    activities: Arc<MockActivityRepository>,
}

impl TestUnitOfWork {
    pub fn new(
        users: MockUserRepository,
        leads: MockLeadRepository,
        activities: MockActivityRepository,
    ) -> Arc<Self> {
        Arc::new(Self {
            users: Arc::new(users),
            leads: Arc::new(leads),
            activities: Arc::new(activities),
        })
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn leads(&self) -> Arc<dyn LeadRepository> {
        self.leads.clone()
    }

    fn activities(&self) -> Arc<dyn ActivityRepository> {
        self.activities.clone()
    }
}

pub fn timestamp(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

pub fn actor() -> Actor {
    Actor::new(7, "agent").with_name("Ada", "Agent")
}

pub fn lead(id: i32) -> Lead {
    Lead {
        id,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: format!("jane{}@example.com", id),
        phone: "555-0100".to_string(),
        budget_min: None,
        budget_max: None,
        status: LeadStatus::New,
        source: LeadSource::Other,
        property_interest: None,
        lifecycle: Lifecycle::Active,
        created_by: Some(7),
        created_at: timestamp(9),
        updated_at: timestamp(9),
    }
}

pub fn activity(id: i32, lead_id: i32) -> Activity {
    Activity {
        id,
        lead_id,
        activity_type: ActivityType::Note,
        title: "Left a voicemail".to_string(),
        notes: None,
        date: timestamp(10),
        duration_minutes: None,
        created_by: 7,
        created_at: timestamp(10),
        updated_at: timestamp(10),
    }
}
