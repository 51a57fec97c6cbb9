//! Shared fixtures for integration tests: in-memory SQLite and signed tokens.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use lead_tracker::domain::{LeadSource, LeadStatus, NewLead, UserProfile};
use lead_tracker::infra::Migrator;
use lead_tracker::services::Claims;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Fresh, fully migrated in-memory database.
///
/// A single pooled connection keeps every query on the same SQLite memory store.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = SeaDatabase::connect(options)
        .await
        .expect("in-memory sqlite should open");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}

pub fn token_for(user_id: i32, username: &str, first_name: &str, last_name: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token should sign")
}

pub fn profile(id: i32, username: &str) -> UserProfile {
    UserProfile {
        id,
        username: username.to_string(),
        first_name: String::new(),
        last_name: String::new(),
    }
}

pub fn new_lead(first_name: &str, last_name: &str, email: &str) -> NewLead {
    NewLead {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        budget_min: None,
        budget_max: None,
        status: LeadStatus::New,
        source: LeadSource::Other,
        property_interest: None,
        created_by: None,
    }
}
