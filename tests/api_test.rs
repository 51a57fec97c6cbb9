//! End-to-end tests for the HTTP API.
//!
//! Each test builds the full router over a fresh in-memory SQLite database
//! and drives it with `tower::ServiceExt::oneshot`.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{setup_db, token_for, JWT_SECRET};
use lead_tracker::api::create_router;
use lead_tracker::infra::Database;
use lead_tracker::{AppState, Config};

struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    async fn new() -> Self {
        let db = setup_db().await;
        let config = Config::new("sqlite::memory:", JWT_SECRET).unwrap();
        let state = AppState::from_config(Arc::new(Database::from_connection(db)), config);

        Self {
            router: create_router(state),
            token: token_for(7, "agent", "Ada", "Agent"),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        read_json(response).await
    }

    async fn create_lead(&self, first_name: &str, email: &str, status: &str) -> Value {
        let (status_code, body) = self
            .send(
                Method::POST,
                "/leads",
                Some(json!({
                    "first_name": first_name,
                    "last_name": "Doe",
                    "email": email,
                    "phone": "555-0100",
                    "status": status,
                })),
            )
            .await;
        assert_eq!(status_code, StatusCode::CREATED, "{}", body);
        body
    }
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Public endpoints and authentication
// =============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_leads_require_token() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/leads").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (status, body) = read_json(response).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new().await;

    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "sub": 7, "username": "agent", "exp": 4_102_444_800i64, "iat": 0 }),
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret-that-is-long-enough"),
    )
    .unwrap();
    let request = Request::get("/dashboard")
        .header(header::AUTHORIZATION, format!("Bearer {}", forged))
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Leads
// =============================================================================

#[tokio::test]
async fn test_create_lead_normalizes_and_describes() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/leads",
            Some(json!({
                "first_name": " Jane ",
                "last_name": "Doe",
                "email": " Jane.Doe@Example.COM ",
                "phone": "555-0100",
                "budget_min": "100000.50",
                "budget_max": "250000.25",
                "source": "website",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["first_name"], "Jane");
    assert_eq!(body["email"], "jane.doe@example.com");
    assert_eq!(body["full_name"], "Jane Doe");
    assert_eq!(body["budget_range"], "$100,000 - $250,000");
    assert_eq!(body["status"], "new");
    assert_eq!(body["source"], "website");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["created_by"], 7);
}

#[tokio::test]
async fn test_create_lead_rejects_inverted_budget() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/leads",
            Some(json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "budget_min": "300000.50",
                "budget_max": "200000.50",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "budget_min");
}

#[tokio::test]
async fn test_create_lead_rejects_unstorable_budget() {
    let app = TestApp::new().await;

    for (field, value) in [("budget_min", "0.001"), ("budget_max", "99999999999999.999")] {
        let mut payload = json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
        });
        payload[field] = json!(value);

        let (status, body) = app.send(Method::POST, "/leads", Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], field);
    }
}

#[tokio::test]
async fn test_duplicate_email_reports_field() {
    let app = TestApp::new().await;
    app.create_lead("Jane", "jane@example.com", "new").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/leads",
            Some(json!({
                "first_name": "Janet",
                "last_name": "Roe",
                "email": "JANE@example.com",
                "phone": "555-0199",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DUPLICATE");
    assert_eq!(body["error"]["field"], "email");
}

#[tokio::test]
async fn test_delete_then_restore_lead() {
    let app = TestApp::new().await;
    let lead = app.create_lead("Jane", "jane@example.com", "new").await;
    let uri = format!("/leads/{}", lead["id"]);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Deleting again is a no-op
    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = app
        .send(Method::POST, &format!("{}/restore", uri), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["is_deleted"], false);
    assert_eq!(body["deleted_at"], Value::Null);

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_restore_live_lead_is_not_found() {
    let app = TestApp::new().await;
    let lead = app.create_lead("Jane", "jane@example.com", "new").await;

    let (status, _) = app
        .send(Method::POST, &format!("/leads/{}/restore", lead["id"]), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recreate_after_delete_blocks_restore() {
    let app = TestApp::new().await;
    let old = app.create_lead("Jane", "jane@example.com", "new").await;
    app.send(Method::DELETE, &format!("/leads/{}", old["id"]), None)
        .await;

    let new = app.create_lead("Jane", "jane@example.com", "contacted").await;
    assert_ne!(old["id"], new["id"]);

    let (status, body) = app
        .send(Method::POST, &format!("/leads/{}/restore", old["id"]), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DUPLICATE");
}

#[tokio::test]
async fn test_patch_lead_updates_only_given_fields() {
    let app = TestApp::new().await;
    let lead = app.create_lead("Jane", "jane@example.com", "new").await;
    let uri = format!("/leads/{}", lead["id"]);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({ "status": "negotiation" })))
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "negotiation");
    assert_eq!(body["email"], "jane@example.com");
}

#[tokio::test]
async fn test_list_leads_filters_and_paginates() {
    let app = TestApp::new().await;
    app.create_lead("Alice", "alice@example.com", "qualified").await;
    app.create_lead("Bob", "bob@example.com", "new").await;
    app.create_lead("Carol", "carol@example.com", "qualified").await;

    let (status, body) = app
        .send(
            Method::GET,
            "/leads?status=qualified&ordering=first_name&per_page=1",
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["total_pages"], 2);
    assert_eq!(body["data"][0]["full_name"], "Alice Doe");

    let (status, body) = app
        .send(Method::GET, "/leads?search=CAROL", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_leads_rejects_unknown_ordering() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::GET, "/leads?ordering=phone", None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "ordering");
}

// =============================================================================
// Activities
// =============================================================================

#[tokio::test]
async fn test_call_requires_duration() {
    let app = TestApp::new().await;
    let lead = app.create_lead("Jane", "jane@example.com", "new").await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/leads/{}/activities", lead["id"]),
            Some(json!({
                "activity_type": "call",
                "title": "Intro call",
                "date": "2024-03-01T10:00:00Z",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "duration_minutes");
}

#[tokio::test]
async fn test_activity_is_attributed_to_caller() {
    let app = TestApp::new().await;
    let lead = app.create_lead("Jane", "jane@example.com", "new").await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/leads/{}/activities", lead["id"]),
            Some(json!({
                "activity_type": "call",
                "title": "Intro call",
                "date": "2024-03-01T10:00:00Z",
                "duration_minutes": 15,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["created_by"], 7);
    assert_eq!(body["created_by_name"], "Ada Agent");
    assert_eq!(body["lead_name"], "Jane Doe");
    assert_eq!(body["activity_type_display"], "Call");

    let (status, detail) = app
        .send(Method::GET, &format!("/leads/{}", lead["id"]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["activities"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_activity_on_deleted_lead_is_not_found() {
    let app = TestApp::new().await;
    let lead = app.create_lead("Jane", "jane@example.com", "new").await;
    app.send(Method::DELETE, &format!("/leads/{}", lead["id"]), None)
        .await;

    let (status, _) = app
        .send(
            Method::POST,
            "/activities",
            Some(json!({
                "lead": lead["id"],
                "activity_type": "note",
                "title": "Follow up",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_counts_live_leads() {
    let app = TestApp::new().await;
    app.create_lead("Alice", "alice@example.com", "closed").await;
    app.create_lead("Bob", "bob@example.com", "qualified").await;
    app.create_lead("Carol", "carol@example.com", "new").await;
    let gone = app.create_lead("Dan", "dan@example.com", "lost").await;
    app.send(Method::DELETE, &format!("/leads/{}", gone["id"]), None)
        .await;

    app.send(
        Method::POST,
        "/activities",
        Some(json!({
            "lead": gone["id"],
            "activity_type": "note",
            "title": "Never stored",
        })),
    )
    .await;

    let (status, body) = app.send(Method::GET, "/dashboard", None).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["total_leads"], 3);
    assert_eq!(body["leads_by_status"]["closed"], 1);
    assert!(body["leads_by_status"].get("lost").is_none());
    assert_eq!(body["conversion_metrics"]["conversion_rate"], 33.3);
    assert_eq!(body["conversion_metrics"]["qualification_rate"], 33.3);
    assert_eq!(body["conversion_metrics"]["lost_rate"], 0.0);
    assert!(body["recent_activities"].as_array().unwrap().is_empty());
}
