//! Shared fixtures for the integration tests.
//!
//! Tests run against `sea_orm::MockDatabase`, so each test appends the
//! query results its handler will consume, in handler order. Notification
//! services stay unconfigured unless a test opts in.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use bodyshop_backend::config::AppConfig;
use bodyshop_backend::entities::{appointment_photos, appointments, staff_users};
use bodyshop_backend::services::{email::EmailService, sms::SmsService};
use bodyshop_backend::AppState;

pub const STAFF_KEY: &str = "test-staff-key";
pub const STAFF_AUTH_ID: &str = "auth0|64f1";

/// With sea-orm's `mock` feature on, `DatabaseConnection` has no `Clone`
/// impl, so tests resolve `db.clone()` through this trait instead. The
/// duplicate shares the mock connection's `Arc`, so queries issued through
/// either handle land in the same transaction log.
pub trait CloneConnection {
    fn clone(&self) -> DatabaseConnection;
}

impl CloneConnection for DatabaseConnection {
    fn clone(&self) -> DatabaseConnection {
        match self {
            DatabaseConnection::MockDatabaseConnection(conn) => {
                DatabaseConnection::MockDatabaseConnection(Arc::clone(conn))
            }
            _ => panic!("tests only clone mock connections"),
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        staff_api_key: Some(STAFF_KEY.to_string()),
        sms: None,
        email: None,
    }
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    test_state_with_config(db, test_config())
}

pub fn test_state_with_config(db: DatabaseConnection, config: AppConfig) -> AppState {
    AppState {
        db,
        sms: SmsService::new(config.sms.clone()),
        email: EmailService::new(config.email.clone()),
        config,
    }
}

pub fn fixed_time() -> DateTimeWithTimeZone {
    chrono::DateTime::parse_from_rfc3339("2026-04-01T12:00:00+00:00").unwrap()
}

pub fn appointment_fixture(id: i32) -> appointments::Model {
    appointments::Model {
        id,
        customer_name: "John Smith".to_string(),
        customer_phone: "2164818696".to_string(),
        customer_email: Some("john@example.com".to_string()),
        service_type: "schedule".to_string(),
        vehicle_info: Some("2019 Honda Civic".to_string()),
        preferred_date: "2026-09-01".to_string(),
        preferred_time: "09:30".to_string(),
        message: Some("Vehicle: 2019 Honda Civic\nRequested: 2026-09-01 at 09:30".to_string()),
        status: "pending".to_string(),
        staff_notes: None,
        archived_at: None,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

// Only the admin tests authenticate; the intake test crate never touches
// these.
#[allow(dead_code)]
pub fn staff_fixture() -> staff_users::Model {
    staff_users::Model {
        id: 1,
        auth_id: STAFF_AUTH_ID.to_string(),
        email: "jane@shop.com".to_string(),
        display_name: "Jane Smith".to_string(),
        role: "staff".to_string(),
        active: true,
        created_at: fixed_time(),
    }
}

pub fn photo_fixture(id: i32, appointment_id: i32) -> appointment_photos::Model {
    appointment_photos::Model {
        id,
        appointment_id,
        storage_url: format!("https://storage.example.com/damage/{}.jpg", id),
        caption: Some("passenger door".to_string()),
        uploaded_by: Some("Jane Smith".to_string()),
        created_at: fixed_time(),
    }
}

#[allow(dead_code)]
pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// JSON request carrying valid staff headers.
#[allow(dead_code)]
pub fn staff_json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-staff-key", STAFF_KEY)
        .header("x-staff-id", STAFF_AUTH_ID)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn staff_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-staff-key", STAFF_KEY)
        .header("x-staff-id", STAFF_AUTH_ID)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
