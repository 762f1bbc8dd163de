mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use tower::ServiceExt;

use bodyshop_backend::build_router;
use bodyshop_backend::entities::{appointments, staff_users};

use crate::common::{
    appointment_fixture, fixed_time, photo_fixture, response_json, staff_fixture, staff_get,
    staff_json_request, test_config, test_state, test_state_with_config, CloneConnection,
    STAFF_KEY,
};

fn archived(mut record: appointments::Model) -> appointments::Model {
    record.archived_at = Some(fixed_time());
    record
}

fn with_status(mut record: appointments::Model, status: &str) -> appointments::Model {
    record.status = status.to_string();
    record
}

#[tokio::test]
async fn test_admin_rejects_missing_key() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_router(test_state(db));

    let request = Request::builder()
        .uri("/api/admin/appointments")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_rejects_wrong_key() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_router(test_state(db));

    let request = Request::builder()
        .uri("/api/admin/appointments")
        .header("x-staff-key", "not-the-key")
        .header("x-staff-id", "auth0|64f1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_rejects_missing_staff_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_router(test_state(db));

    let request = Request::builder()
        .uri("/api/admin/appointments")
        .header("x-staff-key", STAFF_KEY)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_json(response).await;
    assert_eq!(body["code"], "UNKNOWN_STAFF");
}

#[tokio::test]
async fn test_admin_rejects_unknown_staff_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<staff_users::Model>::new()])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_get("/api/admin/appointments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response_json(response).await;
    assert_eq!(body["code"], "UNKNOWN_STAFF");

    // The lookup only accepts active accounts
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("active"));
}

#[tokio::test]
async fn test_admin_errors_when_key_unconfigured() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let mut config = test_config();
    config.staff_api_key = None;
    let app = build_router(test_state_with_config(db, config));

    let response = app
        .oneshot(staff_get("/api/admin/appointments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["code"], "CONFIG_ERROR");
}

#[tokio::test]
async fn test_list_appointments_includes_staff_fields() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(1), appointment_fixture(2)]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_get("/api/admin/appointments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    // Staff view carries the fields the public form hides
    assert!(records[0].get("staff_notes").is_some());
    assert!(records[0].get("archived_at").is_some());

    // Default view excludes archived records
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("archived_at"));
    assert!(log.contains("IS NULL"));
}

#[tokio::test]
async fn test_list_appointments_archived_view() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![archived(appointment_fixture(3))]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_get("/api/admin/appointments?view=archived"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body.as_array().unwrap()[0]["archived_at"].is_string());

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("IS NOT NULL"));
}

#[tokio::test]
async fn test_list_appointments_search_and_status_filter() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([Vec::<appointments::Model>::new()])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_get(
            "/api/admin/appointments?search=John&status=pending",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("LOWER"));
    assert!(log.contains("%john%"));
    assert!(log.contains("pending"));
}

#[tokio::test]
async fn test_list_appointments_rejects_bad_status() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_get("/api/admin/appointments?status=done"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn test_get_appointment_detail_with_photos() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(42)]])
        .append_query_results([vec![photo_fixture(5, 42)]])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_get("/api/admin/appointments/42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], 42);
    assert!(body.get("staff_notes").is_some());
    assert_eq!(body["photos"].as_array().unwrap().len(), 1);
    assert_eq!(body["photos"][0]["id"], 5);
}

#[tokio::test]
async fn test_get_appointment_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([Vec::<appointments::Model>::new()])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_get("/api/admin/appointments/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_status() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(42)]])
        .append_query_results([vec![with_status(appointment_fixture(42), "confirmed")]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_json_request(
            Method::PATCH,
            "/api/admin/appointments/42/status",
            &json!({ "status": "confirmed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "confirmed");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("UPDATE"));
    assert!(log.contains("confirmed"));
}

#[tokio::test]
async fn test_update_status_rejects_unknown_value() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_json_request(
            Method::PATCH,
            "/api/admin/appointments/42/status",
            &json!({ "status": "done" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "INVALID_STATUS");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("UPDATE"));
}

#[tokio::test]
async fn test_update_status_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([Vec::<appointments::Model>::new()])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_json_request(
            Method::PATCH,
            "/api/admin/appointments/999/status",
            &json!({ "status": "confirmed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Archiving unfinished work without `force` is refused so the dashboard
/// can surface its confirmation prompt.
#[tokio::test]
async fn test_archive_pending_requires_confirmation() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(42)]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/42/archive",
            &json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["code"], "CONFIRM_REQUIRED");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(!log.contains("UPDATE"));
}

#[tokio::test]
async fn test_archive_pending_with_force() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(42)]])
        .append_query_results([vec![archived(appointment_fixture(42))]])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/42/archive",
            &json!({ "force": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["archived_at"].is_string());
}

#[tokio::test]
async fn test_archive_completed_without_force() {
    let completed = with_status(appointment_fixture(42), "completed");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![completed.clone()]])
        .append_query_results([vec![archived(completed)]])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/42/archive",
            &json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unarchive_returns_record_to_active_view() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![archived(appointment_fixture(42))]])
        .append_query_results([vec![appointment_fixture(42)]])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/42/unarchive",
            &json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["archived_at"].is_null());
}

#[tokio::test]
async fn test_update_notes() {
    let mut noted = appointment_fixture(42);
    noted.staff_notes = Some("Left voicemail".to_string());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(42)]])
        .append_query_results([vec![noted]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_json_request(
            Method::PATCH,
            "/api/admin/appointments/42/notes",
            &json!({ "notes": "Left voicemail" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["staff_notes"], "Left voicemail");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("Left voicemail"));
}

#[tokio::test]
async fn test_attach_photo_attributed_to_staff() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([vec![appointment_fixture(42)]])
        .append_query_results([vec![photo_fixture(5, 42)]])
        .into_connection();
    let app = build_router(test_state(db.clone()));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/42/photos",
            &json!({
                "storageUrl": "https://storage.example.com/damage/5.jpg",
                "caption": "passenger door"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["appointment_id"], 42);
    assert_eq!(body["uploaded_by"], "Jane Smith");

    // The insert carried the authed staff member's display name
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("Jane Smith"));
}

#[tokio::test]
async fn test_attach_photo_requires_storage_url() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/42/photos",
            &json!({ "caption": "no url" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], "MISSING_STORAGE_URL");
}

#[tokio::test]
async fn test_attach_photo_unknown_appointment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![staff_fixture()]])
        .append_query_results([Vec::<appointments::Model>::new()])
        .into_connection();
    let app = build_router(test_state(db));

    let response = app
        .oneshot(staff_json_request(
            Method::POST,
            "/api/admin/appointments/999/photos",
            &json!({ "storageUrl": "https://storage.example.com/x.jpg" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
