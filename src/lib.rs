// src/lib.rs

use axum::routing::{get, patch, post};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use services::{email::EmailService, sms::SmsService};

// sea-orm's DatabaseConnection only derives Clone when its `mock` feature
// is off, so test builds (which enable mock through the self dev-dependency)
// use the hand-written field-by-field impl below instead.
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub sms: SmsService,
    pub email: EmailService,
}

#[cfg(feature = "mock")]
impl Clone for AppState {
    fn clone(&self) -> Self {
        let db = match &self.db {
            DatabaseConnection::SqlxPostgresPoolConnection(conn) => {
                DatabaseConnection::SqlxPostgresPoolConnection(conn.clone())
            }
            DatabaseConnection::MockDatabaseConnection(conn) => {
                DatabaseConnection::MockDatabaseConnection(std::sync::Arc::clone(conn))
            }
            DatabaseConnection::Disconnected => DatabaseConnection::Disconnected,
        };
        Self {
            db,
            config: self.config.clone(),
            sms: self.sms.clone(),
            email: self.email.clone(),
        }
    }
}

pub mod config;

pub mod entities {
    pub mod prelude;
    pub mod appointment_photos;
    pub mod appointments;
    pub mod staff_users;
}

pub mod services {
    pub mod contact;
    pub mod email;
    pub mod notify;
    pub mod sms;
}

pub mod models;
pub mod handlers;

use handlers::{admin, appointments, photos};

/// The full route table. Shared by `main` and the integration tests so
/// both always exercise the same router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            "/api/appointments",
            post(appointments::create_appointment).get(appointments::get_appointments_by_phone),
        )
        .route("/api/admin/appointments", get(admin::list_appointments))
        .route("/api/admin/appointments/{id}", get(admin::get_appointment))
        .route(
            "/api/admin/appointments/{id}/status",
            patch(admin::update_status),
        )
        .route(
            "/api/admin/appointments/{id}/notes",
            patch(admin::update_notes),
        )
        .route(
            "/api/admin/appointments/{id}/archive",
            post(admin::archive_appointment),
        )
        .route(
            "/api/admin/appointments/{id}/unarchive",
            post(admin::unarchive_appointment),
        )
        .route(
            "/api/admin/appointments/{id}/photos",
            post(photos::attach_photo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "Hello from the Body Shop Backend! 🚗"
}
