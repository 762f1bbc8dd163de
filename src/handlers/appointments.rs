//! Public intake endpoints: appointment submission and phone lookup.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{error, info};
use uuid::Uuid;

use crate::entities::prelude::{AppointmentPhotos, Appointments};
use crate::entities::{appointment_photos, appointments};
use crate::models::appointment::{
    AppointmentStatus, AppointmentWithPhotos, CreateAppointmentRequest,
    CreateAppointmentResponse, ErrorResponse, PhoneQuery, ServiceType,
};
use crate::services::{contact, notify};
use crate::AppState;

/// POST /api/appointments - website form submission.
///
/// Validates, normalizes, persists, then hands staff notification to a
/// detached task. The customer gets their 200 as soon as the row is in;
/// notification outcomes never change the response.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<CreateAppointmentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let correlation_id = Uuid::new_v4();

    let name = match payload.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return Err(bad_request("Name is required", "MISSING_NAME"));
        }
    };

    let raw_phone = payload.phone.as_deref().map(str::trim).unwrap_or("");
    if raw_phone.is_empty() {
        return Err(bad_request("Phone number is required", "MISSING_PHONE"));
    }
    if !contact::is_valid_phone(raw_phone) {
        return Err(bad_request(
            "Please provide a valid 10-digit phone number",
            "INVALID_PHONE",
        ));
    }
    let phone = contact::normalize_phone(raw_phone);
    let email = payload
        .email
        .as_deref()
        .and_then(contact::normalize_email);

    let service_type = match payload.service_type.as_deref().map(str::trim) {
        None | Some("") => ServiceType::GeneralInquiry,
        Some(raw) => raw.parse::<ServiceType>().map_err(|_| {
            bad_request(
                &format!("Unknown service type: {}", raw),
                "INVALID_SERVICE_TYPE",
            )
        })?,
    };

    let now = Utc::now();
    let preferred_date =
        non_blank(payload.date).unwrap_or_else(|| now.format("%Y-%m-%d").to_string());
    let preferred_time =
        non_blank(payload.time).unwrap_or_else(|| now.format("%H:%M").to_string());
    let vehicle_info = non_blank(payload.vehicle_info);
    let message = non_blank(payload.message);
    let location = non_blank(payload.location);
    let destination = non_blank(payload.destination);
    let subject = non_blank(payload.subject);

    let ctx = notify::RequestContext {
        service_type,
        name: &name,
        phone: &phone,
        email: email.as_deref(),
        preferred_date: &preferred_date,
        preferred_time: &preferred_time,
        vehicle_info: vehicle_info.as_deref(),
        message: message.as_deref(),
        location: location.as_deref(),
        destination: destination.as_deref(),
        subject: subject.as_deref(),
    };
    let details = notify::build_request_details(&ctx);
    let summary = notify::build_staff_summary(&ctx);

    info!(
        correlation_id = %correlation_id,
        service_type = %service_type,
        "Appointment submission received"
    );

    let record = appointments::ActiveModel {
        customer_name: Set(name),
        customer_phone: Set(phone),
        customer_email: Set(email),
        service_type: Set(service_type.to_string()),
        vehicle_info: Set(vehicle_info),
        preferred_date: Set(preferred_date),
        preferred_time: Set(preferred_time),
        message: Set(Some(details)),
        status: Set(AppointmentStatus::Pending.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    let saved = record.insert(&state.db).await.map_err(|e| {
        error!(
            correlation_id = %correlation_id,
            error = %e,
            "Failed to persist appointment"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::coded(
                "We couldn't save your request. Please call the shop directly.",
                "STORAGE_ERROR",
            )),
        )
    })?;

    info!(
        correlation_id = %correlation_id,
        appointment_id = saved.id,
        "Appointment persisted"
    );

    // Best-effort staff alert; the response is already decided.
    let sms = state.sms.clone();
    let email_service = state.email.clone();
    let subject_line = format!("{} - {}", service_type.headline(), saved.customer_name);
    let correlation = correlation_id.to_string();
    tokio::spawn(async move {
        notify::dispatch_notifications(&sms, &email_service, &subject_line, &summary, &correlation)
            .await;
    });

    Ok(Json(CreateAppointmentResponse {
        success: true,
        message: "Your request has been received. We'll be in touch shortly.".to_string(),
        confirmation: generate_confirmation(),
        data: saved.into(),
    }))
}

/// GET /api/appointments?phone=... - customer-side lookup of their own
/// submissions, accepting any phone formatting the site produces.
pub async fn get_appointments_by_phone(
    State(state): State<AppState>,
    Query(query): Query<PhoneQuery>,
) -> Result<Json<Vec<AppointmentWithPhotos>>, (StatusCode, Json<ErrorResponse>)> {
    if !contact::is_valid_phone(&query.phone) {
        return Err(bad_request(
            "Please provide a valid 10-digit phone number",
            "INVALID_PHONE",
        ));
    }
    let phone = contact::normalize_phone(&query.phone);

    let records = Appointments::find()
        .filter(appointments::Column::CustomerPhone.eq(&phone))
        .order_by_desc(appointments::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load appointments by phone");
            lookup_failed()
        })?;

    let mut results = Vec::with_capacity(records.len());
    for record in records {
        let photos = AppointmentPhotos::find()
            .filter(appointment_photos::Column::AppointmentId.eq(record.id))
            .order_by_asc(appointment_photos::Column::CreatedAt)
            .all(&state.db)
            .await
            .map_err(|e| {
                error!(error = %e, appointment_id = record.id, "Failed to load photos");
                lookup_failed()
            })?;
        results.push(AppointmentWithPhotos {
            appointment: record.into(),
            photos: photos.into_iter().map(Into::into).collect(),
        });
    }

    Ok(Json(results))
}

fn bad_request(message: &str, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::coded(message, code)),
    )
}

fn lookup_failed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::coded(
            "Failed to load appointments",
            "STORAGE_ERROR",
        )),
    )
}

/// Trim an optional field, mapping blank to absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Human-readable reference the customer can quote on the phone. Not
/// persisted; uniqueness is cosmetic, not enforced.
fn generate_confirmation() -> String {
    let stamp = Utc::now().timestamp_millis();
    let tail = Uuid::new_v4().simple().to_string();
    format!("ABS-{}-{}", stamp, tail[..4].to_uppercase())
}
