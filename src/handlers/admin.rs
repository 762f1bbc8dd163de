//! Staff dashboard endpoints under `/api/admin/appointments`.
//!
//! Every handler authenticates through [`require_staff`] first. Mutations
//! are independent update-by-id operations, last write wins.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{error, info};

use crate::entities::prelude::{AppointmentPhotos, Appointments};
use crate::entities::{appointment_photos, appointments};
use crate::handlers::auth::require_staff;
use crate::models::appointment::{
    AppointmentStatus, ArchiveRequest, ErrorResponse, ListAppointmentsQuery,
    StaffAppointmentResponse, StaffAppointmentWithPhotos, UpdateNotesRequest,
    UpdateStatusRequest,
};
use crate::services::contact;
use crate::AppState;

/// GET /api/admin/appointments - filterable dashboard list.
///
/// `view=active|archived` picks the archive side (active default), `status`
/// narrows to one workflow state, `search` is a case-insensitive substring
/// match on name/phone/email, `sort=created|date` orders by submission time
/// (default) or by the requested slot.
pub async fn list_appointments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<StaffAppointmentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let _staff = require_staff(&state, &headers).await?;

    let mut select = Appointments::find();

    select = if query.view.as_deref() == Some("archived") {
        select.filter(appointments::Column::ArchivedAt.is_not_null())
    } else {
        select.filter(appointments::Column::ArchivedAt.is_null())
    };

    if let Some(raw) = query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let status: AppointmentStatus = raw.parse().map_err(|_| {
            bad_request(&format!("Unknown status: {}", raw), "INVALID_STATUS")
        })?;
        select = select.filter(appointments::Column::Status.eq(status.to_string()));
    }

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term.to_lowercase());
        let mut cond = Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col(appointments::Column::CustomerName)))
                    .like(pattern.clone()),
            )
            .add(
                Expr::expr(Func::lower(Expr::col(appointments::Column::CustomerEmail)))
                    .like(pattern),
            );
        // Phone search matches on digits so "(216) 481" finds "2164818696"
        let digits = contact::normalize_phone(term);
        if !digits.is_empty() {
            cond = cond.add(appointments::Column::CustomerPhone.like(format!("%{}%", digits)));
        }
        select = select.filter(cond);
    }

    select = match query.sort.as_deref() {
        Some("date") => select
            .order_by_desc(appointments::Column::PreferredDate)
            .order_by_desc(appointments::Column::PreferredTime),
        _ => select.order_by_desc(appointments::Column::CreatedAt),
    };

    let records = select.all(&state.db).await.map_err(|e| {
        error!(error = %e, "Failed to list appointments");
        storage_error("Failed to load appointments")
    })?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /api/admin/appointments/{id} - full staff view with photos.
pub async fn get_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<StaffAppointmentWithPhotos>, (StatusCode, Json<ErrorResponse>)> {
    let _staff = require_staff(&state, &headers).await?;

    let record = load_appointment(&state.db, id).await?;
    let photos = AppointmentPhotos::find()
        .filter(appointment_photos::Column::AppointmentId.eq(record.id))
        .order_by_asc(appointment_photos::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, appointment_id = id, "Failed to load photos");
            storage_error("Failed to load appointment photos")
        })?;

    Ok(Json(StaffAppointmentWithPhotos {
        appointment: record.into(),
        photos: photos.into_iter().map(Into::into).collect(),
    }))
}

/// PATCH /api/admin/appointments/{id}/status - set the workflow status.
/// Any status may be set from any other; there is no enforced ordering.
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<StaffAppointmentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let staff = require_staff(&state, &headers).await?;

    let raw = payload.status.as_deref().map(str::trim).unwrap_or("");
    let status: AppointmentStatus = raw
        .parse()
        .map_err(|_| bad_request(&format!("Unknown status: {}", raw), "INVALID_STATUS"))?;

    let record = load_appointment(&state.db, id).await?;
    let mut active: appointments::ActiveModel = record.into();
    active.status = Set(status.to_string());
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await.map_err(|e| {
        error!(error = %e, appointment_id = id, "Failed to update status");
        storage_error("Failed to update appointment")
    })?;

    info!(
        appointment_id = id,
        status = %status,
        staff = %staff.display_name,
        "Appointment status updated"
    );
    Ok(Json(updated.into()))
}

/// PATCH /api/admin/appointments/{id}/notes - set or clear the staff-only
/// notes. Blank input clears.
pub async fn update_notes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNotesRequest>,
) -> Result<Json<StaffAppointmentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let staff = require_staff(&state, &headers).await?;

    let notes = payload
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let record = load_appointment(&state.db, id).await?;
    let mut active: appointments::ActiveModel = record.into();
    active.staff_notes = Set(notes);
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await.map_err(|e| {
        error!(error = %e, appointment_id = id, "Failed to update notes");
        storage_error("Failed to update appointment")
    })?;

    info!(
        appointment_id = id,
        staff = %staff.display_name,
        "Staff notes updated"
    );
    Ok(Json(updated.into()))
}

/// POST /api/admin/appointments/{id}/archive - soft-delete into the
/// archived view.
///
/// Archiving unfinished work needs an explicit `force`, which is the
/// server side of the dashboard's confirmation prompt. Re-archiving just
/// refreshes the timestamp.
pub async fn archive_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ArchiveRequest>,
) -> Result<Json<StaffAppointmentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let staff = require_staff(&state, &headers).await?;

    let record = load_appointment(&state.db, id).await?;
    let force = payload.force.unwrap_or(false);
    if needs_confirmation(&record.status, force) {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::coded(
                format!(
                    "Appointment is still {}. Confirm to archive it anyway.",
                    record.status
                ),
                "CONFIRM_REQUIRED",
            )),
        ));
    }

    let mut active: appointments::ActiveModel = record.into();
    active.archived_at = Set(Some(Utc::now().into()));
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await.map_err(|e| {
        error!(error = %e, appointment_id = id, "Failed to archive appointment");
        storage_error("Failed to archive appointment")
    })?;

    info!(
        appointment_id = id,
        staff = %staff.display_name,
        forced = force,
        "Appointment archived"
    );
    Ok(Json(updated.into()))
}

/// POST /api/admin/appointments/{id}/unarchive - return the record to
/// the active view.
pub async fn unarchive_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<StaffAppointmentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let staff = require_staff(&state, &headers).await?;

    let record = load_appointment(&state.db, id).await?;
    let mut active: appointments::ActiveModel = record.into();
    active.archived_at = Set(None);
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await.map_err(|e| {
        error!(error = %e, appointment_id = id, "Failed to unarchive appointment");
        storage_error("Failed to unarchive appointment")
    })?;

    info!(
        appointment_id = id,
        staff = %staff.display_name,
        "Appointment unarchived"
    );
    Ok(Json(updated.into()))
}

fn needs_confirmation(status: &str, force: bool) -> bool {
    status != AppointmentStatus::Completed.to_string() && !force
}

pub(crate) async fn load_appointment(
    db: &DatabaseConnection,
    id: i32,
) -> Result<appointments::Model, (StatusCode, Json<ErrorResponse>)> {
    Appointments::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| {
            error!(error = %e, appointment_id = id, "Failed to load appointment");
            storage_error("Failed to load appointment")
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::coded("Appointment not found", "NOT_FOUND")),
            )
        })
}

fn bad_request(message: &str, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::coded(message, code)),
    )
}

pub(crate) fn storage_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::coded(message, "STORAGE_ERROR")),
    )
}
