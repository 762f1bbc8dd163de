//! Damage photo attachments.
//!
//! Files themselves live in external storage; this endpoint just records
//! the URL against an appointment and who attached it.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use tracing::{error, info};

use crate::entities::appointment_photos;
use crate::handlers::admin::{load_appointment, storage_error};
use crate::handlers::auth::require_staff;
use crate::models::appointment::ErrorResponse;
use crate::models::photo::{AttachPhotoRequest, PhotoResponse};
use crate::AppState;

/// POST /api/admin/appointments/{id}/photos
pub async fn attach_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<AttachPhotoRequest>,
) -> Result<Json<PhotoResponse>, (StatusCode, Json<ErrorResponse>)> {
    let staff = require_staff(&state, &headers).await?;

    let storage_url = match payload.storage_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::coded(
                    "A storage URL is required",
                    "MISSING_STORAGE_URL",
                )),
            ));
        }
    };
    let caption = payload
        .caption
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let appointment = load_appointment(&state.db, id).await?;

    let photo = appointment_photos::ActiveModel {
        appointment_id: Set(appointment.id),
        storage_url: Set(storage_url),
        caption: Set(caption),
        uploaded_by: Set(Some(staff.display_name.clone())),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let saved = photo.insert(&state.db).await.map_err(|e| {
        error!(error = %e, appointment_id = id, "Failed to attach photo");
        storage_error("Failed to attach photo")
    })?;

    info!(
        appointment_id = id,
        photo_id = saved.id,
        staff = %staff.display_name,
        "Photo attached"
    );
    Ok(Json(saved.into()))
}
