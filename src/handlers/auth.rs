//! Staff authentication for the admin surface.
//!
//! Auth itself lives in an external session layer in front of this API;
//! what arrives here is a shared service secret (`x-staff-key`) plus the
//! authenticated identity it vouches for (`x-staff-id`). Both are checked
//! on every admin request.

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{error, warn};

use crate::entities::prelude::StaffUsers;
use crate::entities::staff_users;
use crate::models::appointment::ErrorResponse;
use crate::AppState;

/// Resolve the staff member behind an admin request, or reject it.
///
/// Returns the matching `staff_users` row so handlers can attribute
/// mutations to a person, not just to "someone with the key".
pub async fn require_staff(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<staff_users::Model, (StatusCode, Json<ErrorResponse>)> {
    let Some(expected_key) = state.config.staff_api_key.as_deref() else {
        error!("STAFF_API_KEY is not configured; admin routes are unusable");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::coded(
                "Staff access is not configured on this server",
                "CONFIG_ERROR",
            )),
        ));
    };

    let provided_key = headers
        .get("x-staff-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided_key != expected_key {
        warn!("Admin request rejected: bad or missing x-staff-key");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::coded("Invalid staff key", "UNAUTHORIZED")),
        ));
    }

    let auth_id = headers
        .get("x-staff-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("");
    if auth_id.is_empty() {
        warn!("Admin request rejected: missing x-staff-id");
        return Err(unknown_staff());
    }

    let staff = StaffUsers::find()
        .filter(staff_users::Column::AuthId.eq(auth_id))
        .filter(staff_users::Column::Active.eq(true))
        .one(&state.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to look up staff user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::coded(
                    "Failed to verify staff identity",
                    "STORAGE_ERROR",
                )),
            )
        })?;

    staff.ok_or_else(|| {
        warn!(auth_id = %auth_id, "Admin request rejected: unknown or inactive staff id");
        unknown_staff()
    })
}

fn unknown_staff() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::coded(
            "Staff account not recognized",
            "UNKNOWN_STAFF",
        )),
    )
}
