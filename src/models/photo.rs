//! Photo attachment DTOs

use serde::{Deserialize, Serialize};

/// Staff request to attach an already-uploaded photo to an appointment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachPhotoRequest {
    pub storage_url: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: i32,
    pub appointment_id: i32,
    pub storage_url: String,
    pub caption: Option<String>,
    pub uploaded_by: Option<String>,
    pub created_at: String,
}

impl From<crate::entities::appointment_photos::Model> for PhotoResponse {
    fn from(model: crate::entities::appointment_photos::Model) -> Self {
        Self {
            id: model.id,
            appointment_id: model.appointment_id,
            storage_url: model.storage_url,
            caption: model.caption,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}
