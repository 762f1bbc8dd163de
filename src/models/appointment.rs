//! Appointment domain types: service/status enums plus request and response
//! DTOs for the intake and dashboard endpoints.

use serde::{Deserialize, Serialize};

/// Service request categories offered on the website forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    Schedule,
    TowService,
    ExpressCare,
    ContactInquiry,
    GeneralInquiry,
}

impl ServiceType {
    /// Headline used in staff notification messages
    pub fn headline(&self) -> &'static str {
        match self {
            ServiceType::Schedule => "New estimate appointment",
            ServiceType::TowService => "New tow request",
            ServiceType::ExpressCare => "New express repair request",
            ServiceType::ContactInquiry => "New contact inquiry",
            ServiceType::GeneralInquiry => "New service inquiry",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::Schedule => write!(f, "schedule"),
            ServiceType::TowService => write!(f, "tow-service"),
            ServiceType::ExpressCare => write!(f, "express-care"),
            ServiceType::ContactInquiry => write!(f, "contact-inquiry"),
            ServiceType::GeneralInquiry => write!(f, "general-inquiry"),
        }
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "schedule" => Ok(ServiceType::Schedule),
            "tow-service" => Ok(ServiceType::TowService),
            "express-care" => Ok(ServiceType::ExpressCare),
            "contact-inquiry" => Ok(ServiceType::ContactInquiry),
            "general-inquiry" => Ok(ServiceType::GeneralInquiry),
            _ => Err(format!("Unknown service type: {}", s)),
        }
    }
}

/// Workflow status of one appointment record
///
/// Staff may set any status directly from any other status; archival is an
/// orthogonal overlay and never changes the status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in-progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "in-progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!("Unknown appointment status: {}", s)),
        }
    }
}

/// Intake submission from the website forms
///
/// Field names mirror the form payloads (camelCase). Everything is optional
/// at the wire level so validation can answer with readable 400s instead of
/// deserialization failures; the handler enforces name/phone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub service_type: Option<String>,
    pub vehicle_info: Option<String>,
    pub message: Option<String>,
    /// Tow pickup location
    pub location: Option<String>,
    /// Tow drop-off destination
    pub destination: Option<String>,
    /// Contact-inquiry subject line
    pub subject: Option<String>,
}

/// Customer-facing view of a persisted record (staff_notes never included)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub service_type: String,
    pub vehicle_info: Option<String>,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::appointments::Model> for AppointmentResponse {
    fn from(model: crate::entities::appointments::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            customer_email: model.customer_email,
            service_type: model.service_type,
            vehicle_info: model.vehicle_info,
            preferred_date: model.preferred_date,
            preferred_time: model.preferred_time,
            message: model.message,
            status: model.status,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Staff-facing view including the archive overlay and staff-only notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAppointmentResponse {
    pub id: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub service_type: String,
    pub vehicle_info: Option<String>,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
    pub status: String,
    pub staff_notes: Option<String>,
    pub archived_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::entities::appointments::Model> for StaffAppointmentResponse {
    fn from(model: crate::entities::appointments::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            customer_email: model.customer_email,
            service_type: model.service_type,
            vehicle_info: model.vehicle_info,
            preferred_date: model.preferred_date,
            preferred_time: model.preferred_time,
            message: model.message,
            status: model.status,
            staff_notes: model.staff_notes,
            archived_at: model.archived_at.map(|t| t.to_rfc3339()),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// 200 body for a successful intake submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    pub success: bool,
    pub message: String,
    /// Cosmetic human-readable reference shown to the customer; never stored
    pub confirmation: String,
    pub data: AppointmentResponse,
}

/// One record with its attached photos (phone lookup / admin detail)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentWithPhotos {
    #[serde(flatten)]
    pub appointment: AppointmentResponse,
    pub photos: Vec<crate::models::photo::PhotoResponse>,
}

/// Staff detail view with photos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAppointmentWithPhotos {
    #[serde(flatten)]
    pub appointment: StaffAppointmentResponse,
    pub photos: Vec<crate::models::photo::PhotoResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneQuery {
    pub phone: String,
}

/// Filters for the dashboard list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAppointmentsQuery {
    /// "active" (default) or "archived"
    pub view: Option<String>,
    pub status: Option<String>,
    /// Case-insensitive substring match on name/phone/email
    pub search: Option<String>,
    /// "created" (default) or "date"
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveRequest {
    /// Archive even though the work is not completed (the dashboard asks
    /// the staff member to confirm before sending this)
    pub force: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: None,
        }
    }

    pub fn coded(message: impl Into<String>, code: &str) -> Self {
        Self {
            error: message.into(),
            code: Some(code.to_string()),
        }
    }
}
