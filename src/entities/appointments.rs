//! SeaORM Entity for the appointments table
//!
//! One row per customer-submitted service request. Phone is stored in the
//! canonical 10-digit form and email lowercase/trimmed; the intake handler
//! is the only writer of new rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub archived_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::appointment_photos::Entity")]
    AppointmentPhotos,
}

impl Related<super::appointment_photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppointmentPhotos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
