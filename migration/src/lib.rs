pub use sea_orm_migration::prelude::*;

mod m20260214_000001_create_appointments;
mod m20260302_000001_add_archive_and_staff_notes;
mod m20260315_000001_create_appointment_photos;
mod m20260409_000001_create_staff_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260214_000001_create_appointments::Migration),
            Box::new(m20260302_000001_add_archive_and_staff_notes::Migration),
            Box::new(m20260315_000001_create_appointment_photos::Migration),
            Box::new(m20260409_000001_create_staff_users::Migration),
        ]
    }
}
