//! Migration to create the appointment_photos table
//!
//! Photo bytes live in external object storage; rows hold the URL plus
//! caption/uploader metadata, keyed by appointment.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppointmentPhotos::Table)
                    .if_not_exists()
                    .col(pk_auto(AppointmentPhotos::Id))
                    .col(integer(AppointmentPhotos::AppointmentId).not_null())
                    .col(string(AppointmentPhotos::StorageUrl).not_null())
                    .col(string_null(AppointmentPhotos::Caption))
                    .col(string_null(AppointmentPhotos::UploadedBy))
                    .col(
                        timestamp_with_time_zone(AppointmentPhotos::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_photos_appointment_id")
                            .from(
                                AppointmentPhotos::Table,
                                AppointmentPhotos::AppointmentId,
                            )
                            .to(Appointments::Table, Appointments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for fetching all photos of one appointment
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_photos_appointment_id")
                    .table(AppointmentPhotos::Table)
                    .col(AppointmentPhotos::AppointmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppointmentPhotos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppointmentPhotos {
    Table,
    Id,
    AppointmentId,
    StorageUrl,
    Caption,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
}
