//! Migration to add the archive overlay and staff-only notes to appointments
//!
//! Archiving is a soft delete: archived rows keep their status but drop out
//! of the active dashboard view until unarchived.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Appointments::Table)
                    .add_column(
                        ColumnDef::new(Appointments::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Appointments::Table)
                    .add_column(ColumnDef::new(Appointments::StaffNotes).text().null())
                    .to_owned(),
            )
            .await?;

        // Index for the active/archived partition queries
        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_archived_at")
                    .table(Appointments::Table)
                    .col(Appointments::ArchivedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Appointments::Table)
                    .drop_column(Appointments::StaffNotes)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Appointments::Table)
                    .drop_column(Appointments::ArchivedAt)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    ArchivedAt,
    StaffNotes,
}
