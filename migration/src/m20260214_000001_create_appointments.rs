//! Migration to create the appointments table for customer service requests

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointments::Id))
                    .col(string(Appointments::CustomerName).not_null())
                    // Stored normalized: exactly 10 ASCII digits
                    .col(string(Appointments::CustomerPhone).not_null())
                    .col(string_null(Appointments::CustomerEmail))
                    .col(string(Appointments::ServiceType).not_null())
                    .col(string_null(Appointments::VehicleInfo))
                    .col(string(Appointments::PreferredDate).not_null())
                    .col(string(Appointments::PreferredTime).not_null())
                    .col(text_null(Appointments::Message))
                    .col(string(Appointments::Status).not_null().default("pending"))
                    .col(
                        timestamp_with_time_zone(Appointments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Appointments::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the customer-facing phone lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_customer_phone")
                    .table(Appointments::Table)
                    .col(Appointments::CustomerPhone)
                    .to_owned(),
            )
            .await?;

        // Index for dashboard status filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_status")
                    .table(Appointments::Table)
                    .col(Appointments::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    CustomerName,
    CustomerPhone,
    CustomerEmail,
    ServiceType,
    VehicleInfo,
    PreferredDate,
    PreferredTime,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}
