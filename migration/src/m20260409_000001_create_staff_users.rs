//! Migration to create the staff_users table
//!
//! Maps identities minted by the external login provider to a dashboard
//! role. Rows are provisioned with the seed_staff_user binary.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffUsers::Table)
                    .if_not_exists()
                    .col(pk_auto(StaffUsers::Id))
                    .col(string(StaffUsers::AuthId).not_null())
                    .col(string(StaffUsers::Email).not_null())
                    .col(string(StaffUsers::DisplayName).not_null())
                    .col(string(StaffUsers::Role).not_null().default("staff"))
                    .col(boolean(StaffUsers::Active).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(StaffUsers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_users_auth_id")
                    .table(StaffUsers::Table)
                    .col(StaffUsers::AuthId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_users_email")
                    .table(StaffUsers::Table)
                    .col(StaffUsers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffUsers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StaffUsers {
    Table,
    Id,
    AuthId,
    Email,
    DisplayName,
    Role,
    Active,
    CreatedAt,
}
