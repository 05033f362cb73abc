//! Migration: Create service_types and services tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ServiceTypes::Description).text().null())
                    .col(
                        ColumnDef::new(ServiceTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::Title).string().not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    .col(ColumnDef::new(Services::Price).double().not_null())
                    .col(ColumnDef::new(Services::ProviderId).uuid().not_null())
                    .col(ColumnDef::new(Services::ServiceTypeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_provider")
                            .from(Services::Table, Services::ProviderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_service_type")
                            .from(Services::Table, Services::ServiceTypeId)
                            .to(ServiceTypes::Table, ServiceTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_service_type_id")
                    .table(Services::Table)
                    .col(Services::ServiceTypeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ServiceTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ServiceTypes {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(Iden)]
pub(super) enum Services {
    Table,
    Id,
    Title,
    Description,
    Price,
    ProviderId,
    ServiceTypeId,
    CreatedAt,
}
