use sea_orm_migration::prelude::*;

use crate::columns::{
    fk, fk_null, flag, long_text_null, money, pk, rating_null, text, text_null, timestamp_now,
    timestamp_null, unique_text,
};
use crate::m20261001_000001_create_users::Users;
use crate::m20261001_000002_create_master_data::{Customers, VehicleModels};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehiclePurchaseTransactions::Table)
                    .if_not_exists()
                    .col(pk(VehiclePurchaseTransactions::Id))
                    .col(unique_text(VehiclePurchaseTransactions::TransactionNumber))
                    .col(fk(VehiclePurchaseTransactions::CustomerId))
                    .col(text(VehiclePurchaseTransactions::CustomerName))
                    .col(fk_null(VehiclePurchaseTransactions::VehicleModelId))
                    .col(unique_text(VehiclePurchaseTransactions::Vin))
                    .col(text_null(VehiclePurchaseTransactions::LicensePlate))
                    .col(text_null(VehiclePurchaseTransactions::EngineNumber))
                    .col(
                        ColumnDef::new(VehiclePurchaseTransactions::ManufactureYear)
                            .integer()
                            .null(),
                    )
                    .col(text_null(VehiclePurchaseTransactions::Color))
                    .col(
                        ColumnDef::new(VehiclePurchaseTransactions::Mileage)
                            .integer()
                            .null(),
                    )
                    .col(money(VehiclePurchaseTransactions::AskingPrice))
                    .col(money(VehiclePurchaseTransactions::PurchasePrice))
                    .col(rating_null(VehiclePurchaseTransactions::ConditionRating))
                    .col(long_text_null(VehiclePurchaseTransactions::InspectionNotes))
                    .col(fk_null(VehiclePurchaseTransactions::InspectedBy))
                    .col(timestamp_null(VehiclePurchaseTransactions::InspectedAt))
                    .col(text(VehiclePurchaseTransactions::Status))
                    .col(long_text_null(VehiclePurchaseTransactions::Notes))
                    .col(fk_null(VehiclePurchaseTransactions::ApprovedBy))
                    .col(timestamp_null(VehiclePurchaseTransactions::ApprovedAt))
                    .col(long_text_null(VehiclePurchaseTransactions::ApprovalNotes))
                    .col(fk(VehiclePurchaseTransactions::CreatedBy))
                    .col(flag(VehiclePurchaseTransactions::IsActive, true))
                    .col(timestamp_now(VehiclePurchaseTransactions::CreatedAt))
                    .col(timestamp_now(VehiclePurchaseTransactions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                VehiclePurchaseTransactions::Table,
                                VehiclePurchaseTransactions::CustomerId,
                            )
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                VehiclePurchaseTransactions::Table,
                                VehiclePurchaseTransactions::VehicleModelId,
                            )
                            .to(VehicleModels::Table, VehicleModels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                VehiclePurchaseTransactions::Table,
                                VehiclePurchaseTransactions::CreatedBy,
                            )
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehiclePurchasePayments::Table)
                    .if_not_exists()
                    .col(pk(VehiclePurchasePayments::Id))
                    .col(unique_text(VehiclePurchasePayments::PaymentNumber))
                    .col(fk(VehiclePurchasePayments::TransactionId))
                    .col(money(VehiclePurchasePayments::Amount))
                    .col(text(VehiclePurchasePayments::PaymentMethod))
                    .col(timestamp_now(VehiclePurchasePayments::PaymentDate))
                    .col(text_null(VehiclePurchasePayments::ReferenceNumber))
                    .col(text(VehiclePurchasePayments::Status))
                    .col(long_text_null(VehiclePurchasePayments::Notes))
                    .col(fk_null(VehiclePurchasePayments::ProcessedBy))
                    .col(timestamp_null(VehiclePurchasePayments::ProcessedAt))
                    .col(fk_null(VehiclePurchasePayments::ApprovedBy))
                    .col(timestamp_null(VehiclePurchasePayments::ApprovedAt))
                    .col(long_text_null(VehiclePurchasePayments::ApprovalNotes))
                    .col(fk(VehiclePurchasePayments::CreatedBy))
                    .col(flag(VehiclePurchasePayments::IsActive, true))
                    .col(timestamp_now(VehiclePurchasePayments::CreatedAt))
                    .col(timestamp_now(VehiclePurchasePayments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                VehiclePurchasePayments::Table,
                                VehiclePurchasePayments::TransactionId,
                            )
                            .to(
                                VehiclePurchaseTransactions::Table,
                                VehiclePurchaseTransactions::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehiclePurchasePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(VehiclePurchaseTransactions::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum VehiclePurchaseTransactions {
    Table,
    Id,
    TransactionNumber,
    CustomerId,
    CustomerName,
    VehicleModelId,
    Vin,
    LicensePlate,
    EngineNumber,
    ManufactureYear,
    Color,
    Mileage,
    AskingPrice,
    PurchasePrice,
    ConditionRating,
    InspectionNotes,
    InspectedBy,
    InspectedAt,
    Status,
    Notes,
    ApprovedBy,
    ApprovedAt,
    ApprovalNotes,
    CreatedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum VehiclePurchasePayments {
    Table,
    Id,
    PaymentNumber,
    TransactionId,
    Amount,
    PaymentMethod,
    PaymentDate,
    ReferenceNumber,
    Status,
    Notes,
    ProcessedBy,
    ProcessedAt,
    ApprovedBy,
    ApprovedAt,
    ApprovalNotes,
    CreatedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
