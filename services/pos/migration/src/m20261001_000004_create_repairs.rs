use sea_orm_migration::prelude::*;

use crate::columns::{
    fk, fk_null, flag, hours, long_text_null, money, pk, rating_null, text, timestamp_now,
    timestamp_null, unique_text,
};
use crate::m20261001_000001_create_users::Users;
use crate::m20261001_000002_create_master_data::Products;
use crate::m20261001_000003_create_vehicle_purchases::VehiclePurchaseTransactions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleDamages::Table)
                    .if_not_exists()
                    .col(pk(VehicleDamages::Id))
                    .col(unique_text(VehicleDamages::DamageNumber))
                    .col(fk(VehicleDamages::TransactionId))
                    .col(text(VehicleDamages::DamageType))
                    .col(ColumnDef::new(VehicleDamages::Description).text().not_null())
                    .col(ColumnDef::new(VehicleDamages::Location).string().null())
                    .col(text(VehicleDamages::Severity))
                    .col(text(VehicleDamages::Status))
                    .col(money(VehicleDamages::EstimatedCost))
                    .col(
                        ColumnDef::new(VehicleDamages::ActualCost)
                            .decimal_len(15, 2)
                            .null(),
                    )
                    .col(fk(VehicleDamages::IdentifiedBy))
                    .col(flag(VehicleDamages::IsActive, true))
                    .col(timestamp_now(VehicleDamages::CreatedAt))
                    .col(timestamp_now(VehicleDamages::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(VehicleDamages::Table, VehicleDamages::TransactionId)
                            .to(
                                VehiclePurchaseTransactions::Table,
                                VehiclePurchaseTransactions::Id,
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VehicleDamages::Table, VehicleDamages::IdentifiedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RepairWorkOrders::Table)
                    .if_not_exists()
                    .col(pk(RepairWorkOrders::Id))
                    .col(unique_text(RepairWorkOrders::WorkOrderNumber))
                    .col(fk(RepairWorkOrders::TransactionId))
                    .col(ColumnDef::new(RepairWorkOrders::Description).text().not_null())
                    .col(text(RepairWorkOrders::Priority))
                    .col(text(RepairWorkOrders::Status))
                    .col(text(RepairWorkOrders::ApprovalStatus))
                    .col(fk_null(RepairWorkOrders::AssignedMechanicId))
                    .col(fk_null(RepairWorkOrders::SupervisorId))
                    .col(hours(RepairWorkOrders::EstimatedHours))
                    .col(hours(RepairWorkOrders::ActualHours))
                    .col(money(RepairWorkOrders::EstimatedCost))
                    .col(money(RepairWorkOrders::ActualCost))
                    .col(timestamp_null(RepairWorkOrders::ScheduledStart))
                    .col(timestamp_null(RepairWorkOrders::ScheduledEnd))
                    .col(timestamp_null(RepairWorkOrders::StartedAt))
                    .col(timestamp_null(RepairWorkOrders::CompletedAt))
                    .col(long_text_null(RepairWorkOrders::Notes))
                    .col(fk_null(RepairWorkOrders::ApprovedBy))
                    .col(timestamp_null(RepairWorkOrders::ApprovedAt))
                    .col(long_text_null(RepairWorkOrders::ApprovalNotes))
                    .col(fk(RepairWorkOrders::CreatedBy))
                    .col(flag(RepairWorkOrders::IsActive, true))
                    .col(timestamp_now(RepairWorkOrders::CreatedAt))
                    .col(timestamp_now(RepairWorkOrders::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairWorkOrders::Table, RepairWorkOrders::TransactionId)
                            .to(
                                VehiclePurchaseTransactions::Table,
                                VehiclePurchaseTransactions::Id,
                            ),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairWorkOrders::Table, RepairWorkOrders::AssignedMechanicId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RepairWorkDetails::Table)
                    .if_not_exists()
                    .col(pk(RepairWorkDetails::Id))
                    .col(unique_text(RepairWorkDetails::DetailNumber))
                    .col(fk(RepairWorkDetails::WorkOrderId))
                    .col(fk_null(RepairWorkDetails::DamageId))
                    .col(text(RepairWorkDetails::TaskName))
                    .col(long_text_null(RepairWorkDetails::Description))
                    .col(fk_null(RepairWorkDetails::MechanicId))
                    .col(text(RepairWorkDetails::Status))
                    .col(
                        ColumnDef::new(RepairWorkDetails::CompletionPercentage)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(hours(RepairWorkDetails::EstimatedHours))
                    .col(hours(RepairWorkDetails::ActualHours))
                    .col(money(RepairWorkDetails::LaborCost))
                    .col(flag(RepairWorkDetails::QualityChecked, false))
                    .col(fk_null(RepairWorkDetails::QualityCheckedBy))
                    .col(timestamp_null(RepairWorkDetails::QualityCheckedAt))
                    .col(long_text_null(RepairWorkDetails::QualityNotes))
                    .col(timestamp_null(RepairWorkDetails::StartedAt))
                    .col(timestamp_null(RepairWorkDetails::CompletedAt))
                    .col(long_text_null(RepairWorkDetails::Notes))
                    .col(flag(RepairWorkDetails::IsActive, true))
                    .col(timestamp_now(RepairWorkDetails::CreatedAt))
                    .col(timestamp_now(RepairWorkDetails::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairWorkDetails::Table, RepairWorkDetails::WorkOrderId)
                            .to(RepairWorkOrders::Table, RepairWorkOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairWorkDetails::Table, RepairWorkDetails::DamageId)
                            .to(VehicleDamages::Table, VehicleDamages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RepairPartsUsage::Table)
                    .if_not_exists()
                    .col(pk(RepairPartsUsage::Id))
                    .col(unique_text(RepairPartsUsage::UsageNumber))
                    .col(fk(RepairPartsUsage::WorkDetailId))
                    .col(fk(RepairPartsUsage::ProductId))
                    .col(ColumnDef::new(RepairPartsUsage::Quantity).integer().not_null())
                    .col(money(RepairPartsUsage::UnitPrice))
                    .col(money(RepairPartsUsage::TotalPrice))
                    .col(text(RepairPartsUsage::Status))
                    .col(fk(RepairPartsUsage::RequestedBy))
                    .col(fk_null(RepairPartsUsage::ApprovedBy))
                    .col(timestamp_null(RepairPartsUsage::ApprovedAt))
                    .col(long_text_null(RepairPartsUsage::ApprovalNotes))
                    .col(long_text_null(RepairPartsUsage::Notes))
                    .col(flag(RepairPartsUsage::IsActive, true))
                    .col(timestamp_now(RepairPartsUsage::CreatedAt))
                    .col(timestamp_now(RepairPartsUsage::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairPartsUsage::Table, RepairPartsUsage::WorkDetailId)
                            .to(RepairWorkDetails::Table, RepairWorkDetails::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairPartsUsage::Table, RepairPartsUsage::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QualityInspections::Table)
                    .if_not_exists()
                    .col(pk(QualityInspections::Id))
                    .col(unique_text(QualityInspections::InspectionNumber))
                    .col(fk(QualityInspections::WorkOrderId))
                    .col(fk(QualityInspections::InspectorId))
                    .col(timestamp_now(QualityInspections::InspectionDate))
                    .col(text(QualityInspections::Status))
                    .col(rating_null(QualityInspections::OverallRating))
                    .col(rating_null(QualityInspections::WorkmanshipRating))
                    .col(rating_null(QualityInspections::SafetyRating))
                    .col(rating_null(QualityInspections::AppearanceRating))
                    .col(rating_null(QualityInspections::FunctionalityRating))
                    .col(long_text_null(QualityInspections::DefectsFound))
                    .col(long_text_null(QualityInspections::Recommendations))
                    .col(long_text_null(QualityInspections::Notes))
                    .col(flag(QualityInspections::ReworkRequired, false))
                    .col(long_text_null(QualityInspections::ReworkNotes))
                    .col(timestamp_null(QualityInspections::ReworkDueDate))
                    .col(fk_null(QualityInspections::SignedOffBy))
                    .col(timestamp_null(QualityInspections::SignedOffAt))
                    .col(flag(QualityInspections::IsActive, true))
                    .col(timestamp_now(QualityInspections::CreatedAt))
                    .col(timestamp_now(QualityInspections::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(QualityInspections::Table, QualityInspections::WorkOrderId)
                            .to(RepairWorkOrders::Table, RepairWorkOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QualityInspections::Table, QualityInspections::InspectorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QualityInspections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepairPartsUsage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepairWorkDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RepairWorkOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleDamages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleDamages {
    Table,
    Id,
    DamageNumber,
    TransactionId,
    DamageType,
    Description,
    Location,
    Severity,
    Status,
    EstimatedCost,
    ActualCost,
    IdentifiedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum RepairWorkOrders {
    Table,
    Id,
    WorkOrderNumber,
    TransactionId,
    Description,
    Priority,
    Status,
    ApprovalStatus,
    AssignedMechanicId,
    SupervisorId,
    EstimatedHours,
    ActualHours,
    EstimatedCost,
    ActualCost,
    ScheduledStart,
    ScheduledEnd,
    StartedAt,
    CompletedAt,
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
pub enum RepairWorkDetails {
    Table,
    Id,
    DetailNumber,
    WorkOrderId,
    DamageId,
    TaskName,
    Description,
    MechanicId,
    Status,
    CompletionPercentage,
    EstimatedHours,
    ActualHours,
    LaborCost,
    QualityChecked,
    QualityCheckedBy,
    QualityCheckedAt,
    QualityNotes,
    StartedAt,
    CompletedAt,
    Notes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum RepairPartsUsage {
    Table,
    Id,
    UsageNumber,
    WorkDetailId,
    ProductId,
    Quantity,
    UnitPrice,
    TotalPrice,
    Status,
    RequestedBy,
    ApprovedBy,
    ApprovedAt,
    ApprovalNotes,
    Notes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum QualityInspections {
    Table,
    Id,
    InspectionNumber,
    WorkOrderId,
    InspectorId,
    InspectionDate,
    Status,
    OverallRating,
    WorkmanshipRating,
    SafetyRating,
    AppearanceRating,
    FunctionalityRating,
    DefectsFound,
    Recommendations,
    Notes,
    ReworkRequired,
    ReworkNotes,
    ReworkDueDate,
    SignedOffBy,
    SignedOffAt,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
