use sea_orm_migration::prelude::*;

use crate::m20261001_000003_create_vehicle_purchases::{
    VehiclePurchasePayments, VehiclePurchaseTransactions,
};
use crate::m20261001_000004_create_repairs::{
    QualityInspections, RepairPartsUsage, RepairWorkDetails, RepairWorkOrders, VehicleDamages,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn index<T, C>(name: &'static str, table: T, col: C) -> (&'static str, IndexCreateStatement)
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    let stmt = Index::create()
        .name(name)
        .table(table)
        .col(col)
        .if_not_exists()
        .to_owned();
    (name, stmt)
}

fn indexes() -> Vec<(&'static str, IndexCreateStatement)> {
    vec![
        index(
            "idx_vpt_status",
            VehiclePurchaseTransactions::Table,
            VehiclePurchaseTransactions::Status,
        ),
        index(
            "idx_vpt_customer_id",
            VehiclePurchaseTransactions::Table,
            VehiclePurchaseTransactions::CustomerId,
        ),
        index(
            "idx_vpp_transaction_id",
            VehiclePurchasePayments::Table,
            VehiclePurchasePayments::TransactionId,
        ),
        index(
            "idx_vpp_status",
            VehiclePurchasePayments::Table,
            VehiclePurchasePayments::Status,
        ),
        index(
            "idx_damages_transaction_id",
            VehicleDamages::Table,
            VehicleDamages::TransactionId,
        ),
        index(
            "idx_rwo_transaction_id",
            RepairWorkOrders::Table,
            RepairWorkOrders::TransactionId,
        ),
        index(
            "idx_rwo_status",
            RepairWorkOrders::Table,
            RepairWorkOrders::Status,
        ),
        index(
            "idx_rwo_mechanic",
            RepairWorkOrders::Table,
            RepairWorkOrders::AssignedMechanicId,
        ),
        index(
            "idx_rwd_work_order_id",
            RepairWorkDetails::Table,
            RepairWorkDetails::WorkOrderId,
        ),
        index(
            "idx_rpu_work_detail_id",
            RepairPartsUsage::Table,
            RepairPartsUsage::WorkDetailId,
        ),
        index(
            "idx_rpu_status",
            RepairPartsUsage::Table,
            RepairPartsUsage::Status,
        ),
        index(
            "idx_qi_work_order_id",
            QualityInspections::Table,
            QualityInspections::WorkOrderId,
        ),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (_, stmt) in indexes() {
            manager.create_index(stmt).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in indexes() {
            manager
                .drop_index(Index::drop().name(name).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
