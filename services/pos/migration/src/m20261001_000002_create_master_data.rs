use sea_orm_migration::prelude::*;

use crate::columns::{
    fk, fk_null, flag, long_text_null, money, pk, text, text_null, timestamp_now, unique_text,
};
use crate::m20261001_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk(Customers::Id))
                    .col(unique_text(Customers::CustomerCode))
                    .col(text(Customers::Name))
                    .col(text(Customers::CustomerType))
                    .col(unique_text(Customers::Phone))
                    .col(text_null(Customers::Email).unique_key().to_owned())
                    .col(long_text_null(Customers::Address))
                    .col(text_null(Customers::IdCardNumber))
                    .col(long_text_null(Customers::Notes))
                    .col(flag(Customers::IsActive, true))
                    .col(fk_null(Customers::CreatedBy))
                    .col(timestamp_now(Customers::CreatedAt))
                    .col(timestamp_now(Customers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Customers::Table, Customers::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(pk(Suppliers::Id))
                    .col(unique_text(Suppliers::SupplierCode))
                    .col(text(Suppliers::Name))
                    .col(text(Suppliers::SupplierType))
                    .col(text_null(Suppliers::ContactPerson))
                    .col(unique_text(Suppliers::Phone))
                    .col(text_null(Suppliers::Email).unique_key().to_owned())
                    .col(long_text_null(Suppliers::Address))
                    .col(long_text_null(Suppliers::Notes))
                    .col(flag(Suppliers::IsActive, true))
                    .col(fk_null(Suppliers::CreatedBy))
                    .col(timestamp_now(Suppliers::CreatedAt))
                    .col(timestamp_now(Suppliers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Suppliers::Table, Suppliers::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleBrands::Table)
                    .if_not_exists()
                    .col(pk(VehicleBrands::Id))
                    .col(unique_text(VehicleBrands::Code))
                    .col(unique_text(VehicleBrands::Name))
                    .col(text_null(VehicleBrands::CountryOfOrigin))
                    .col(long_text_null(VehicleBrands::Description))
                    .col(flag(VehicleBrands::IsActive, true))
                    .col(timestamp_now(VehicleBrands::CreatedAt))
                    .col(timestamp_now(VehicleBrands::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleCategories::Table)
                    .if_not_exists()
                    .col(pk(VehicleCategories::Id))
                    .col(unique_text(VehicleCategories::Code))
                    .col(unique_text(VehicleCategories::Name))
                    .col(long_text_null(VehicleCategories::Description))
                    .col(flag(VehicleCategories::IsActive, true))
                    .col(timestamp_now(VehicleCategories::CreatedAt))
                    .col(timestamp_now(VehicleCategories::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleModels::Table)
                    .if_not_exists()
                    .col(pk(VehicleModels::Id))
                    .col(unique_text(VehicleModels::Code))
                    .col(fk(VehicleModels::BrandId))
                    .col(fk(VehicleModels::CategoryId))
                    .col(text(VehicleModels::Name))
                    .col(ColumnDef::new(VehicleModels::YearStart).integer().null())
                    .col(ColumnDef::new(VehicleModels::YearEnd).integer().null())
                    .col(ColumnDef::new(VehicleModels::EngineCapacityCc).integer().null())
                    .col(text_null(VehicleModels::FuelType))
                    .col(text_null(VehicleModels::Transmission))
                    .col(flag(VehicleModels::IsActive, true))
                    .col(timestamp_now(VehicleModels::CreatedAt))
                    .col(timestamp_now(VehicleModels::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(VehicleModels::Table, VehicleModels::BrandId)
                            .to(VehicleBrands::Table, VehicleBrands::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VehicleModels::Table, VehicleModels::CategoryId)
                            .to(VehicleCategories::Table, VehicleCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_vehicle_models_brand_name")
                    .table(VehicleModels::Table)
                    .col(VehicleModels::BrandId)
                    .col(VehicleModels::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductCategories::Table)
                    .if_not_exists()
                    .col(pk(ProductCategories::Id))
                    .col(unique_text(ProductCategories::Code))
                    .col(text(ProductCategories::Name))
                    .col(long_text_null(ProductCategories::Description))
                    .col(fk_null(ProductCategories::ParentId))
                    .col(
                        ColumnDef::new(ProductCategories::Level)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(text(ProductCategories::Path))
                    .col(flag(ProductCategories::IsActive, true))
                    .col(timestamp_now(ProductCategories::CreatedAt))
                    .col(timestamp_now(ProductCategories::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProductCategories::Table, ProductCategories::ParentId)
                            .to(ProductCategories::Table, ProductCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_categories_path")
                    .table(ProductCategories::Table)
                    .col(ProductCategories::Path)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk(Products::Id))
                    .col(unique_text(Products::Sku))
                    .col(text(Products::Name))
                    .col(fk(Products::CategoryId))
                    .col(text(Products::Unit))
                    .col(money(Products::CostPrice))
                    .col(money(Products::SellingPrice))
                    .col(
                        ColumnDef::new(Products::StockQuantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::MinStock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(flag(Products::IsActive, true))
                    .col(timestamp_now(Products::CreatedAt))
                    .col(timestamp_now(Products::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Products::Table, Products::CategoryId)
                            .to(ProductCategories::Table, ProductCategories::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleModels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleBrands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Customers {
    Table,
    Id,
    CustomerCode,
    Name,
    CustomerType,
    Phone,
    Email,
    Address,
    IdCardNumber,
    Notes,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    SupplierCode,
    Name,
    SupplierType,
    ContactPerson,
    Phone,
    Email,
    Address,
    Notes,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum VehicleBrands {
    Table,
    Id,
    Code,
    Name,
    CountryOfOrigin,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum VehicleCategories {
    Table,
    Id,
    Code,
    Name,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum VehicleModels {
    Table,
    Id,
    Code,
    BrandId,
    CategoryId,
    Name,
    YearStart,
    YearEnd,
    EngineCapacityCc,
    FuelType,
    Transmission,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProductCategories {
    Table,
    Id,
    Code,
    Name,
    Description,
    ParentId,
    Level,
    Path,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    Sku,
    Name,
    CategoryId,
    Unit,
    CostPrice,
    SellingPrice,
    StockQuantity,
    MinStock,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
