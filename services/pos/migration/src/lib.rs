use sea_orm_migration::prelude::*;

mod columns;
mod m20261001_000001_create_users;
mod m20261001_000002_create_master_data;
mod m20261001_000003_create_vehicle_purchases;
mod m20261001_000004_create_repairs;
mod m20261001_000005_add_workflow_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_master_data::Migration),
            Box::new(m20261001_000003_create_vehicle_purchases::Migration),
            Box::new(m20261001_000004_create_repairs::Migration),
            Box::new(m20261001_000005_add_workflow_indexes::Migration),
        ]
    }
}
