use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCustomerRepository, DbProductCategoryRepository, DbProductRepository, DbRepairRepository,
    DbSequence, DbSessionRepository, DbSupplierRepository, DbUserRepository,
    DbVehicleBrandRepository, DbVehicleCategoryRepository, DbVehicleModelRepository,
    DbVehiclePurchaseRepository,
};
use crate::usecase::auth::{AuthService, AuthSettings};
use crate::usecase::customer::CustomerService;
use crate::usecase::product_catalog::ProductCatalogService;
use crate::usecase::repair::RepairService;
use crate::usecase::supplier::SupplierService;
use crate::usecase::user::UserService;
use crate::usecase::vehicle_catalog::VehicleCatalogService;
use crate::usecase::vehicle_purchase::VehiclePurchaseService;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn sequence(&self) -> DbSequence {
        DbSequence {
            db: self.db.clone(),
        }
    }

    pub fn customer_repo(&self) -> DbCustomerRepository {
        DbCustomerRepository {
            db: self.db.clone(),
        }
    }

    pub fn supplier_repo(&self) -> DbSupplierRepository {
        DbSupplierRepository {
            db: self.db.clone(),
        }
    }

    pub fn vehicle_model_repo(&self) -> DbVehicleModelRepository {
        DbVehicleModelRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn purchase_repo(&self) -> DbVehiclePurchaseRepository {
        DbVehiclePurchaseRepository {
            db: self.db.clone(),
        }
    }

    // ── Services ─────────────────────────────────────────────────────────────

    pub fn auth_service(&self) -> AuthService<DbUserRepository, DbSessionRepository> {
        AuthService {
            users: self.user_repo(),
            sessions: self.session_repo(),
            settings: self.auth.clone(),
        }
    }

    pub fn user_service(&self) -> UserService<DbUserRepository> {
        UserService {
            users: self.user_repo(),
        }
    }

    pub fn customer_service(&self) -> CustomerService<DbCustomerRepository, DbSequence> {
        CustomerService {
            repo: self.customer_repo(),
            seq: self.sequence(),
        }
    }

    pub fn supplier_service(&self) -> SupplierService<DbSupplierRepository, DbSequence> {
        SupplierService {
            repo: self.supplier_repo(),
            seq: self.sequence(),
        }
    }

    pub fn vehicle_catalog_service(
        &self,
    ) -> VehicleCatalogService<
        DbVehicleBrandRepository,
        DbVehicleCategoryRepository,
        DbVehicleModelRepository,
        DbSequence,
    > {
        VehicleCatalogService {
            brands: DbVehicleBrandRepository {
                db: self.db.clone(),
            },
            categories: DbVehicleCategoryRepository {
                db: self.db.clone(),
            },
            models: self.vehicle_model_repo(),
            seq: self.sequence(),
        }
    }

    pub fn product_catalog_service(
        &self,
    ) -> ProductCatalogService<DbProductCategoryRepository, DbProductRepository> {
        ProductCatalogService {
            categories: DbProductCategoryRepository {
                db: self.db.clone(),
            },
            products: self.product_repo(),
        }
    }

    pub fn vehicle_purchase_service(
        &self,
    ) -> VehiclePurchaseService<
        DbVehiclePurchaseRepository,
        DbCustomerRepository,
        DbVehicleModelRepository,
        DbSequence,
    > {
        VehiclePurchaseService {
            repo: self.purchase_repo(),
            customers: self.customer_repo(),
            models: self.vehicle_model_repo(),
            seq: self.sequence(),
        }
    }

    pub fn repair_service(
        &self,
    ) -> RepairService<
        DbRepairRepository,
        DbVehiclePurchaseRepository,
        DbUserRepository,
        DbProductRepository,
        DbSequence,
    > {
        RepairService {
            repo: DbRepairRepository {
                db: self.db.clone(),
            },
            transactions: self.purchase_repo(),
            users: self.user_repo(),
            products: self.product_repo(),
            seq: self.sequence(),
        }
    }
}
