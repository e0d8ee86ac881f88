#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};

use crate::domain::stats::{
    MechanicMetrics, PeriodStatistics, PurchaseDashboard, QualityMetrics, RepairDashboard,
    WorkOrderSummary,
};
use crate::domain::types::{
    Customer, MasterFilter, PartsUsage, Product, ProductCategory, ProductFilter,
    PurchasePayment, PurchaseTransaction, QualityInspection, Session, Supplier,
    TransactionFilter, User, UserFilter, VehicleBrand, VehicleCategory, VehicleDamage,
    VehicleModel, VehicleModelFilter, WorkDetail, WorkOrder, WorkOrderFilter,
};
use crate::error::PosError;

/// Outcome of [`RepairRepository::record_parts_decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartsDecision {
    Recorded,
    /// Another decision got there first.
    NotPending,
    InsufficientStock,
}

// `create` methods ignore the entity's `id` and return the assigned one.
// `update` methods persist every mutable column of the given entity.

/// Staff accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, PosError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PosError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PosError>;
    async fn create(&self, user: &User) -> Result<i64, PosError>;
    async fn update(&self, user: &User) -> Result<(), PosError>;
    /// Store `user` and end every active session of the account at
    /// `user.updated_at`, in one transaction. Returns the sessions ended.
    async fn update_ending_sessions(&self, user: &User) -> Result<u64, PosError>;
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> Result<Page<User>, PosError>;
    async fn count(&self) -> Result<u64, PosError>;
    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), PosError>;
    /// Second step of the bootstrap insert: point `created_by` at `creator`.
    async fn set_created_by(&self, id: i64, creator: i64) -> Result<(), PosError>;
}

/// Login sessions.
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, PosError>;
    async fn create(&self, session: &Session) -> Result<i64, PosError>;
    /// Store the token issued for the session and its new expiry.
    async fn set_token(
        &self,
        id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PosError>;
    /// Mark one session logged out. Returns `false` if it was not active.
    async fn deactivate(&self, id: i64, at: DateTime<Utc>) -> Result<bool, PosError>;
    /// Mark every active session of the user logged out. Returns the count.
    async fn deactivate_all(&self, user_id: i64, at: DateTime<Utc>) -> Result<u64, PosError>;
    async fn list_active(&self, user_id: i64) -> Result<Vec<Session>, PosError>;
}

/// Next document number support. Returns the greatest number already issued
/// under `prefix` for `kind`.
pub trait SequencePort: Send + Sync {
    async fn last_number(
        &self,
        kind: DocumentKind,
        prefix: &str,
    ) -> Result<Option<String>, PosError>;
}

/// Parties keyed by a unique phone and an optional unique email.
pub trait ContactLookup<T>: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<T>, PosError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<T>, PosError>;
}

pub trait CustomerRepository: ContactLookup<Customer> {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, PosError>;
    async fn create(&self, customer: &Customer) -> Result<i64, PosError>;
    async fn update(&self, customer: &Customer) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Customer>, PosError>;
}

pub trait SupplierRepository: ContactLookup<Supplier> {
    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, PosError>;
    async fn create(&self, supplier: &Supplier) -> Result<i64, PosError>;
    async fn update(&self, supplier: &Supplier) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Supplier>, PosError>;
}

pub trait VehicleBrandRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleBrand>, PosError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleBrand>, PosError>;
    async fn create(&self, brand: &VehicleBrand) -> Result<i64, PosError>;
    async fn update(&self, brand: &VehicleBrand) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleBrand>, PosError>;
}

pub trait VehicleCategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleCategory>, PosError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleCategory>, PosError>;
    async fn create(&self, category: &VehicleCategory) -> Result<i64, PosError>;
    async fn update(&self, category: &VehicleCategory) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleCategory>, PosError>;
}

pub trait VehicleModelRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleModel>, PosError>;
    async fn find_by_brand_and_name(
        &self,
        brand_id: i64,
        name: &str,
    ) -> Result<Option<VehicleModel>, PosError>;
    async fn create(&self, model: &VehicleModel) -> Result<i64, PosError>;
    async fn update(&self, model: &VehicleModel) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &VehicleModelFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleModel>, PosError>;
}

pub trait ProductCategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductCategory>, PosError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<ProductCategory>, PosError>;
    async fn create(&self, category: &ProductCategory) -> Result<i64, PosError>;
    async fn update(&self, category: &ProductCategory) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<ProductCategory>, PosError>;
    /// Every node whose path starts with `path/`, shallowest first.
    /// Store the re-parented `category` and rebase path and level of every
    /// node below `old_path`, in one transaction. A conflict when the stored
    /// path is no longer `old_path`. Returns how many descendants moved.
    async fn move_subtree(
        &self,
        category: &ProductCategory,
        old_path: &str,
        old_level: i32,
    ) -> Result<u64, PosError>;
    async fn count_active_children(&self, parent_id: i64) -> Result<u64, PosError>;
}

pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, PosError>;
    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, PosError>;
    async fn create(&self, product: &Product) -> Result<i64, PosError>;
    async fn update(&self, product: &Product) -> Result<(), PosError>;
    async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, PosError>;
    /// Add `delta` to the stock in one statement. Returns `false` (and changes
    /// nothing) when the result would drop below zero.
    async fn adjust_stock(&self, id: i64, delta: i32) -> Result<bool, PosError>;
}

/// Purchase transactions and their payments.
pub trait VehiclePurchaseRepository: Send + Sync {
    async fn find_transaction(&self, id: i64) -> Result<Option<PurchaseTransaction>, PosError>;
    async fn find_transaction_by_number(
        &self,
        number: &str,
    ) -> Result<Option<PurchaseTransaction>, PosError>;
    async fn find_transaction_by_vin(
        &self,
        vin: &str,
    ) -> Result<Option<PurchaseTransaction>, PosError>;
    /// Id of the transaction holding `vin`, soft-deleted ones included.
    async fn vin_owner(&self, vin: &str) -> Result<Option<i64>, PosError>;
    async fn create_transaction(&self, tx: &PurchaseTransaction) -> Result<i64, PosError>;
    async fn update_transaction(&self, tx: &PurchaseTransaction) -> Result<(), PosError>;
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError>;
    /// Active transactions waiting at the approval gate, oldest first.
    async fn pending_approval(
        &self,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError>;

    async fn find_payment(&self, id: i64) -> Result<Option<PurchasePayment>, PosError>;
    async fn create_payment(&self, payment: &PurchasePayment) -> Result<i64, PosError>;
    async fn update_payment(&self, payment: &PurchasePayment) -> Result<(), PosError>;
    async fn list_payments(&self, transaction_id: i64) -> Result<Vec<PurchasePayment>, PosError>;

    async fn dashboard(&self, now: DateTime<Utc>) -> Result<PurchaseDashboard, PosError>;
    /// Per-status buckets and their totals over `[from, to)`.
    async fn period_statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodStatistics, PosError>;
}

/// Damages, work orders, work details, parts usage and inspections.
pub trait RepairRepository: Send + Sync {
    async fn find_damage(&self, id: i64) -> Result<Option<VehicleDamage>, PosError>;
    async fn create_damage(&self, damage: &VehicleDamage) -> Result<i64, PosError>;
    async fn update_damage(&self, damage: &VehicleDamage) -> Result<(), PosError>;
    /// Active damages of a transaction, most severe first.
    async fn list_damages(&self, transaction_id: i64) -> Result<Vec<VehicleDamage>, PosError>;

    async fn find_work_order(&self, id: i64) -> Result<Option<WorkOrder>, PosError>;
    async fn create_work_order(&self, order: &WorkOrder) -> Result<i64, PosError>;
    async fn update_work_order(&self, order: &WorkOrder) -> Result<(), PosError>;
    async fn list_work_orders(
        &self,
        filter: &WorkOrderFilter,
        page: PageRequest,
    ) -> Result<Page<WorkOrder>, PosError>;

    async fn find_work_detail(&self, id: i64) -> Result<Option<WorkDetail>, PosError>;
    async fn create_work_detail(&self, detail: &WorkDetail) -> Result<i64, PosError>;
    async fn update_work_detail(&self, detail: &WorkDetail) -> Result<(), PosError>;
    async fn list_work_details(&self, work_order_id: i64) -> Result<Vec<WorkDetail>, PosError>;

    async fn find_parts_usage(&self, id: i64) -> Result<Option<PartsUsage>, PosError>;
    async fn create_parts_usage(&self, usage: &PartsUsage) -> Result<i64, PosError>;
    /// Write the decision carried by `usage` in one transaction, guarded on
    /// the stored row still being pending. An approval also takes
    /// `usage.quantity` out of stock. Nothing is written unless the outcome is
    /// [`PartsDecision::Recorded`].
    async fn record_parts_decision(&self, usage: &PartsUsage) -> Result<PartsDecision, PosError>;
    async fn list_parts_usage(&self, work_detail_id: i64) -> Result<Vec<PartsUsage>, PosError>;
    async fn pending_parts_usage(&self, page: PageRequest)
    -> Result<Page<PartsUsage>, PosError>;

    async fn find_inspection(&self, id: i64) -> Result<Option<QualityInspection>, PosError>;
    async fn create_inspection(&self, inspection: &QualityInspection) -> Result<i64, PosError>;
    async fn update_inspection(&self, inspection: &QualityInspection) -> Result<(), PosError>;
    /// Store the rework verdict and the reopened work order together.
    async fn schedule_rework(
        &self,
        inspection: &QualityInspection,
        order: &WorkOrder,
    ) -> Result<(), PosError>;
    async fn list_inspections(
        &self,
        work_order_id: i64,
    ) -> Result<Vec<QualityInspection>, PosError>;

    async fn work_order_summary(&self, work_order_id: i64) -> Result<WorkOrderSummary, PosError>;
    async fn repair_dashboard(&self) -> Result<RepairDashboard, PosError>;
    async fn mechanic_metrics(&self, mechanic_id: i64) -> Result<MechanicMetrics, PosError>;
    async fn quality_metrics(&self) -> Result<QualityMetrics, PosError>;
}
