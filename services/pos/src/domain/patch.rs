//! Partial updates. Each patch carries only the fields the caller sent and is
//! merged onto the stored entity with `apply_to`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use showroom_domain::user::UserRole;
use showroom_domain::workflow::{CustomerType, DamageSeverity, SupplierType, WorkOrderPriority};

use crate::domain::types::{
    Customer, Product, ProductCategory, PurchaseTransaction, QualityInspection, Ratings,
    Supplier, User, VehicleBrand, VehicleCategory, VehicleDamage, VehicleModel, WorkDetail,
    WorkOrder,
};

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn set_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if let Some(v) = value {
        *target = Some(v);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn apply_to(self, user: &mut User) {
        set(&mut user.username, self.username);
        set(&mut user.email, self.email);
        set(&mut user.full_name, self.full_name);
        set_opt(&mut user.phone, self.phone);
        set(&mut user.role, self.role);
        set(&mut user.is_active, self.is_active);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub id_card_number: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

impl CustomerPatch {
    pub fn apply_to(self, customer: &mut Customer) {
        set(&mut customer.name, self.name);
        set(&mut customer.customer_type, self.customer_type);
        set(&mut customer.phone, self.phone);
        set_opt(&mut customer.email, self.email);
        set_opt(&mut customer.address, self.address);
        set_opt(&mut customer.id_card_number, self.id_card_number);
        set_opt(&mut customer.notes, self.notes);
        set(&mut customer.is_active, self.is_active);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub supplier_type: Option<SupplierType>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

impl SupplierPatch {
    pub fn apply_to(self, supplier: &mut Supplier) {
        set(&mut supplier.name, self.name);
        set(&mut supplier.supplier_type, self.supplier_type);
        set_opt(&mut supplier.contact_person, self.contact_person);
        set(&mut supplier.phone, self.phone);
        set_opt(&mut supplier.email, self.email);
        set_opt(&mut supplier.address, self.address);
        set_opt(&mut supplier.notes, self.notes);
        set(&mut supplier.is_active, self.is_active);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleBrandPatch {
    pub name: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl VehicleBrandPatch {
    pub fn apply_to(self, brand: &mut VehicleBrand) {
        set(&mut brand.name, self.name);
        set_opt(&mut brand.country_of_origin, self.country_of_origin);
        set_opt(&mut brand.description, self.description);
        set(&mut brand.is_active, self.is_active);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleCategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl VehicleCategoryPatch {
    pub fn apply_to(self, category: &mut VehicleCategory) {
        set(&mut category.name, self.name);
        set_opt(&mut category.description, self.description);
        set(&mut category.is_active, self.is_active);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleModelPatch {
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
    pub engine_capacity_cc: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub is_active: Option<bool>,
}

impl VehicleModelPatch {
    pub fn apply_to(self, model: &mut VehicleModel) {
        set(&mut model.brand_id, self.brand_id);
        set(&mut model.category_id, self.category_id);
        set(&mut model.name, self.name);
        set_opt(&mut model.year_start, self.year_start);
        set_opt(&mut model.year_end, self.year_end);
        set_opt(&mut model.engine_capacity_cc, self.engine_capacity_cc);
        set_opt(&mut model.fuel_type, self.fuel_type);
        set_opt(&mut model.transmission, self.transmission);
        set(&mut model.is_active, self.is_active);
    }
}

/// Re-parenting and deactivation go through dedicated operations because
/// they touch the rest of the tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductCategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductCategoryPatch {
    pub fn apply_to(self, category: &mut ProductCategory) {
        set(&mut category.name, self.name);
        set_opt(&mut category.description, self.description);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub unit: Option<String>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub min_stock: Option<i32>,
    pub is_active: Option<bool>,
}

impl ProductPatch {
    pub fn apply_to(self, product: &mut Product) {
        set(&mut product.name, self.name);
        set(&mut product.category_id, self.category_id);
        set(&mut product.unit, self.unit);
        set(&mut product.cost_price, self.cost_price);
        set(&mut product.selling_price, self.selling_price);
        set(&mut product.min_stock, self.min_stock);
        set(&mut product.is_active, self.is_active);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    pub vehicle_model_id: Option<i64>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub engine_number: Option<String>,
    pub manufacture_year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub asking_price: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
}

impl TransactionPatch {
    pub fn apply_to(self, tx: &mut PurchaseTransaction) {
        set_opt(&mut tx.vehicle_model_id, self.vehicle_model_id);
        set(&mut tx.vin, self.vin);
        set_opt(&mut tx.license_plate, self.license_plate);
        set_opt(&mut tx.engine_number, self.engine_number);
        set_opt(&mut tx.manufacture_year, self.manufacture_year);
        set_opt(&mut tx.color, self.color);
        set_opt(&mut tx.mileage, self.mileage);
        set(&mut tx.asking_price, self.asking_price);
        set(&mut tx.purchase_price, self.purchase_price);
        set_opt(&mut tx.notes, self.notes);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DamagePatch {
    pub damage_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub severity: Option<DamageSeverity>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
}

impl DamagePatch {
    pub fn apply_to(self, damage: &mut VehicleDamage) {
        set(&mut damage.damage_type, self.damage_type);
        set(&mut damage.description, self.description);
        set_opt(&mut damage.location, self.location);
        set(&mut damage.severity, self.severity);
        set(&mut damage.estimated_cost, self.estimated_cost);
        set_opt(&mut damage.actual_cost, self.actual_cost);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkOrderPatch {
    pub description: Option<String>,
    pub priority: Option<WorkOrderPriority>,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl WorkOrderPatch {
    pub fn apply_to(self, order: &mut WorkOrder) {
        set(&mut order.description, self.description);
        set(&mut order.priority, self.priority);
        set(&mut order.estimated_hours, self.estimated_hours);
        set(&mut order.actual_hours, self.actual_hours);
        set(&mut order.estimated_cost, self.estimated_cost);
        set(&mut order.actual_cost, self.actual_cost);
        set_opt(&mut order.scheduled_start, self.scheduled_start);
        set_opt(&mut order.scheduled_end, self.scheduled_end);
        set_opt(&mut order.notes, self.notes);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkDetailPatch {
    pub task_name: Option<String>,
    pub description: Option<String>,
    pub mechanic_id: Option<i64>,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub notes: Option<String>,
}

impl WorkDetailPatch {
    pub fn apply_to(self, detail: &mut WorkDetail) {
        set(&mut detail.task_name, self.task_name);
        set_opt(&mut detail.description, self.description);
        set_opt(&mut detail.mechanic_id, self.mechanic_id);
        set(&mut detail.estimated_hours, self.estimated_hours);
        set(&mut detail.actual_hours, self.actual_hours);
        set(&mut detail.labor_cost, self.labor_cost);
        set_opt(&mut detail.notes, self.notes);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectionPatch {
    #[serde(flatten)]
    pub ratings: Ratings,
    pub defects_found: Option<String>,
    pub recommendations: Option<String>,
    pub notes: Option<String>,
}

impl InspectionPatch {
    pub fn apply_to(self, inspection: &mut QualityInspection) {
        let current = &mut inspection.ratings;
        set_opt(&mut current.overall, self.ratings.overall);
        set_opt(&mut current.workmanship, self.ratings.workmanship);
        set_opt(&mut current.safety, self.ratings.safety);
        set_opt(&mut current.appearance, self.ratings.appearance);
        set_opt(&mut current.functionality, self.ratings.functionality);
        set_opt(&mut inspection.defects_found, self.defects_found);
        set_opt(&mut inspection.recommendations, self.recommendations);
        set_opt(&mut inspection.notes, self.notes);
    }
}
