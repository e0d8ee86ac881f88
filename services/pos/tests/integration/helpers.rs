use std::cmp::Reverse;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::user::UserRole;
use showroom_domain::workflow::{
    ApprovalStatus, DamageStatus, InspectionStatus, PartsUsageStatus, PaymentStatus,
    TransactionStatus, WorkDetailStatus, WorkOrderStatus,
};
use showroom_testing::auth::TEST_JWT_SECRET;

use showroom_pos::domain::repository::{
    ContactLookup, CustomerRepository, PartsDecision, ProductCategoryRepository,
    ProductRepository, RepairRepository, SequencePort, SessionRepository, SupplierRepository,
    UserRepository, VehicleBrandRepository, VehicleCategoryRepository, VehicleModelRepository,
    VehiclePurchaseRepository,
};
use showroom_pos::domain::stats::{
    MechanicMetrics, PeriodStatistics, PurchaseDashboard, QualityMetrics, RepairDashboard,
    StatusBucket, WorkOrderSummary,
};
use showroom_pos::domain::types::{
    Customer, MasterFilter, PartsUsage, Product, ProductCategory, ProductFilter,
    PurchasePayment, PurchaseTransaction, QualityInspection, Session, Supplier,
    TransactionFilter, User, UserFilter, VehicleBrand, VehicleCategory, VehicleDamage,
    VehicleModel, VehicleModelFilter, WorkDetail, WorkOrder, WorkOrderFilter,
};
use showroom_pos::error::PosError;
use showroom_pos::password::hash_password;
use showroom_pos::usecase::auth::{AuthService, AuthSettings};
use showroom_pos::usecase::customer::CustomerService;
use showroom_pos::usecase::product_catalog::ProductCatalogService;
use showroom_pos::usecase::repair::RepairService;
use showroom_pos::usecase::supplier::SupplierService;
use showroom_pos::usecase::user::UserService;
use showroom_pos::usecase::vehicle_catalog::VehicleCatalogService;
use showroom_pos::usecase::vehicle_purchase::VehiclePurchaseService;

// ── Store ────────────────────────────────────────────────────────────────────

trait Row: Clone {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! rows {
    ($($ty:ty),+ $(,)?) => {
        $(impl Row for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })+
    };
}

rows!(
    User,
    Session,
    Customer,
    Supplier,
    VehicleBrand,
    VehicleCategory,
    VehicleModel,
    ProductCategory,
    Product,
    PurchaseTransaction,
    PurchasePayment,
    VehicleDamage,
    WorkOrder,
    WorkDetail,
    PartsUsage,
    QualityInspection,
);

#[derive(Default)]
pub struct Store {
    next_id: i64,
    pub users: Vec<User>,
    pub sessions: Vec<Session>,
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub brands: Vec<VehicleBrand>,
    pub vehicle_categories: Vec<VehicleCategory>,
    pub models: Vec<VehicleModel>,
    pub product_categories: Vec<ProductCategory>,
    pub products: Vec<Product>,
    pub transactions: Vec<PurchaseTransaction>,
    pub payments: Vec<PurchasePayment>,
    pub damages: Vec<VehicleDamage>,
    pub work_orders: Vec<WorkOrder>,
    pub work_details: Vec<WorkDetail>,
    pub parts_usage: Vec<PartsUsage>,
    pub inspections: Vec<QualityInspection>,
}

fn insert<T: Row>(next_id: &mut i64, rows: &mut Vec<T>, row: &T) -> i64 {
    *next_id += 1;
    let mut row = row.clone();
    row.set_id(*next_id);
    rows.push(row);
    *next_id
}

fn put<T: Row>(rows: &mut [T], row: &T) {
    if let Some(slot) = rows.iter_mut().find(|r| r.id() == row.id()) {
        *slot = row.clone();
    }
}

fn by_id<T: Row>(rows: &[T], id: i64) -> Option<T> {
    rows.iter().find(|r| r.id() == id).cloned()
}

/// In-memory stand-in for every repository. Clones share one store.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub store: Arc<Mutex<Store>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }
}

// Same ranking as the SQL: longest first, then lexical.
fn max_number<'a>(numbers: impl Iterator<Item = &'a str>, prefix: &str) -> Option<String> {
    numbers
        .filter(|n| n.starts_with(prefix))
        .max_by_key(|n| (n.len(), *n))
        .map(str::to_owned)
}

fn avg(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn avg_opt(values: impl Iterator<Item = Option<i16>>) -> Option<f64> {
    let values: Vec<f64> = values.flatten().map(f64::from).collect();
    (!values.is_empty()).then(|| avg(&values))
}

// ── Users and sessions ───────────────────────────────────────────────────────

impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, PosError> {
        Ok(by_id(&self.lock().users, id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PosError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PosError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.users, user))
    }

    async fn update(&self, user: &User) -> Result<(), PosError> {
        put(&mut self.lock().users, user);
        Ok(())
    }

    async fn update_ending_sessions(&self, user: &User) -> Result<u64, PosError> {
        let store = &mut *self.lock();
        put(&mut store.users, user);
        Ok(end_sessions(&mut store.sessions, user.id, user.updated_at))
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> Result<Page<User>, PosError> {
        let search = MasterFilter {
            search: filter.search.clone(),
            is_active: filter.is_active,
        };
        let users = self
            .lock()
            .users
            .iter()
            .filter(|u| filter.role.is_none_or(|r| r == u.role))
            .filter(|u| search.matches(u.is_active, &[&u.username, &u.email, &u.full_name]))
            .cloned()
            .collect();
        Ok(Page::slice(users, page))
    }

    async fn count(&self) -> Result<u64, PosError> {
        Ok(self.lock().users.len() as u64)
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), PosError> {
        if let Some(u) = self.lock().users.iter_mut().find(|u| u.id == id) {
            u.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn set_created_by(&self, id: i64, creator: i64) -> Result<(), PosError> {
        if let Some(u) = self.lock().users.iter_mut().find(|u| u.id == id) {
            u.created_by = Some(creator);
        }
        Ok(())
    }
}

impl SessionRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>, PosError> {
        Ok(by_id(&self.lock().sessions, id))
    }

    async fn create(&self, session: &Session) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.sessions, session))
    }

    async fn set_token(
        &self,
        id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), PosError> {
        if let Some(s) = self.lock().sessions.iter_mut().find(|s| s.id == id) {
            s.token = token.to_owned();
            s.expires_at = expires_at;
        }
        Ok(())
    }

    async fn deactivate(&self, id: i64, at: DateTime<Utc>) -> Result<bool, PosError> {
        let mut store = self.lock();
        match store.sessions.iter_mut().find(|s| s.id == id && s.is_active) {
            Some(s) => {
                s.is_active = false;
                s.logout_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_all(&self, user_id: i64, at: DateTime<Utc>) -> Result<u64, PosError> {
        Ok(end_sessions(&mut self.lock().sessions, user_id, at))
    }

    async fn list_active(&self, user_id: i64) -> Result<Vec<Session>, PosError> {
        let mut sessions: Vec<Session> = self
            .lock()
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_active)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| Reverse(s.login_at));
        Ok(sessions)
    }
}

fn end_sessions(sessions: &mut [Session], user_id: i64, at: DateTime<Utc>) -> u64 {
    let mut ended = 0;
    for s in sessions
        .iter_mut()
        .filter(|s| s.user_id == user_id && s.is_active)
    {
        s.is_active = false;
        s.logout_at = Some(at);
        ended += 1;
    }
    ended
}

impl SequencePort for MemoryDb {
    async fn last_number(
        &self,
        kind: DocumentKind,
        prefix: &str,
    ) -> Result<Option<String>, PosError> {
        let s = self.lock();
        Ok(match kind {
            DocumentKind::Customer => {
                max_number(s.customers.iter().map(|r| r.customer_code.as_str()), prefix)
            }
            DocumentKind::Supplier => {
                max_number(s.suppliers.iter().map(|r| r.supplier_code.as_str()), prefix)
            }
            DocumentKind::VehicleBrand => max_number(s.brands.iter().map(|r| r.code.as_str()), prefix),
            DocumentKind::VehicleCategory => {
                max_number(s.vehicle_categories.iter().map(|r| r.code.as_str()), prefix)
            }
            DocumentKind::VehicleModel => max_number(s.models.iter().map(|r| r.code.as_str()), prefix),
            DocumentKind::PurchaseTransaction => max_number(
                s.transactions.iter().map(|r| r.transaction_number.as_str()),
                prefix,
            ),
            DocumentKind::PurchasePayment => {
                max_number(s.payments.iter().map(|r| r.payment_number.as_str()), prefix)
            }
            DocumentKind::VehicleDamage => {
                max_number(s.damages.iter().map(|r| r.damage_number.as_str()), prefix)
            }
            DocumentKind::WorkOrder => max_number(
                s.work_orders.iter().map(|r| r.work_order_number.as_str()),
                prefix,
            ),
            DocumentKind::WorkDetail => {
                max_number(s.work_details.iter().map(|r| r.detail_number.as_str()), prefix)
            }
            DocumentKind::PartsUsage => {
                max_number(s.parts_usage.iter().map(|r| r.usage_number.as_str()), prefix)
            }
            DocumentKind::QualityInspection => max_number(
                s.inspections.iter().map(|r| r.inspection_number.as_str()),
                prefix,
            ),
        })
    }
}

// ── Master data ──────────────────────────────────────────────────────────────

impl ContactLookup<Customer> for MemoryDb {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, PosError> {
        Ok(self.lock().customers.iter().find(|c| c.phone == phone).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, PosError> {
        Ok(self
            .lock()
            .customers
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }
}

impl CustomerRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, PosError> {
        Ok(by_id(&self.lock().customers, id))
    }

    async fn create(&self, customer: &Customer) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.customers, customer))
    }

    async fn update(&self, customer: &Customer) -> Result<(), PosError> {
        put(&mut self.lock().customers, customer);
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Customer>, PosError> {
        let mut rows: Vec<Customer> = self
            .lock()
            .customers
            .iter()
            .filter(|c| {
                filter.matches(
                    c.is_active,
                    &[&c.name, &c.customer_code, &c.phone, c.email.as_deref().unwrap_or("")],
                )
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::slice(rows, page))
    }
}

impl ContactLookup<Supplier> for MemoryDb {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Supplier>, PosError> {
        Ok(self.lock().suppliers.iter().find(|c| c.phone == phone).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Supplier>, PosError> {
        Ok(self
            .lock()
            .suppliers
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }
}

impl SupplierRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, PosError> {
        Ok(by_id(&self.lock().suppliers, id))
    }

    async fn create(&self, supplier: &Supplier) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.suppliers, supplier))
    }

    async fn update(&self, supplier: &Supplier) -> Result<(), PosError> {
        put(&mut self.lock().suppliers, supplier);
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Supplier>, PosError> {
        let mut rows: Vec<Supplier> = self
            .lock()
            .suppliers
            .iter()
            .filter(|s| filter.matches(s.is_active, &[&s.name, &s.supplier_code, &s.phone]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::slice(rows, page))
    }
}

impl VehicleBrandRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleBrand>, PosError> {
        Ok(by_id(&self.lock().brands, id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleBrand>, PosError> {
        Ok(self
            .lock()
            .brands
            .iter()
            .find(|b| b.name == name)
            .cloned())
    }

    async fn create(&self, brand: &VehicleBrand) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.brands, brand))
    }

    async fn update(&self, brand: &VehicleBrand) -> Result<(), PosError> {
        put(&mut self.lock().brands, brand);
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleBrand>, PosError> {
        let mut rows: Vec<VehicleBrand> = self
            .lock()
            .brands
            .iter()
            .filter(|b| filter.matches(b.is_active, &[&b.name, &b.code]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::slice(rows, page))
    }
}

impl VehicleCategoryRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleCategory>, PosError> {
        Ok(by_id(&self.lock().vehicle_categories, id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleCategory>, PosError> {
        Ok(self
            .lock()
            .vehicle_categories
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn create(&self, category: &VehicleCategory) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(
            &mut store.next_id,
            &mut store.vehicle_categories,
            category,
        ))
    }

    async fn update(&self, category: &VehicleCategory) -> Result<(), PosError> {
        put(&mut self.lock().vehicle_categories, category);
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleCategory>, PosError> {
        let mut rows: Vec<VehicleCategory> = self
            .lock()
            .vehicle_categories
            .iter()
            .filter(|c| filter.matches(c.is_active, &[&c.name, &c.code]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::slice(rows, page))
    }
}

impl VehicleModelRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleModel>, PosError> {
        Ok(by_id(&self.lock().models, id))
    }

    async fn find_by_brand_and_name(
        &self,
        brand_id: i64,
        name: &str,
    ) -> Result<Option<VehicleModel>, PosError> {
        Ok(self
            .lock()
            .models
            .iter()
            .find(|m| m.brand_id == brand_id && m.name == name)
            .cloned())
    }

    async fn create(&self, model: &VehicleModel) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.models, model))
    }

    async fn update(&self, model: &VehicleModel) -> Result<(), PosError> {
        put(&mut self.lock().models, model);
        Ok(())
    }

    async fn list(
        &self,
        filter: &VehicleModelFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleModel>, PosError> {
        let mut rows: Vec<VehicleModel> = self
            .lock()
            .models
            .iter()
            .filter(|m| filter.brand_id.is_none_or(|b| b == m.brand_id))
            .filter(|m| filter.category_id.is_none_or(|c| c == m.category_id))
            .filter(|m| filter.base.matches(m.is_active, &[&m.name, &m.code]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::slice(rows, page))
    }
}

impl ProductCategoryRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductCategory>, PosError> {
        Ok(by_id(&self.lock().product_categories, id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ProductCategory>, PosError> {
        Ok(self
            .lock()
            .product_categories
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn create(&self, category: &ProductCategory) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(
            &mut store.next_id,
            &mut store.product_categories,
            category,
        ))
    }

    async fn update(&self, category: &ProductCategory) -> Result<(), PosError> {
        put(&mut self.lock().product_categories, category);
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<ProductCategory>, PosError> {
        let mut rows: Vec<ProductCategory> = self
            .lock()
            .product_categories
            .iter()
            .filter(|c| filter.matches(c.is_active, &[&c.name, &c.code]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Page::slice(rows, page))
    }

    async fn move_subtree(
        &self,
        category: &ProductCategory,
        old_path: &str,
        old_level: i32,
    ) -> Result<u64, PosError> {
        let store = &mut *self.lock();
        let stored = by_id(&store.product_categories, category.id);
        if stored.is_none_or(|c| c.path != old_path) {
            return Err(PosError::conflict("product category was moved by another request"));
        }
        put(&mut store.product_categories, category);
        let prefix = format!("{old_path}/");
        let mut moved = 0;
        for node in store
            .product_categories
            .iter_mut()
            .filter(|c| c.path.starts_with(&prefix))
        {
            node.path = format!("{}{}", category.path, &node.path[old_path.len()..]);
            node.level += category.level - old_level;
            node.updated_at = category.updated_at;
            moved += 1;
        }
        Ok(moved)
    }

    async fn count_active_children(&self, parent_id: i64) -> Result<u64, PosError> {
        Ok(self
            .lock()
            .product_categories
            .iter()
            .filter(|c| c.parent_id == Some(parent_id) && c.is_active)
            .count() as u64)
    }
}

impl ProductRepository for MemoryDb {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, PosError> {
        Ok(by_id(&self.lock().products, id))
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, PosError> {
        Ok(self.lock().products.iter().find(|p| p.sku == sku).cloned())
    }

    async fn create(&self, product: &Product) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.products, product))
    }

    async fn update(&self, product: &Product) -> Result<(), PosError> {
        let mut store = self.lock();
        if let Some(slot) = store.products.iter_mut().find(|p| p.id == product.id) {
            let stock = slot.stock_quantity;
            *slot = product.clone();
            slot.stock_quantity = stock;
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, PosError> {
        let mut rows: Vec<Product> = self
            .lock()
            .products
            .iter()
            .filter(|p| filter.category_id.is_none_or(|c| c == p.category_id))
            .filter(|p| !filter.low_stock || p.stock_quantity <= p.min_stock)
            .filter(|p| filter.base.matches(p.is_active, &[&p.name, &p.sku]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Page::slice(rows, page))
    }

    async fn adjust_stock(&self, id: i64, delta: i32) -> Result<bool, PosError> {
        let mut store = self.lock();
        match store.products.iter_mut().find(|p| p.id == id) {
            Some(p) if p.stock_quantity + delta >= 0 => {
                p.stock_quantity += delta;
                p.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ── Vehicle purchase ─────────────────────────────────────────────────────────

impl VehiclePurchaseRepository for MemoryDb {
    async fn find_transaction(&self, id: i64) -> Result<Option<PurchaseTransaction>, PosError> {
        Ok(by_id(&self.lock().transactions, id).filter(|t| t.is_active))
    }

    async fn find_transaction_by_number(
        &self,
        number: &str,
    ) -> Result<Option<PurchaseTransaction>, PosError> {
        Ok(self
            .lock()
            .transactions
            .iter()
            .find(|t| t.transaction_number == number && t.is_active)
            .cloned())
    }

    async fn find_transaction_by_vin(
        &self,
        vin: &str,
    ) -> Result<Option<PurchaseTransaction>, PosError> {
        Ok(self
            .lock()
            .transactions
            .iter()
            .find(|t| t.vin == vin && t.is_active)
            .cloned())
    }

    async fn vin_owner(&self, vin: &str) -> Result<Option<i64>, PosError> {
        Ok(self
            .lock()
            .transactions
            .iter()
            .find(|t| t.vin == vin)
            .map(|t| t.id))
    }

    async fn create_transaction(&self, tx: &PurchaseTransaction) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.transactions, tx))
    }

    async fn update_transaction(&self, tx: &PurchaseTransaction) -> Result<(), PosError> {
        put(&mut self.lock().transactions, tx);
        Ok(())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError> {
        let search = MasterFilter {
            search: filter.search.clone(),
            is_active: Some(true),
        };
        let mut rows: Vec<PurchaseTransaction> = self
            .lock()
            .transactions
            .iter()
            .filter(|t| filter.status.is_none_or(|s| s == t.status))
            .filter(|t| filter.customer_id.is_none_or(|c| c == t.customer_id))
            .filter(|t| {
                search.matches(
                    t.is_active,
                    &[&t.transaction_number, &t.vin, &t.customer_name],
                )
            })
            .cloned()
            .collect();
        rows.sort_by_key(|t| Reverse((t.created_at, t.id)));
        Ok(Page::slice(rows, page))
    }

    async fn pending_approval(
        &self,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError> {
        let mut rows: Vec<PurchaseTransaction> = self
            .lock()
            .transactions
            .iter()
            .filter(|t| t.is_active && t.status == TransactionStatus::Inspection)
            .cloned()
            .collect();
        rows.sort_by_key(|t| (t.created_at, t.id));
        Ok(Page::slice(rows, page))
    }

    async fn find_payment(&self, id: i64) -> Result<Option<PurchasePayment>, PosError> {
        Ok(by_id(&self.lock().payments, id).filter(|p| p.is_active))
    }

    async fn create_payment(&self, payment: &PurchasePayment) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.payments, payment))
    }

    async fn update_payment(&self, payment: &PurchasePayment) -> Result<(), PosError> {
        put(&mut self.lock().payments, payment);
        Ok(())
    }

    async fn list_payments(&self, transaction_id: i64) -> Result<Vec<PurchasePayment>, PosError> {
        let mut rows: Vec<PurchasePayment> = self
            .lock()
            .payments
            .iter()
            .filter(|p| p.transaction_id == transaction_id && p.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.payment_date);
        Ok(rows)
    }

    async fn dashboard(&self, now: DateTime<Utc>) -> Result<PurchaseDashboard, PosError> {
        let s = self.lock();
        let active: Vec<&PurchaseTransaction> =
            s.transactions.iter().filter(|t| t.is_active).collect();
        let count = |status: TransactionStatus| {
            active.iter().filter(|t| t.status == status).count() as i64
        };
        let valued: Vec<Decimal> = active
            .iter()
            .filter(|t| {
                matches!(
                    t.status,
                    TransactionStatus::Approved | TransactionStatus::Completed
                )
            })
            .map(|t| t.purchase_price)
            .collect();
        let total_purchase_value: Decimal = valued.iter().copied().sum();
        let average_purchase_value = if valued.is_empty() {
            Decimal::ZERO
        } else {
            (total_purchase_value / Decimal::from(valued.len() as i64)).round_dp(2)
        };
        let payments = s.payments.iter().filter(|p| p.is_active);
        Ok(PurchaseDashboard {
            total_transactions: active.len() as i64,
            pending: count(TransactionStatus::Pending),
            inspection: count(TransactionStatus::Inspection),
            approved: count(TransactionStatus::Approved),
            rejected: count(TransactionStatus::Rejected),
            completed: count(TransactionStatus::Completed),
            cancelled: count(TransactionStatus::Cancelled),
            total_purchase_value,
            average_purchase_value,
            completed_payment_total: payments
                .clone()
                .filter(|p| p.status == PaymentStatus::Completed)
                .map(|p| p.amount)
                .sum(),
            pending_payment_count: payments
                .filter(|p| p.status == PaymentStatus::Pending)
                .count() as i64,
            this_month_transactions: active
                .iter()
                .filter(|t| t.created_at.year() == now.year() && t.created_at.month() == now.month())
                .count() as i64,
        })
    }

    async fn period_statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodStatistics, PosError> {
        let s = self.lock();
        let in_range: Vec<&PurchaseTransaction> = s
            .transactions
            .iter()
            .filter(|t| t.is_active && t.created_at >= from && t.created_at < to)
            .collect();
        let mut by_status: Vec<StatusBucket> = TransactionStatus::ALL
            .iter()
            .filter_map(|status| {
                let rows: Vec<_> = in_range.iter().filter(|t| t.status == *status).collect();
                (!rows.is_empty()).then(|| StatusBucket {
                    status: status.as_str().to_owned(),
                    count: rows.len() as i64,
                    total_value: rows.iter().map(|t| t.purchase_price).sum(),
                })
            })
            .collect();
        by_status.sort_by(|a, b| a.status.cmp(&b.status));
        Ok(PeriodStatistics {
            total_count: in_range.len() as i64,
            total_value: in_range.iter().map(|t| t.purchase_price).sum(),
            by_status,
        })
    }
}

// ── Repair ───────────────────────────────────────────────────────────────────

impl RepairRepository for MemoryDb {
    async fn find_damage(&self, id: i64) -> Result<Option<VehicleDamage>, PosError> {
        Ok(by_id(&self.lock().damages, id).filter(|d| d.is_active))
    }

    async fn create_damage(&self, damage: &VehicleDamage) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.damages, damage))
    }

    async fn update_damage(&self, damage: &VehicleDamage) -> Result<(), PosError> {
        put(&mut self.lock().damages, damage);
        Ok(())
    }

    async fn list_damages(&self, transaction_id: i64) -> Result<Vec<VehicleDamage>, PosError> {
        let mut rows: Vec<VehicleDamage> = self
            .lock()
            .damages
            .iter()
            .filter(|d| d.transaction_id == transaction_id && d.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|d| (Reverse(d.severity.rank()), d.created_at));
        Ok(rows)
    }

    async fn find_work_order(&self, id: i64) -> Result<Option<WorkOrder>, PosError> {
        Ok(by_id(&self.lock().work_orders, id).filter(|o| o.is_active))
    }

    async fn create_work_order(&self, order: &WorkOrder) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.work_orders, order))
    }

    async fn update_work_order(&self, order: &WorkOrder) -> Result<(), PosError> {
        put(&mut self.lock().work_orders, order);
        Ok(())
    }

    async fn list_work_orders(
        &self,
        filter: &WorkOrderFilter,
        page: PageRequest,
    ) -> Result<Page<WorkOrder>, PosError> {
        let mut rows: Vec<WorkOrder> = self
            .lock()
            .work_orders
            .iter()
            .filter(|o| o.is_active)
            .filter(|o| filter.status.is_none_or(|s| s == o.status))
            .filter(|o| filter.priority.is_none_or(|p| p == o.priority))
            .filter(|o| filter.transaction_id.is_none_or(|t| t == o.transaction_id))
            .filter(|o| filter.mechanic_id.is_none_or(|m| Some(m) == o.assigned_mechanic_id))
            .cloned()
            .collect();
        rows.sort_by_key(|o| Reverse((o.created_at, o.id)));
        Ok(Page::slice(rows, page))
    }

    async fn find_work_detail(&self, id: i64) -> Result<Option<WorkDetail>, PosError> {
        Ok(by_id(&self.lock().work_details, id).filter(|d| d.is_active))
    }

    async fn create_work_detail(&self, detail: &WorkDetail) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.work_details, detail))
    }

    async fn update_work_detail(&self, detail: &WorkDetail) -> Result<(), PosError> {
        put(&mut self.lock().work_details, detail);
        Ok(())
    }

    async fn list_work_details(&self, work_order_id: i64) -> Result<Vec<WorkDetail>, PosError> {
        Ok(self
            .lock()
            .work_details
            .iter()
            .filter(|d| d.work_order_id == work_order_id && d.is_active)
            .cloned()
            .collect())
    }

    async fn find_parts_usage(&self, id: i64) -> Result<Option<PartsUsage>, PosError> {
        Ok(by_id(&self.lock().parts_usage, id).filter(|u| u.is_active))
    }

    async fn create_parts_usage(&self, usage: &PartsUsage) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.parts_usage, usage))
    }

    async fn record_parts_decision(&self, usage: &PartsUsage) -> Result<PartsDecision, PosError> {
        let store = &mut *self.lock();
        let pending = store
            .parts_usage
            .iter()
            .any(|u| u.id == usage.id && u.is_active && u.status == PartsUsageStatus::Pending);
        if !pending {
            return Ok(PartsDecision::NotPending);
        }
        if usage.status == PartsUsageStatus::Approved {
            match store.products.iter_mut().find(|p| p.id == usage.product_id) {
                Some(p) if p.stock_quantity >= usage.quantity => {
                    p.stock_quantity -= usage.quantity;
                    p.updated_at = Utc::now();
                }
                _ => return Ok(PartsDecision::InsufficientStock),
            }
        }
        put(&mut store.parts_usage, usage);
        Ok(PartsDecision::Recorded)
    }

    async fn list_parts_usage(&self, work_detail_id: i64) -> Result<Vec<PartsUsage>, PosError> {
        Ok(self
            .lock()
            .parts_usage
            .iter()
            .filter(|u| u.work_detail_id == work_detail_id && u.is_active)
            .cloned()
            .collect())
    }

    async fn pending_parts_usage(
        &self,
        page: PageRequest,
    ) -> Result<Page<PartsUsage>, PosError> {
        let rows = self
            .lock()
            .parts_usage
            .iter()
            .filter(|u| u.is_active && u.status == PartsUsageStatus::Pending)
            .cloned()
            .collect();
        Ok(Page::slice(rows, page))
    }

    async fn find_inspection(&self, id: i64) -> Result<Option<QualityInspection>, PosError> {
        Ok(by_id(&self.lock().inspections, id).filter(|i| i.is_active))
    }

    async fn create_inspection(&self, inspection: &QualityInspection) -> Result<i64, PosError> {
        let store = &mut *self.lock();
        Ok(insert(&mut store.next_id, &mut store.inspections, inspection))
    }

    async fn update_inspection(&self, inspection: &QualityInspection) -> Result<(), PosError> {
        put(&mut self.lock().inspections, inspection);
        Ok(())
    }

    async fn schedule_rework(
        &self,
        inspection: &QualityInspection,
        order: &WorkOrder,
    ) -> Result<(), PosError> {
        let store = &mut *self.lock();
        put(&mut store.inspections, inspection);
        put(&mut store.work_orders, order);
        Ok(())
    }

    async fn list_inspections(
        &self,
        work_order_id: i64,
    ) -> Result<Vec<QualityInspection>, PosError> {
        let mut rows: Vec<QualityInspection> = self
            .lock()
            .inspections
            .iter()
            .filter(|i| i.work_order_id == work_order_id && i.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|i| Reverse(i.inspection_date));
        Ok(rows)
    }

    async fn work_order_summary(&self, work_order_id: i64) -> Result<WorkOrderSummary, PosError> {
        let s = self.lock();
        let details: Vec<&WorkDetail> = s
            .work_details
            .iter()
            .filter(|d| d.work_order_id == work_order_id && d.is_active)
            .collect();
        let detail_ids: Vec<i64> = details.iter().map(|d| d.id).collect();
        let usage = s
            .parts_usage
            .iter()
            .filter(|u| u.is_active && detail_ids.contains(&u.work_detail_id));
        let completion: Vec<f64> = details
            .iter()
            .map(|d| f64::from(d.completion_percentage))
            .collect();
        Ok(WorkOrderSummary {
            total_details: details.len() as i64,
            completed_details: details
                .iter()
                .filter(|d| d.status == WorkDetailStatus::Completed)
                .count() as i64,
            quality_checked_details: details.iter().filter(|d| d.quality_checked).count() as i64,
            average_completion: avg(&completion),
            estimated_hours: details.iter().map(|d| d.estimated_hours).sum(),
            actual_hours: details.iter().map(|d| d.actual_hours).sum(),
            labor_cost: details.iter().map(|d| d.labor_cost).sum(),
            parts_cost: usage
                .clone()
                .filter(|u| u.status == PartsUsageStatus::Approved)
                .map(|u| u.total_price)
                .sum(),
            pending_parts_requests: usage
                .filter(|u| u.status == PartsUsageStatus::Pending)
                .count() as i64,
        })
    }

    async fn repair_dashboard(&self) -> Result<RepairDashboard, PosError> {
        let s = self.lock();
        let orders: Vec<&WorkOrder> = s.work_orders.iter().filter(|o| o.is_active).collect();
        let count = |status: WorkOrderStatus| {
            orders.iter().filter(|o| o.status == status).count() as i64
        };
        Ok(RepairDashboard {
            total_work_orders: orders.len() as i64,
            draft: count(WorkOrderStatus::Draft),
            scheduled: count(WorkOrderStatus::Scheduled),
            in_progress: count(WorkOrderStatus::InProgress),
            suspended: count(WorkOrderStatus::Suspended),
            completed: count(WorkOrderStatus::Completed),
            cancelled: count(WorkOrderStatus::Cancelled),
            pending_approval: orders
                .iter()
                .filter(|o| o.approval_status == ApprovalStatus::Pending)
                .count() as i64,
            open_damages: s
                .damages
                .iter()
                .filter(|d| {
                    d.is_active
                        && !matches!(d.status, DamageStatus::Completed | DamageStatus::Cancelled)
                })
                .count() as i64,
            pending_parts_requests: s
                .parts_usage
                .iter()
                .filter(|u| u.is_active && u.status == PartsUsageStatus::Pending)
                .count() as i64,
            total_actual_cost: orders.iter().map(|o| o.actual_cost).sum(),
        })
    }

    async fn mechanic_metrics(&self, mechanic_id: i64) -> Result<MechanicMetrics, PosError> {
        let s = self.lock();
        let orders: Vec<&WorkOrder> = s
            .work_orders
            .iter()
            .filter(|o| o.is_active && o.assigned_mechanic_id == Some(mechanic_id))
            .collect();
        let details: Vec<&WorkDetail> = s
            .work_details
            .iter()
            .filter(|d| d.is_active && d.mechanic_id == Some(mechanic_id))
            .collect();
        let completion: Vec<f64> = details
            .iter()
            .map(|d| f64::from(d.completion_percentage))
            .collect();
        Ok(MechanicMetrics {
            assigned_work_orders: orders.len() as i64,
            in_progress_work_orders: orders
                .iter()
                .filter(|o| o.status == WorkOrderStatus::InProgress)
                .count() as i64,
            completed_work_orders: orders
                .iter()
                .filter(|o| o.status == WorkOrderStatus::Completed)
                .count() as i64,
            total_details: details.len() as i64,
            completed_details: details
                .iter()
                .filter(|d| d.status == WorkDetailStatus::Completed)
                .count() as i64,
            average_completion: avg(&completion),
            actual_hours: details.iter().map(|d| d.actual_hours).sum(),
        })
    }

    async fn quality_metrics(&self) -> Result<QualityMetrics, PosError> {
        let s = self.lock();
        let rows: Vec<&QualityInspection> = s.inspections.iter().filter(|i| i.is_active).collect();
        let count = |status: InspectionStatus| {
            rows.iter().filter(|i| i.status == status).count() as i64
        };
        let passed = count(InspectionStatus::Passed);
        let failed = count(InspectionStatus::Failed);
        let conditional_pass = count(InspectionStatus::ConditionalPass);
        let needs_rework = count(InspectionStatus::NeedsRework);
        let decided = passed + failed + conditional_pass + needs_rework;
        let pass_rate = if decided == 0 {
            0.0
        } else {
            (passed + conditional_pass) as f64 * 100.0 / decided as f64
        };
        Ok(QualityMetrics {
            total_inspections: rows.len() as i64,
            scheduled: count(InspectionStatus::Scheduled),
            passed,
            failed,
            conditional_pass,
            needs_rework,
            pass_rate,
            average_overall: avg_opt(rows.iter().map(|i| i.ratings.overall)),
            average_workmanship: avg_opt(rows.iter().map(|i| i.ratings.workmanship)),
            average_safety: avg_opt(rows.iter().map(|i| i.ratings.safety)),
            average_appearance: avg_opt(rows.iter().map(|i| i.ratings.appearance)),
            average_functionality: avg_opt(rows.iter().map(|i| i.ratings.functionality)),
        })
    }
}

// ── Services over one store ──────────────────────────────────────────────────

pub fn settings() -> Arc<AuthSettings> {
    Arc::new(AuthSettings {
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl: chrono::Duration::hours(1),
    })
}

pub fn auth_service(db: &MemoryDb) -> AuthService<MemoryDb, MemoryDb> {
    AuthService {
        users: db.clone(),
        sessions: db.clone(),
        settings: settings(),
    }
}

pub fn user_service(db: &MemoryDb) -> UserService<MemoryDb> {
    UserService { users: db.clone() }
}

pub fn customer_service(db: &MemoryDb) -> CustomerService<MemoryDb, MemoryDb> {
    CustomerService {
        repo: db.clone(),
        seq: db.clone(),
    }
}

pub fn supplier_service(db: &MemoryDb) -> SupplierService<MemoryDb, MemoryDb> {
    SupplierService {
        repo: db.clone(),
        seq: db.clone(),
    }
}

pub fn vehicle_catalog_service(
    db: &MemoryDb,
) -> VehicleCatalogService<MemoryDb, MemoryDb, MemoryDb, MemoryDb> {
    VehicleCatalogService {
        brands: db.clone(),
        categories: db.clone(),
        models: db.clone(),
        seq: db.clone(),
    }
}

pub fn product_catalog_service(db: &MemoryDb) -> ProductCatalogService<MemoryDb, MemoryDb> {
    ProductCatalogService {
        categories: db.clone(),
        products: db.clone(),
    }
}

pub fn purchase_service(
    db: &MemoryDb,
) -> VehiclePurchaseService<MemoryDb, MemoryDb, MemoryDb, MemoryDb> {
    VehiclePurchaseService {
        repo: db.clone(),
        customers: db.clone(),
        models: db.clone(),
        seq: db.clone(),
    }
}

pub fn repair_service(
    db: &MemoryDb,
) -> RepairService<MemoryDb, MemoryDb, MemoryDb, MemoryDb, MemoryDb> {
    RepairService {
        repo: db.clone(),
        transactions: db.clone(),
        users: db.clone(),
        products: db.clone(),
        seq: db.clone(),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub const PASSWORD: &str = "rahasia123";

/// Insert an active account with [`PASSWORD`].
pub fn seed_user(db: &MemoryDb, username: &str, role: UserRole) -> User {
    let now = Utc::now();
    let mut user = User {
        id: 0,
        username: username.to_owned(),
        email: format!("{username}@showroom.test"),
        password_hash: hash_password(PASSWORD).unwrap(),
        full_name: username.to_owned(),
        phone: None,
        role,
        is_active: true,
        last_login_at: None,
        created_by: None,
        created_at: now,
        updated_at: now,
    };
    let store = &mut *db.lock();
    user.id = insert(&mut store.next_id, &mut store.users, &user);
    user
}
