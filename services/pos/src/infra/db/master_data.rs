use anyhow::Context as _;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Statement, TransactionError, TransactionTrait,
};

use showroom_core::sea_ext::fetch_page;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_pos_schema::{
    customers, product_categories, products, suppliers, vehicle_brands, vehicle_categories,
    vehicle_models,
};

use super::{parse_column, search, search_term, transaction_error, try_page, write_error};
use crate::domain::repository::{
    ContactLookup, CustomerRepository, ProductCategoryRepository, ProductRepository,
    SupplierRepository, VehicleBrandRepository, VehicleCategoryRepository, VehicleModelRepository,
};
use crate::domain::types::{
    Customer, MasterFilter, Product, ProductCategory, ProductFilter, Supplier, VehicleBrand,
    VehicleCategory, VehicleModel, VehicleModelFilter,
};
use crate::error::PosError;

// Prefix compared with LEFT so `_` and `%` in codes stay literal.
const MOVE_DESCENDANTS_SQL: &str = r#"
UPDATE product_categories
   SET path = $1 || SUBSTRING(path FROM $2),
       level = level + $3,
       updated_at = $4
 WHERE LEFT(path, $5) = $6
"#;

/// Apply the active flag and free-text search shared by master-data lists.
fn filtered<E: EntityTrait>(
    mut query: Select<E>,
    filter: &MasterFilter,
    active: E::Column,
    searchable: &[E::Column],
) -> Select<E> {
    if let Some(is_active) = filter.is_active {
        query = query.filter(active.eq(is_active));
    }
    if let Some(term) = search_term(filter.search.as_deref()) {
        query = query.filter(search(term, searchable));
    }
    query
}

// ── Customers ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCustomerRepository {
    pub db: DatabaseConnection,
}

impl ContactLookup<Customer> for DbCustomerRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, PosError> {
        let model = customers::Entity::find()
            .filter(customers::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find customer by phone")?;
        model.map(customer_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, PosError> {
        let model = customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find customer by email")?;
        model.map(customer_from_model).transpose()
    }
}

impl CustomerRepository for DbCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, PosError> {
        let model = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find customer by id")?;
        model.map(customer_from_model).transpose()
    }

    async fn create(&self, customer: &Customer) -> Result<i64, PosError> {
        let mut am = customer_to_active(customer);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create customer"))?;
        Ok(model.id)
    }

    async fn update(&self, customer: &Customer) -> Result<(), PosError> {
        customer_to_active(customer)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update customer"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Customer>, PosError> {
        let query = filtered(
            customers::Entity::find(),
            filter,
            customers::Column::IsActive,
            &[
                customers::Column::CustomerCode,
                customers::Column::Name,
                customers::Column::Phone,
                customers::Column::Email,
            ],
        );
        let page = fetch_page(query.order_by_asc(customers::Column::Name), &self.db, page)
            .await
            .context("list customers")?;
        try_page(page, customer_from_model)
    }
}

fn customer_to_active(c: &Customer) -> customers::ActiveModel {
    customers::ActiveModel {
        id: Set(c.id),
        customer_code: Set(c.customer_code.clone()),
        name: Set(c.name.clone()),
        customer_type: Set(c.customer_type.as_str().to_owned()),
        phone: Set(c.phone.clone()),
        email: Set(c.email.clone()),
        address: Set(c.address.clone()),
        id_card_number: Set(c.id_card_number.clone()),
        notes: Set(c.notes.clone()),
        is_active: Set(c.is_active),
        created_by: Set(c.created_by),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

fn customer_from_model(m: customers::Model) -> Result<Customer, PosError> {
    Ok(Customer {
        id: m.id,
        customer_code: m.customer_code,
        name: m.name,
        customer_type: parse_column(&m.customer_type)?,
        phone: m.phone,
        email: m.email,
        address: m.address,
        id_card_number: m.id_card_number,
        notes: m.notes,
        is_active: m.is_active,
        created_by: m.created_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

// ── Suppliers ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSupplierRepository {
    pub db: DatabaseConnection,
}

impl ContactLookup<Supplier> for DbSupplierRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Supplier>, PosError> {
        let model = suppliers::Entity::find()
            .filter(suppliers::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find supplier by phone")?;
        model.map(supplier_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Supplier>, PosError> {
        let model = suppliers::Entity::find()
            .filter(suppliers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find supplier by email")?;
        model.map(supplier_from_model).transpose()
    }
}

impl SupplierRepository for DbSupplierRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, PosError> {
        let model = suppliers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find supplier by id")?;
        model.map(supplier_from_model).transpose()
    }

    async fn create(&self, supplier: &Supplier) -> Result<i64, PosError> {
        let mut am = supplier_to_active(supplier);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create supplier"))?;
        Ok(model.id)
    }

    async fn update(&self, supplier: &Supplier) -> Result<(), PosError> {
        supplier_to_active(supplier)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update supplier"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Supplier>, PosError> {
        let query = filtered(
            suppliers::Entity::find(),
            filter,
            suppliers::Column::IsActive,
            &[
                suppliers::Column::SupplierCode,
                suppliers::Column::Name,
                suppliers::Column::ContactPerson,
                suppliers::Column::Phone,
                suppliers::Column::Email,
            ],
        );
        let page = fetch_page(query.order_by_asc(suppliers::Column::Name), &self.db, page)
            .await
            .context("list suppliers")?;
        try_page(page, supplier_from_model)
    }
}

fn supplier_to_active(s: &Supplier) -> suppliers::ActiveModel {
    suppliers::ActiveModel {
        id: Set(s.id),
        supplier_code: Set(s.supplier_code.clone()),
        name: Set(s.name.clone()),
        supplier_type: Set(s.supplier_type.as_str().to_owned()),
        contact_person: Set(s.contact_person.clone()),
        phone: Set(s.phone.clone()),
        email: Set(s.email.clone()),
        address: Set(s.address.clone()),
        notes: Set(s.notes.clone()),
        is_active: Set(s.is_active),
        created_by: Set(s.created_by),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

fn supplier_from_model(m: suppliers::Model) -> Result<Supplier, PosError> {
    Ok(Supplier {
        id: m.id,
        supplier_code: m.supplier_code,
        name: m.name,
        supplier_type: parse_column(&m.supplier_type)?,
        contact_person: m.contact_person,
        phone: m.phone,
        email: m.email,
        address: m.address,
        notes: m.notes,
        is_active: m.is_active,
        created_by: m.created_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

// ── Vehicle brands and categories ────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVehicleBrandRepository {
    pub db: DatabaseConnection,
}

impl VehicleBrandRepository for DbVehicleBrandRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleBrand>, PosError> {
        let model = vehicle_brands::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find vehicle brand by id")?;
        Ok(model.map(brand_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleBrand>, PosError> {
        let model = vehicle_brands::Entity::find()
            .filter(vehicle_brands::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find vehicle brand by name")?;
        Ok(model.map(brand_from_model))
    }

    async fn create(&self, brand: &VehicleBrand) -> Result<i64, PosError> {
        let mut am = brand_to_active(brand);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create vehicle brand"))?;
        Ok(model.id)
    }

    async fn update(&self, brand: &VehicleBrand) -> Result<(), PosError> {
        brand_to_active(brand)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update vehicle brand"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleBrand>, PosError> {
        let query = filtered(
            vehicle_brands::Entity::find(),
            filter,
            vehicle_brands::Column::IsActive,
            &[vehicle_brands::Column::Code, vehicle_brands::Column::Name],
        );
        let page = fetch_page(query.order_by_asc(vehicle_brands::Column::Name), &self.db, page)
            .await
            .context("list vehicle brands")?;
        Ok(page.map(brand_from_model))
    }
}

fn brand_to_active(b: &VehicleBrand) -> vehicle_brands::ActiveModel {
    vehicle_brands::ActiveModel {
        id: Set(b.id),
        code: Set(b.code.clone()),
        name: Set(b.name.clone()),
        country_of_origin: Set(b.country_of_origin.clone()),
        description: Set(b.description.clone()),
        is_active: Set(b.is_active),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

fn brand_from_model(m: vehicle_brands::Model) -> VehicleBrand {
    VehicleBrand {
        id: m.id,
        code: m.code,
        name: m.name,
        country_of_origin: m.country_of_origin,
        description: m.description,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[derive(Clone)]
pub struct DbVehicleCategoryRepository {
    pub db: DatabaseConnection,
}

impl VehicleCategoryRepository for DbVehicleCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleCategory>, PosError> {
        let model = vehicle_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find vehicle category by id")?;
        Ok(model.map(vehicle_category_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleCategory>, PosError> {
        let model = vehicle_categories::Entity::find()
            .filter(vehicle_categories::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find vehicle category by name")?;
        Ok(model.map(vehicle_category_from_model))
    }

    async fn create(&self, category: &VehicleCategory) -> Result<i64, PosError> {
        let mut am = vehicle_category_to_active(category);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create vehicle category"))?;
        Ok(model.id)
    }

    async fn update(&self, category: &VehicleCategory) -> Result<(), PosError> {
        vehicle_category_to_active(category)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update vehicle category"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleCategory>, PosError> {
        let query = filtered(
            vehicle_categories::Entity::find(),
            filter,
            vehicle_categories::Column::IsActive,
            &[vehicle_categories::Column::Code, vehicle_categories::Column::Name],
        );
        let page = fetch_page(
            query.order_by_asc(vehicle_categories::Column::Name),
            &self.db,
            page,
        )
        .await
        .context("list vehicle categories")?;
        Ok(page.map(vehicle_category_from_model))
    }
}

fn vehicle_category_to_active(c: &VehicleCategory) -> vehicle_categories::ActiveModel {
    vehicle_categories::ActiveModel {
        id: Set(c.id),
        code: Set(c.code.clone()),
        name: Set(c.name.clone()),
        description: Set(c.description.clone()),
        is_active: Set(c.is_active),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

fn vehicle_category_from_model(m: vehicle_categories::Model) -> VehicleCategory {
    VehicleCategory {
        id: m.id,
        code: m.code,
        name: m.name,
        description: m.description,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Vehicle models ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVehicleModelRepository {
    pub db: DatabaseConnection,
}

impl VehicleModelRepository for DbVehicleModelRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleModel>, PosError> {
        let model = vehicle_models::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find vehicle model by id")?;
        Ok(model.map(vehicle_model_from_model))
    }

    async fn find_by_brand_and_name(
        &self,
        brand_id: i64,
        name: &str,
    ) -> Result<Option<VehicleModel>, PosError> {
        let model = vehicle_models::Entity::find()
            .filter(vehicle_models::Column::BrandId.eq(brand_id))
            .filter(vehicle_models::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find vehicle model by brand and name")?;
        Ok(model.map(vehicle_model_from_model))
    }

    async fn create(&self, model: &VehicleModel) -> Result<i64, PosError> {
        let mut am = vehicle_model_to_active(model);
        am.id = NotSet;
        let inserted = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create vehicle model"))?;
        Ok(inserted.id)
    }

    async fn update(&self, model: &VehicleModel) -> Result<(), PosError> {
        vehicle_model_to_active(model)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update vehicle model"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &VehicleModelFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleModel>, PosError> {
        let mut query = filtered(
            vehicle_models::Entity::find(),
            &filter.base,
            vehicle_models::Column::IsActive,
            &[vehicle_models::Column::Code, vehicle_models::Column::Name],
        );
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(vehicle_models::Column::BrandId.eq(brand_id));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(vehicle_models::Column::CategoryId.eq(category_id));
        }
        let page = fetch_page(query.order_by_asc(vehicle_models::Column::Name), &self.db, page)
            .await
            .context("list vehicle models")?;
        Ok(page.map(vehicle_model_from_model))
    }
}

fn vehicle_model_to_active(m: &VehicleModel) -> vehicle_models::ActiveModel {
    vehicle_models::ActiveModel {
        id: Set(m.id),
        code: Set(m.code.clone()),
        brand_id: Set(m.brand_id),
        category_id: Set(m.category_id),
        name: Set(m.name.clone()),
        year_start: Set(m.year_start),
        year_end: Set(m.year_end),
        engine_capacity_cc: Set(m.engine_capacity_cc),
        fuel_type: Set(m.fuel_type.clone()),
        transmission: Set(m.transmission.clone()),
        is_active: Set(m.is_active),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    }
}

fn vehicle_model_from_model(m: vehicle_models::Model) -> VehicleModel {
    VehicleModel {
        id: m.id,
        code: m.code,
        brand_id: m.brand_id,
        category_id: m.category_id,
        name: m.name,
        year_start: m.year_start,
        year_end: m.year_end,
        engine_capacity_cc: m.engine_capacity_cc,
        fuel_type: m.fuel_type,
        transmission: m.transmission,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Product categories ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductCategoryRepository {
    pub db: DatabaseConnection,
}

impl ProductCategoryRepository for DbProductCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductCategory>, PosError> {
        let model = product_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product category by id")?;
        Ok(model.map(product_category_from_model))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ProductCategory>, PosError> {
        let model = product_categories::Entity::find()
            .filter(product_categories::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find product category by code")?;
        Ok(model.map(product_category_from_model))
    }

    async fn create(&self, category: &ProductCategory) -> Result<i64, PosError> {
        let mut am = product_category_to_active(category);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create product category"))?;
        Ok(model.id)
    }

    async fn update(&self, category: &ProductCategory) -> Result<(), PosError> {
        product_category_to_active(category)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update product category"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<ProductCategory>, PosError> {
        let query = filtered(
            product_categories::Entity::find(),
            filter,
            product_categories::Column::IsActive,
            &[product_categories::Column::Code, product_categories::Column::Name],
        );
        let page = fetch_page(
            query.order_by_asc(product_categories::Column::Path),
            &self.db,
            page,
        )
        .await
        .context("list product categories")?;
        Ok(page.map(product_category_from_model))
    }

    async fn move_subtree(
        &self,
        category: &ProductCategory,
        old_path: &str,
        old_level: i32,
    ) -> Result<u64, PosError> {
        let root = product_category_to_active(category);
        let prefix = format!("{old_path}/");
        let values: Vec<sea_orm::Value> = vec![
            category.path.clone().into(),
            (old_path.chars().count() as i32 + 1).into(),
            (category.level - old_level).into(),
            category.updated_at.into(),
            (prefix.chars().count() as i32).into(),
            prefix.into(),
        ];
        let old_path = old_path.to_owned();
        let moved = self
            .db
            .transaction::<_, u64, DbErr>(|txn| {
                Box::pin(async move {
                    product_categories::Entity::update(root)
                        .filter(product_categories::Column::Path.eq(old_path))
                        .exec(txn)
                        .await?;
                    let result = txn
                        .execute(Statement::from_sql_and_values(
                            txn.get_database_backend(),
                            MOVE_DESCENDANTS_SQL,
                            values,
                        ))
                        .await?;
                    Ok(result.rows_affected())
                })
            })
            .await;
        match moved {
            Err(TransactionError::Transaction(DbErr::RecordNotUpdated)) => Err(
                PosError::conflict("product category was moved by another request"),
            ),
            other => other.map_err(|e| transaction_error(e, "move product category")),
        }
    }

    async fn count_active_children(&self, parent_id: i64) -> Result<u64, PosError> {
        let count = product_categories::Entity::find()
            .filter(product_categories::Column::ParentId.eq(parent_id))
            .filter(product_categories::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .context("count active product category children")?;
        Ok(count)
    }
}

fn product_category_to_active(c: &ProductCategory) -> product_categories::ActiveModel {
    product_categories::ActiveModel {
        id: Set(c.id),
        code: Set(c.code.clone()),
        name: Set(c.name.clone()),
        description: Set(c.description.clone()),
        parent_id: Set(c.parent_id),
        level: Set(c.level),
        path: Set(c.path.clone()),
        is_active: Set(c.is_active),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

fn product_category_from_model(m: product_categories::Model) -> ProductCategory {
    ProductCategory {
        id: m.id,
        code: m.code,
        name: m.name,
        description: m.description,
        parent_id: m.parent_id,
        level: m.level,
        path: m.path,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, PosError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, PosError> {
        let model = products::Entity::find()
            .filter(products::Column::Sku.eq(sku))
            .one(&self.db)
            .await
            .context("find product by sku")?;
        Ok(model.map(product_from_model))
    }

    async fn create(&self, product: &Product) -> Result<i64, PosError> {
        let mut am = product_to_active(product);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create product"))?;
        Ok(model.id)
    }

    /// Stock is left alone; it only moves through `adjust_stock`.
    async fn update(&self, product: &Product) -> Result<(), PosError> {
        let mut am = product_to_active(product);
        am.stock_quantity = NotSet;
        am.update(&self.db)
            .await
            .map_err(|e| write_error(e, "update product"))?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, PosError> {
        let mut query = filtered(
            products::Entity::find(),
            &filter.base,
            products::Column::IsActive,
            &[products::Column::Sku, products::Column::Name],
        );
        if let Some(category_id) = filter.category_id {
            query = query.filter(products::Column::CategoryId.eq(category_id));
        }
        if filter.low_stock {
            query = query.filter(
                Expr::col(products::Column::StockQuantity).lte(Expr::col(products::Column::MinStock)),
            );
        }
        let page = fetch_page(query.order_by_asc(products::Column::Name), &self.db, page)
            .await
            .context("list products")?;
        Ok(page.map(product_from_model))
    }

    async fn adjust_stock(&self, id: i64, delta: i32) -> Result<bool, PosError> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                r#"
                UPDATE products
                   SET stock_quantity = stock_quantity + $1, updated_at = NOW()
                 WHERE id = $2 AND stock_quantity + $1 >= 0
                "#,
                [delta.into(), id.into()],
            ))
            .await
            .context("adjust product stock")?;
        Ok(result.rows_affected() > 0)
    }
}

fn product_to_active(p: &Product) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(p.id),
        sku: Set(p.sku.clone()),
        name: Set(p.name.clone()),
        category_id: Set(p.category_id),
        unit: Set(p.unit.clone()),
        cost_price: Set(p.cost_price),
        selling_price: Set(p.selling_price),
        stock_quantity: Set(p.stock_quantity),
        min_stock: Set(p.min_stock),
        is_active: Set(p.is_active),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

fn product_from_model(m: products::Model) -> Product {
    Product {
        id: m.id,
        sku: m.sku,
        name: m.name,
        category_id: m.category_id,
        unit: m.unit,
        cost_price: m.cost_price,
        selling_price: m.selling_price,
        stock_quantity: m.stock_quantity,
        min_stock: m.min_stock,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
