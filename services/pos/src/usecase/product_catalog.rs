use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use showroom_domain::pagination::{Page, PageRequest};

use crate::domain::patch::{ProductCategoryPatch, ProductPatch};
use crate::domain::repository::{ProductCategoryRepository, ProductRepository};
use crate::domain::types::{MasterFilter, Product, ProductCategory, ProductFilter};
use crate::error::{PosError, Resource};
use crate::usecase::{non_negative, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateProductCategoryInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub sku: String,
    pub name: String,
    pub category_id: i64,
    pub unit: String,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub selling_price: Decimal,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub min_stock: i32,
}

/// Product category tree and the products filed under it.
pub struct ProductCatalogService<C: ProductCategoryRepository, P: ProductRepository> {
    pub categories: C,
    pub products: P,
}

impl<C: ProductCategoryRepository, P: ProductRepository> ProductCatalogService<C, P> {
    // ── Category tree ────────────────────────────────────────────────────────

    pub async fn create_category(
        &self,
        input: CreateProductCategoryInput,
    ) -> Result<ProductCategory, PosError> {
        let code = validate_code(&input.code)?;
        if self.categories.find_by_code(&code).await?.is_some() {
            return Err(PosError::conflict(format!(
                "product category {code} already exists"
            )));
        }
        let parent = match input.parent_id {
            Some(parent_id) => Some(self.active_parent(parent_id).await?),
            None => None,
        };
        let (level, path) = ProductCategory::placement(&code, parent.as_ref());

        let now = Utc::now();
        let mut category = ProductCategory {
            id: 0,
            code,
            name: required("name", &input.name)?,
            description: optional(input.description),
            parent_id: input.parent_id,
            level,
            path,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        category.id = self.categories.create(&category).await?;
        Ok(category)
    }

    pub async fn get_category(&self, id: i64) -> Result<ProductCategory, PosError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::ProductCategory))
    }

    pub async fn list_categories(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<ProductCategory>, PosError> {
        self.categories.list(filter, page.clamped()).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        patch: ProductCategoryPatch,
    ) -> Result<ProductCategory, PosError> {
        let mut category = self.get_category(id).await?;
        patch.apply_to(&mut category);
        category.name = required("name", &category.name)?;
        category.updated_at = Utc::now();
        self.categories.update(&category).await?;
        Ok(category)
    }

    /// Re-parent a category (or make it a root with `None`). Paths and levels
    /// of the whole subtree follow.
    pub async fn move_category(
        &self,
        id: i64,
        parent_id: Option<i64>,
    ) -> Result<ProductCategory, PosError> {
        let mut category = self.get_category(id).await?;
        if parent_id == Some(id) {
            return Err(PosError::validation(
                "parent_id",
                "category cannot be its own parent",
            ));
        }
        let parent = match parent_id {
            Some(parent_id) => {
                let parent = self.active_parent(parent_id).await?;
                if parent.is_descendant_of(&category) {
                    return Err(PosError::validation(
                        "parent_id",
                        "category cannot be moved below its own descendant",
                    ));
                }
                Some(parent)
            }
            None => None,
        };

        let old_path = std::mem::take(&mut category.path);
        let old_level = category.level;
        let (level, path) = ProductCategory::placement(&category.code, parent.as_ref());
        category.parent_id = parent_id;
        category.level = level;
        category.path = path;
        category.updated_at = Utc::now();
        let moved = self
            .categories
            .move_subtree(&category, &old_path, old_level)
            .await?;
        info!(category_id = id, path = %category.path, moved, "product category moved");
        Ok(category)
    }

    /// Deactivate a leaf (or a node whose children are all inactive).
    pub async fn deactivate_category(&self, id: i64) -> Result<ProductCategory, PosError> {
        let mut category = self.get_category(id).await?;
        if self.categories.count_active_children(id).await? > 0 {
            return Err(PosError::conflict(
                "product category still has active children",
            ));
        }
        category.is_active = false;
        category.updated_at = Utc::now();
        self.categories.update(&category).await?;
        Ok(category)
    }

    async fn active_parent(&self, parent_id: i64) -> Result<ProductCategory, PosError> {
        let parent = self.get_category(parent_id).await?;
        if !parent.is_active {
            return Err(PosError::validation(
                "parent_id",
                "parent category is inactive",
            ));
        }
        Ok(parent)
    }

    // ── Products ─────────────────────────────────────────────────────────────

    pub async fn create_product(&self, input: CreateProductInput) -> Result<Product, PosError> {
        let sku = required("sku", &input.sku)?;
        if self.products.find_by_sku(&sku).await?.is_some() {
            return Err(PosError::conflict(format!("product {sku} already exists")));
        }
        self.active_category(input.category_id).await?;
        if input.stock_quantity < 0 || input.min_stock < 0 {
            return Err(PosError::validation(
                "stock_quantity",
                "stock quantities must not be negative",
            ));
        }

        let now = Utc::now();
        let mut product = Product {
            id: 0,
            sku,
            name: required("name", &input.name)?,
            category_id: input.category_id,
            unit: required("unit", &input.unit)?,
            cost_price: non_negative("cost_price", input.cost_price)?,
            selling_price: non_negative("selling_price", input.selling_price)?,
            stock_quantity: input.stock_quantity,
            min_stock: input.min_stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        product.id = self.products.create(&product).await?;
        Ok(product)
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, PosError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Product))
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, PosError> {
        self.products.list(filter, page.clamped()).await
    }

    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<Product, PosError> {
        let mut product = self.get_product(id).await?;
        if let Some(category_id) = patch.category_id.filter(|c| *c != product.category_id) {
            self.active_category(category_id).await?;
        }
        patch.apply_to(&mut product);
        product.name = required("name", &product.name)?;
        product.unit = required("unit", &product.unit)?;
        non_negative("cost_price", product.cost_price)?;
        non_negative("selling_price", product.selling_price)?;
        if product.min_stock < 0 {
            return Err(PosError::validation(
                "min_stock",
                "min_stock must not be negative",
            ));
        }
        product.updated_at = Utc::now();
        self.products.update(&product).await?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), PosError> {
        let mut product = self.get_product(id).await?;
        product.is_active = false;
        product.updated_at = Utc::now();
        self.products.update(&product).await
    }

    /// Manual stock correction (goods received, stock take).
    pub async fn adjust_stock(&self, id: i64, delta: i32) -> Result<Product, PosError> {
        self.get_product(id).await?;
        if !self.products.adjust_stock(id, delta).await? {
            return Err(PosError::validation(
                "quantity",
                "stock cannot drop below zero",
            ));
        }
        self.get_product(id).await
    }

    async fn active_category(&self, id: i64) -> Result<ProductCategory, PosError> {
        let category = self.get_category(id).await?;
        if !category.is_active {
            return Err(PosError::validation(
                "category_id",
                "product category is inactive",
            ));
        }
        Ok(category)
    }
}

fn validate_code(code: &str) -> Result<String, PosError> {
    let code = required("code", code)?;
    if code.contains('/') {
        return Err(PosError::validation("code", "code must not contain '/'"));
    }
    Ok(code)
}
