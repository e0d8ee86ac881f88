use chrono::Utc;
use serde::Deserialize;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};

use crate::domain::patch::{VehicleBrandPatch, VehicleCategoryPatch, VehicleModelPatch};
use crate::domain::repository::{
    SequencePort, VehicleBrandRepository, VehicleCategoryRepository, VehicleModelRepository,
};
use crate::domain::types::{
    MasterFilter, VehicleBrand, VehicleCategory, VehicleModel, VehicleModelFilter,
};
use crate::error::{PosError, Resource};
use crate::usecase::{next_number, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateVehicleBrandInput {
    pub name: String,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleCategoryInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVehicleModelInput {
    pub brand_id: i64,
    pub category_id: i64,
    pub name: String,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
    pub engine_capacity_cc: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
}

/// Brands, vehicle categories and the models that reference both.
pub struct VehicleCatalogService<B, C, M, N>
where
    B: VehicleBrandRepository,
    C: VehicleCategoryRepository,
    M: VehicleModelRepository,
    N: SequencePort,
{
    pub brands: B,
    pub categories: C,
    pub models: M,
    pub seq: N,
}

impl<B, C, M, N> VehicleCatalogService<B, C, M, N>
where
    B: VehicleBrandRepository,
    C: VehicleCategoryRepository,
    M: VehicleModelRepository,
    N: SequencePort,
{
    // ── Brands ───────────────────────────────────────────────────────────────

    pub async fn create_brand(&self, input: CreateVehicleBrandInput) -> Result<VehicleBrand, PosError> {
        let name = required("name", &input.name)?;
        self.ensure_brand_name_free(&name, None).await?;
        let now = Utc::now();
        let mut brand = VehicleBrand {
            id: 0,
            code: next_number(&self.seq, DocumentKind::VehicleBrand, now).await?,
            name,
            country_of_origin: optional(input.country_of_origin),
            description: optional(input.description),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        brand.id = self.brands.create(&brand).await?;
        Ok(brand)
    }

    pub async fn get_brand(&self, id: i64) -> Result<VehicleBrand, PosError> {
        self.brands
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::VehicleBrand))
    }

    pub async fn list_brands(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleBrand>, PosError> {
        self.brands.list(filter, page.clamped()).await
    }

    pub async fn update_brand(
        &self,
        id: i64,
        patch: VehicleBrandPatch,
    ) -> Result<VehicleBrand, PosError> {
        let mut brand = self.get_brand(id).await?;
        patch.apply_to(&mut brand);
        brand.name = required("name", &brand.name)?;
        self.ensure_brand_name_free(&brand.name, Some(id)).await?;
        brand.updated_at = Utc::now();
        self.brands.update(&brand).await?;
        Ok(brand)
    }

    pub async fn delete_brand(&self, id: i64) -> Result<(), PosError> {
        let mut brand = self.get_brand(id).await?;
        brand.is_active = false;
        brand.updated_at = Utc::now();
        self.brands.update(&brand).await
    }

    async fn ensure_brand_name_free(&self, name: &str, except: Option<i64>) -> Result<(), PosError> {
        match self.brands.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(PosError::conflict(format!(
                "vehicle brand {name} already exists"
            ))),
            _ => Ok(()),
        }
    }

    // ── Categories ───────────────────────────────────────────────────────────

    pub async fn create_category(
        &self,
        input: CreateVehicleCategoryInput,
    ) -> Result<VehicleCategory, PosError> {
        let name = required("name", &input.name)?;
        self.ensure_category_name_free(&name, None).await?;
        let now = Utc::now();
        let mut category = VehicleCategory {
            id: 0,
            code: next_number(&self.seq, DocumentKind::VehicleCategory, now).await?,
            name,
            description: optional(input.description),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        category.id = self.categories.create(&category).await?;
        Ok(category)
    }

    pub async fn get_category(&self, id: i64) -> Result<VehicleCategory, PosError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::VehicleCategory))
    }

    pub async fn list_categories(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleCategory>, PosError> {
        self.categories.list(filter, page.clamped()).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        patch: VehicleCategoryPatch,
    ) -> Result<VehicleCategory, PosError> {
        let mut category = self.get_category(id).await?;
        patch.apply_to(&mut category);
        category.name = required("name", &category.name)?;
        self.ensure_category_name_free(&category.name, Some(id))
            .await?;
        category.updated_at = Utc::now();
        self.categories.update(&category).await?;
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), PosError> {
        let mut category = self.get_category(id).await?;
        category.is_active = false;
        category.updated_at = Utc::now();
        self.categories.update(&category).await
    }

    async fn ensure_category_name_free(
        &self,
        name: &str,
        except: Option<i64>,
    ) -> Result<(), PosError> {
        match self.categories.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(PosError::conflict(format!(
                "vehicle category {name} already exists"
            ))),
            _ => Ok(()),
        }
    }

    // ── Models ───────────────────────────────────────────────────────────────

    pub async fn create_model(&self, input: CreateVehicleModelInput) -> Result<VehicleModel, PosError> {
        let name = required("name", &input.name)?;
        validate_years(input.year_start, input.year_end)?;
        self.get_brand(input.brand_id).await?;
        self.get_category(input.category_id).await?;
        self.ensure_model_name_free(input.brand_id, &name, None)
            .await?;

        let now = Utc::now();
        let mut model = VehicleModel {
            id: 0,
            code: next_number(&self.seq, DocumentKind::VehicleModel, now).await?,
            brand_id: input.brand_id,
            category_id: input.category_id,
            name,
            year_start: input.year_start,
            year_end: input.year_end,
            engine_capacity_cc: input.engine_capacity_cc,
            fuel_type: optional(input.fuel_type),
            transmission: optional(input.transmission),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        model.id = self.models.create(&model).await?;
        Ok(model)
    }

    pub async fn get_model(&self, id: i64) -> Result<VehicleModel, PosError> {
        self.models
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::VehicleModel))
    }

    pub async fn list_models(
        &self,
        filter: &VehicleModelFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleModel>, PosError> {
        self.models.list(filter, page.clamped()).await
    }

    pub async fn update_model(
        &self,
        id: i64,
        patch: VehicleModelPatch,
    ) -> Result<VehicleModel, PosError> {
        let mut model = self.get_model(id).await?;
        let moves_brand = patch.brand_id.is_some_and(|b| b != model.brand_id);
        let moves_category = patch.category_id.is_some_and(|c| c != model.category_id);
        patch.apply_to(&mut model);
        model.name = required("name", &model.name)?;
        validate_years(model.year_start, model.year_end)?;
        if moves_brand {
            self.get_brand(model.brand_id).await?;
        }
        if moves_category {
            self.get_category(model.category_id).await?;
        }
        self.ensure_model_name_free(model.brand_id, &model.name, Some(id))
            .await?;
        model.updated_at = Utc::now();
        self.models.update(&model).await?;
        Ok(model)
    }

    pub async fn delete_model(&self, id: i64) -> Result<(), PosError> {
        let mut model = self.get_model(id).await?;
        model.is_active = false;
        model.updated_at = Utc::now();
        self.models.update(&model).await
    }

    async fn ensure_model_name_free(
        &self,
        brand_id: i64,
        name: &str,
        except: Option<i64>,
    ) -> Result<(), PosError> {
        match self.models.find_by_brand_and_name(brand_id, name).await? {
            Some(existing) if Some(existing.id) != except => Err(PosError::conflict(format!(
                "vehicle model {name} already exists for this brand"
            ))),
            _ => Ok(()),
        }
    }
}

fn validate_years(start: Option<i32>, end: Option<i32>) -> Result<(), PosError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(PosError::validation(
            "year_end",
            "year_end must not be before year_start",
        )),
        _ => Ok(()),
    }
}
