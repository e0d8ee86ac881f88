use chrono::Utc;
use serde::Deserialize;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::SupplierType;

use crate::domain::patch::SupplierPatch;
use crate::domain::repository::{SequencePort, SupplierRepository};
use crate::domain::types::{MasterFilter, Supplier};
use crate::error::{PosError, Resource};
use crate::usecase::{ensure_contact_free, next_number, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub supplier_type: SupplierType,
    pub contact_person: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

pub struct SupplierService<R: SupplierRepository, N: SequencePort> {
    pub repo: R,
    pub seq: N,
}

impl<R: SupplierRepository, N: SequencePort> SupplierService<R, N> {
    pub async fn create(
        &self,
        input: CreateSupplierInput,
        created_by: i64,
    ) -> Result<Supplier, PosError> {
        let phone = required("phone", &input.phone)?;
        let email = optional(input.email);
        ensure_contact_free::<Supplier, _>(&self.repo, &phone, email.as_deref(), None).await?;

        let now = Utc::now();
        let mut supplier = Supplier {
            id: 0,
            supplier_code: next_number(&self.seq, DocumentKind::Supplier, now).await?,
            name: required("name", &input.name)?,
            supplier_type: input.supplier_type,
            contact_person: optional(input.contact_person),
            phone,
            email,
            address: optional(input.address),
            notes: optional(input.notes),
            is_active: true,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        supplier.id = self.repo.create(&supplier).await?;
        Ok(supplier)
    }

    pub async fn get(&self, id: i64) -> Result<Supplier, PosError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Supplier))
    }

    pub async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Supplier>, PosError> {
        self.repo.list(filter, page.clamped()).await
    }

    pub async fn update(&self, id: i64, patch: SupplierPatch) -> Result<Supplier, PosError> {
        let mut supplier = self.get(id).await?;
        patch.apply_to(&mut supplier);
        supplier.name = required("name", &supplier.name)?;
        supplier.phone = required("phone", &supplier.phone)?;
        supplier.email = optional(supplier.email);
        ensure_contact_free::<Supplier, _>(
            &self.repo,
            &supplier.phone,
            supplier.email.as_deref(),
            Some(id),
        )
        .await?;
        supplier.updated_at = Utc::now();
        self.repo.update(&supplier).await?;
        Ok(supplier)
    }

    /// Soft delete.
    pub async fn delete(&self, id: i64) -> Result<(), PosError> {
        let mut supplier = self.get(id).await?;
        supplier.is_active = false;
        supplier.updated_at = Utc::now();
        self.repo.update(&supplier).await
    }
}
