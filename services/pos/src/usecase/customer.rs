use chrono::Utc;
use serde::Deserialize;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::CustomerType;

use crate::domain::patch::CustomerPatch;
use crate::domain::repository::{CustomerRepository, SequencePort};
use crate::domain::types::{Customer, MasterFilter};
use crate::error::{PosError, Resource};
use crate::usecase::{ensure_contact_free, next_number, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub customer_type: CustomerType,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub id_card_number: Option<String>,
    pub notes: Option<String>,
}

pub struct CustomerService<R: CustomerRepository, N: SequencePort> {
    pub repo: R,
    pub seq: N,
}

impl<R: CustomerRepository, N: SequencePort> CustomerService<R, N> {
    pub async fn create(
        &self,
        input: CreateCustomerInput,
        created_by: i64,
    ) -> Result<Customer, PosError> {
        let phone = required("phone", &input.phone)?;
        let email = optional(input.email);
        ensure_contact_free::<Customer, _>(&self.repo, &phone, email.as_deref(), None).await?;

        let now = Utc::now();
        let mut customer = Customer {
            id: 0,
            customer_code: next_number(&self.seq, DocumentKind::Customer, now).await?,
            name: required("name", &input.name)?,
            customer_type: input.customer_type,
            phone,
            email,
            address: optional(input.address),
            id_card_number: optional(input.id_card_number),
            notes: optional(input.notes),
            is_active: true,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        customer.id = self.repo.create(&customer).await?;
        Ok(customer)
    }

    pub async fn get(&self, id: i64) -> Result<Customer, PosError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Customer))
    }

    pub async fn list(
        &self,
        filter: &MasterFilter,
        page: PageRequest,
    ) -> Result<Page<Customer>, PosError> {
        self.repo.list(filter, page.clamped()).await
    }

    pub async fn update(&self, id: i64, patch: CustomerPatch) -> Result<Customer, PosError> {
        let mut customer = self.get(id).await?;
        patch.apply_to(&mut customer);
        customer.name = required("name", &customer.name)?;
        customer.phone = required("phone", &customer.phone)?;
        customer.email = optional(customer.email);
        ensure_contact_free::<Customer, _>(
            &self.repo,
            &customer.phone,
            customer.email.as_deref(),
            Some(id),
        )
        .await?;
        customer.updated_at = Utc::now();
        self.repo.update(&customer).await?;
        Ok(customer)
    }

    /// Soft delete.
    pub async fn delete(&self, id: i64) -> Result<(), PosError> {
        let mut customer = self.get(id).await?;
        customer.is_active = false;
        customer.updated_at = Utc::now();
        self.repo.update(&customer).await
    }
}
