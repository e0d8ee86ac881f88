use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::{ApprovalDecision, PartsUsageStatus};

use super::RepairService;
use crate::domain::repository::{
    PartsDecision, ProductRepository, RepairRepository, SequencePort, UserRepository,
    VehiclePurchaseRepository,
};
use crate::domain::types::PartsUsage;
use crate::error::{PosError, Resource};
use crate::usecase::{next_number, non_negative, optional};

#[derive(Debug, Deserialize)]
pub struct CreatePartsUsageInput {
    pub work_detail_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Defaults to the product's selling price.
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
}

impl<R, T, U, P, N> RepairService<R, T, U, P, N>
where
    R: RepairRepository,
    T: VehiclePurchaseRepository,
    U: UserRepository,
    P: ProductRepository,
    N: SequencePort,
{
    pub async fn create_parts_usage(
        &self,
        input: CreatePartsUsageInput,
        requested_by: i64,
    ) -> Result<PartsUsage, PosError> {
        let detail = self.get_work_detail(input.work_detail_id).await?;
        let product = self
            .products
            .find_by_id(input.product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(PosError::NotFound(Resource::Product))?;
        if input.quantity <= 0 {
            return Err(PosError::validation("quantity", "quantity must be positive"));
        }
        let unit_price = match input.unit_price {
            Some(price) => non_negative("unit_price", price)?,
            None => product.selling_price,
        };

        let now = Utc::now();
        let mut usage = PartsUsage {
            id: 0,
            usage_number: next_number(&self.seq, DocumentKind::PartsUsage, now).await?,
            work_detail_id: detail.id,
            product_id: product.id,
            quantity: input.quantity,
            unit_price,
            total_price: unit_price * Decimal::from(input.quantity),
            status: PartsUsageStatus::Pending,
            requested_by,
            approved_by: None,
            approved_at: None,
            approval_notes: None,
            notes: optional(input.notes),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        usage.id = self.repo.create_parts_usage(&usage).await?;
        Ok(usage)
    }

    pub async fn get_parts_usage(&self, id: i64) -> Result<PartsUsage, PosError> {
        self.repo
            .find_parts_usage(id)
            .await?
            .ok_or(PosError::NotFound(Resource::PartsUsage))
    }

    pub async fn list_parts_usage(&self, work_detail_id: i64) -> Result<Vec<PartsUsage>, PosError> {
        self.get_work_detail(work_detail_id).await?;
        self.repo.list_parts_usage(work_detail_id).await
    }

    /// Requests still waiting at the approval gate, oldest first.
    pub async fn pending_parts_usage(&self, page: PageRequest) -> Result<Page<PartsUsage>, PosError> {
        self.repo.pending_parts_usage(page.clamped()).await
    }

    /// Approve or reject a pending request. Approval takes the quantity out
    /// of stock and fails without changes when stock is short.
    pub async fn process_parts_approval(
        &self,
        id: i64,
        decision: ApprovalDecision,
        notes: Option<String>,
        approver: i64,
    ) -> Result<PartsUsage, PosError> {
        let mut usage = self.get_parts_usage(id).await?;
        if usage.status != PartsUsageStatus::Pending {
            return Err(already_decided(usage.status));
        }

        let now = Utc::now();
        usage.status = decision.into();
        usage.approved_by = Some(approver);
        usage.approved_at = Some(now);
        usage.approval_notes = optional(notes);
        usage.updated_at = now;
        match self.repo.record_parts_decision(&usage).await? {
            PartsDecision::Recorded => {}
            PartsDecision::NotPending => {
                let current = self.get_parts_usage(id).await?;
                return Err(already_decided(current.status));
            }
            PartsDecision::InsufficientStock => {
                warn!(
                    parts_usage_id = id,
                    product_id = usage.product_id,
                    quantity = usage.quantity,
                    "parts approval refused, insufficient stock"
                );
                return Err(PosError::validation("quantity", "insufficient stock"));
            }
        }
        info!(parts_usage_id = id, decision = %decision, approver, "parts usage approval recorded");
        Ok(usage)
    }
}

fn already_decided(status: PartsUsageStatus) -> PosError {
    PosError::validation("status", format!("parts usage is already {status}"))
}
