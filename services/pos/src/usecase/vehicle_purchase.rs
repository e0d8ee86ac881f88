use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::{
    ApprovalDecision, PaymentDecision, PaymentMethod, PaymentStatus, TransactionStatus,
    is_valid_rating,
};

use crate::domain::patch::TransactionPatch;
use crate::domain::repository::{
    CustomerRepository, SequencePort, VehicleModelRepository, VehiclePurchaseRepository,
};
use crate::domain::stats::{PeriodStatistics, PurchaseDashboard};
use crate::domain::types::{PurchasePayment, PurchaseTransaction, TransactionFilter};
use crate::error::{PosError, Resource};
use crate::usecase::{next_number, non_negative, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateTransactionInput {
    pub customer_id: i64,
    pub vehicle_model_id: Option<i64>,
    pub vin: String,
    pub license_plate: Option<String>,
    pub engine_number: Option<String>,
    pub manufacture_year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    #[serde(default)]
    pub asking_price: Decimal,
    #[serde(default)]
    pub purchase_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentInput {
    pub transaction_id: i64,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_date: Option<DateTime<Utc>>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

pub struct VehiclePurchaseService<T, C, M, N>
where
    T: VehiclePurchaseRepository,
    C: CustomerRepository,
    M: VehicleModelRepository,
    N: SequencePort,
{
    pub repo: T,
    pub customers: C,
    pub models: M,
    pub seq: N,
}

impl<T, C, M, N> VehiclePurchaseService<T, C, M, N>
where
    T: VehiclePurchaseRepository,
    C: CustomerRepository,
    M: VehicleModelRepository,
    N: SequencePort,
{
    // ── Transactions ─────────────────────────────────────────────────────────

    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
        created_by: i64,
    ) -> Result<PurchaseTransaction, PosError> {
        let customer = self
            .customers
            .find_by_id(input.customer_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or(PosError::NotFound(Resource::Customer))?;
        if let Some(model_id) = input.vehicle_model_id {
            self.ensure_model(model_id).await?;
        }
        let vin = normalize_vin(&input.vin)?;
        self.ensure_vin_free(&vin, None).await?;

        let now = Utc::now();
        let mut tx = PurchaseTransaction {
            id: 0,
            transaction_number: next_number(&self.seq, DocumentKind::PurchaseTransaction, now)
                .await?,
            customer_id: customer.id,
            customer_name: customer.name,
            vehicle_model_id: input.vehicle_model_id,
            vin,
            license_plate: optional(input.license_plate),
            engine_number: optional(input.engine_number),
            manufacture_year: input.manufacture_year,
            color: optional(input.color),
            mileage: input.mileage,
            asking_price: non_negative("asking_price", input.asking_price)?,
            purchase_price: non_negative("purchase_price", input.purchase_price)?,
            condition_rating: None,
            inspection_notes: None,
            inspected_by: None,
            inspected_at: None,
            status: TransactionStatus::Pending,
            notes: optional(input.notes),
            approved_by: None,
            approved_at: None,
            approval_notes: None,
            created_by,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tx.id = self.repo.create_transaction(&tx).await?;
        info!(
            transaction_id = tx.id,
            number = %tx.transaction_number,
            "purchase transaction created"
        );
        Ok(tx)
    }

    pub async fn get_transaction(&self, id: i64) -> Result<PurchaseTransaction, PosError> {
        self.repo
            .find_transaction(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Transaction))
    }

    pub async fn get_transaction_by_number(
        &self,
        number: &str,
    ) -> Result<PurchaseTransaction, PosError> {
        self.repo
            .find_transaction_by_number(number.trim())
            .await?
            .ok_or(PosError::NotFound(Resource::Transaction))
    }

    pub async fn get_transaction_by_vin(&self, vin: &str) -> Result<PurchaseTransaction, PosError> {
        self.repo
            .find_transaction_by_vin(&normalize_vin(vin)?)
            .await?
            .ok_or(PosError::NotFound(Resource::Transaction))
    }

    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError> {
        self.repo.list_transactions(filter, page.clamped()).await
    }

    pub async fn pending_approval(
        &self,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError> {
        self.repo.pending_approval(page.clamped()).await
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        patch: TransactionPatch,
    ) -> Result<PurchaseTransaction, PosError> {
        let mut tx = self.get_transaction(id).await?;
        if let Some(model_id) = patch.vehicle_model_id {
            self.ensure_model(model_id).await?;
        }
        patch.apply_to(&mut tx);
        tx.vin = normalize_vin(&tx.vin)?;
        self.ensure_vin_free(&tx.vin, Some(id)).await?;
        non_negative("asking_price", tx.asking_price)?;
        non_negative("purchase_price", tx.purchase_price)?;
        tx.updated_at = Utc::now();
        self.repo.update_transaction(&tx).await?;
        Ok(tx)
    }

    /// General status update. Any member of the status set may follow any
    /// other.
    pub async fn update_status(
        &self,
        id: i64,
        status: TransactionStatus,
        notes: Option<String>,
    ) -> Result<PurchaseTransaction, PosError> {
        let mut tx = self.get_transaction(id).await?;
        tx.status = status;
        if let Some(notes) = optional(notes) {
            tx.notes = Some(notes);
        }
        tx.updated_at = Utc::now();
        self.repo.update_transaction(&tx).await?;
        Ok(tx)
    }

    /// Record the vehicle inspection and move the transaction to the approval
    /// gate.
    pub async fn complete_inspection(
        &self,
        id: i64,
        condition_rating: i16,
        notes: Option<String>,
        inspector: i64,
    ) -> Result<PurchaseTransaction, PosError> {
        if !is_valid_rating(condition_rating) {
            return Err(PosError::validation(
                "condition_rating",
                "condition_rating must be between 1 and 10",
            ));
        }
        let mut tx = self.get_transaction(id).await?;
        let now = Utc::now();
        tx.condition_rating = Some(condition_rating);
        tx.inspection_notes = optional(notes);
        tx.inspected_by = Some(inspector);
        tx.inspected_at = Some(now);
        tx.status = TransactionStatus::Inspection;
        tx.updated_at = now;
        self.repo.update_transaction(&tx).await?;
        info!(transaction_id = id, condition_rating, "inspection completed");
        Ok(tx)
    }

    /// Approval gate. The previous status is not checked, so a second call
    /// overwrites the first decision.
    pub async fn process_approval(
        &self,
        id: i64,
        decision: ApprovalDecision,
        notes: Option<String>,
        approver: i64,
    ) -> Result<PurchaseTransaction, PosError> {
        let mut tx = self.get_transaction(id).await?;
        let now = Utc::now();
        tx.status = decision.into();
        tx.approved_by = Some(approver);
        tx.approved_at = Some(now);
        tx.approval_notes = optional(notes);
        tx.updated_at = now;
        self.repo.update_transaction(&tx).await?;
        info!(transaction_id = id, decision = %decision, approver, "transaction approval recorded");
        Ok(tx)
    }

    /// Soft delete.
    pub async fn delete_transaction(&self, id: i64) -> Result<(), PosError> {
        let mut tx = self.get_transaction(id).await?;
        tx.is_active = false;
        tx.updated_at = Utc::now();
        self.repo.update_transaction(&tx).await
    }

    // ── Payments ─────────────────────────────────────────────────────────────

    pub async fn create_payment(
        &self,
        input: CreatePaymentInput,
        created_by: i64,
    ) -> Result<PurchasePayment, PosError> {
        let tx = self.get_transaction(input.transaction_id).await?;
        if input.amount <= Decimal::ZERO {
            return Err(PosError::validation("amount", "amount must be positive"));
        }

        let now = Utc::now();
        let mut payment = PurchasePayment {
            id: 0,
            payment_number: next_number(&self.seq, DocumentKind::PurchasePayment, now).await?,
            transaction_id: tx.id,
            amount: input.amount,
            payment_method: input.payment_method,
            payment_date: input.payment_date.unwrap_or(now),
            reference_number: optional(input.reference_number),
            status: PaymentStatus::Pending,
            notes: optional(input.notes),
            processed_by: None,
            processed_at: None,
            approved_by: None,
            approved_at: None,
            approval_notes: None,
            created_by,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        payment.id = self.repo.create_payment(&payment).await?;
        info!(
            payment_id = payment.id,
            transaction_id = tx.id,
            number = %payment.payment_number,
            "payment created"
        );
        Ok(payment)
    }

    pub async fn get_payment(&self, id: i64) -> Result<PurchasePayment, PosError> {
        self.repo
            .find_payment(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Payment))
    }

    pub async fn list_payments(&self, transaction_id: i64) -> Result<Vec<PurchasePayment>, PosError> {
        self.get_transaction(transaction_id).await?;
        self.repo.list_payments(transaction_id).await
    }

    /// Status transition of a payment, stamped with who processed it.
    pub async fn process_payment(
        &self,
        id: i64,
        status: PaymentStatus,
        notes: Option<String>,
        processor: i64,
    ) -> Result<PurchasePayment, PosError> {
        let mut payment = self.get_payment(id).await?;
        let now = Utc::now();
        payment.status = status;
        payment.processed_by = Some(processor);
        payment.processed_at = Some(now);
        if let Some(notes) = optional(notes) {
            payment.notes = Some(notes);
        }
        payment.updated_at = now;
        self.repo.update_payment(&payment).await?;
        Ok(payment)
    }

    /// Payment approval gate; unguarded like the transaction gate.
    pub async fn process_payment_approval(
        &self,
        id: i64,
        decision: PaymentDecision,
        notes: Option<String>,
        approver: i64,
    ) -> Result<PurchasePayment, PosError> {
        let mut payment = self.get_payment(id).await?;
        let now = Utc::now();
        payment.status = decision.into();
        payment.approved_by = Some(approver);
        payment.approved_at = Some(now);
        payment.approval_notes = optional(notes);
        payment.updated_at = now;
        self.repo.update_payment(&payment).await?;
        info!(payment_id = id, decision = %decision, approver, "payment approval recorded");
        Ok(payment)
    }

    // ── Reporting ────────────────────────────────────────────────────────────

    pub async fn dashboard(&self) -> Result<PurchaseDashboard, PosError> {
        self.repo.dashboard(Utc::now()).await
    }

    /// Per-status counts and sums of transactions created in `[from, to)`.
    pub async fn statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodStatistics, PosError> {
        if to <= from {
            return Err(PosError::validation("to", "to must be after from"));
        }
        self.repo.period_statistics(from, to).await
    }

    async fn ensure_model(&self, model_id: i64) -> Result<(), PosError> {
        self.models
            .find_by_id(model_id)
            .await?
            .ok_or(PosError::NotFound(Resource::VehicleModel))
            .map(|_| ())
    }

    async fn ensure_vin_free(&self, vin: &str, except: Option<i64>) -> Result<(), PosError> {
        match self.repo.vin_owner(vin).await? {
            Some(owner) if Some(owner) != except => Err(PosError::conflict(format!(
                "vehicle with VIN {vin} already exists"
            ))),
            _ => Ok(()),
        }
    }
}

/// VINs are stored upper-case without surrounding whitespace.
fn normalize_vin(vin: &str) -> Result<String, PosError> {
    Ok(required("vin", vin)?.to_uppercase())
}
