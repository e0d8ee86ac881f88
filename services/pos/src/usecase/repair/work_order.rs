use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::{
    ApprovalDecision, ApprovalStatus, WorkOrderPriority, WorkOrderStatus,
};

use super::RepairService;
use crate::domain::patch::WorkOrderPatch;
use crate::domain::repository::{
    ProductRepository, RepairRepository, SequencePort, UserRepository, VehiclePurchaseRepository,
};
use crate::domain::stats::{MechanicMetrics, RepairDashboard, WorkOrderSummary};
use crate::domain::types::{WorkOrder, WorkOrderFilter};
use crate::error::PosError;
use crate::usecase::{next_number, non_negative, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateWorkOrderInput {
    pub transaction_id: i64,
    pub description: String,
    #[serde(default)]
    pub priority: Option<WorkOrderPriority>,
    #[serde(default)]
    pub estimated_hours: Decimal,
    #[serde(default)]
    pub estimated_cost: Decimal,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignInput {
    pub mechanic_id: Option<i64>,
    pub supervisor_id: Option<i64>,
}

impl<R, T, U, P, N> RepairService<R, T, U, P, N>
where
    R: RepairRepository,
    T: VehiclePurchaseRepository,
    U: UserRepository,
    P: ProductRepository,
    N: SequencePort,
{
    pub async fn create_work_order(
        &self,
        input: CreateWorkOrderInput,
        created_by: i64,
    ) -> Result<WorkOrder, PosError> {
        let tx = self.transaction(input.transaction_id).await?;
        validate_schedule(input.scheduled_start, input.scheduled_end)?;

        let now = Utc::now();
        let mut order = WorkOrder {
            id: 0,
            work_order_number: next_number(&self.seq, DocumentKind::WorkOrder, now).await?,
            transaction_id: tx.id,
            description: required("description", &input.description)?,
            priority: input.priority.unwrap_or(WorkOrderPriority::Normal),
            status: WorkOrderStatus::Draft,
            approval_status: ApprovalStatus::Pending,
            assigned_mechanic_id: None,
            supervisor_id: None,
            estimated_hours: non_negative("estimated_hours", input.estimated_hours)?,
            actual_hours: Decimal::ZERO,
            estimated_cost: non_negative("estimated_cost", input.estimated_cost)?,
            actual_cost: Decimal::ZERO,
            scheduled_start: input.scheduled_start,
            scheduled_end: input.scheduled_end,
            started_at: None,
            completed_at: None,
            notes: optional(input.notes),
            approved_by: None,
            approved_at: None,
            approval_notes: None,
            created_by,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        order.id = self.repo.create_work_order(&order).await?;
        info!(
            work_order_id = order.id,
            number = %order.work_order_number,
            transaction_id = tx.id,
            "work order created"
        );
        Ok(order)
    }

    pub async fn list_work_orders(
        &self,
        filter: &WorkOrderFilter,
        page: PageRequest,
    ) -> Result<Page<WorkOrder>, PosError> {
        self.repo.list_work_orders(filter, page.clamped()).await
    }

    pub async fn work_orders_by_mechanic(
        &self,
        mechanic_id: i64,
        page: PageRequest,
    ) -> Result<Page<WorkOrder>, PosError> {
        self.staff(mechanic_id, "mechanic_id").await?;
        let filter = WorkOrderFilter {
            mechanic_id: Some(mechanic_id),
            ..Default::default()
        };
        self.repo.list_work_orders(&filter, page.clamped()).await
    }

    pub async fn update_work_order(
        &self,
        id: i64,
        patch: WorkOrderPatch,
    ) -> Result<WorkOrder, PosError> {
        let mut order = self.get_work_order(id).await?;
        patch.apply_to(&mut order);
        order.description = required("description", &order.description)?;
        non_negative("estimated_hours", order.estimated_hours)?;
        non_negative("actual_hours", order.actual_hours)?;
        non_negative("estimated_cost", order.estimated_cost)?;
        non_negative("actual_cost", order.actual_cost)?;
        validate_schedule(order.scheduled_start, order.scheduled_end)?;
        order.updated_at = Utc::now();
        self.repo.update_work_order(&order).await?;
        Ok(order)
    }

    /// General status update; membership in the status set is the only check.
    pub async fn update_work_order_status(
        &self,
        id: i64,
        status: WorkOrderStatus,
        notes: Option<String>,
    ) -> Result<WorkOrder, PosError> {
        let mut order = self.get_work_order(id).await?;
        order.transition(status, Utc::now());
        if let Some(notes) = optional(notes) {
            order.notes = Some(notes);
        }
        self.repo.update_work_order(&order).await?;
        Ok(order)
    }

    /// Assign the mechanic and/or supervisor. Both must be active users.
    pub async fn assign_work_order(&self, id: i64, input: AssignInput) -> Result<WorkOrder, PosError> {
        if input.mechanic_id.is_none() && input.supervisor_id.is_none() {
            return Err(PosError::validation(
                "mechanic_id",
                "mechanic_id or supervisor_id is required",
            ));
        }
        let mut order = self.get_work_order(id).await?;
        if let Some(mechanic_id) = input.mechanic_id {
            self.staff(mechanic_id, "mechanic_id").await?;
            order.assigned_mechanic_id = Some(mechanic_id);
        }
        if let Some(supervisor_id) = input.supervisor_id {
            self.staff(supervisor_id, "supervisor_id").await?;
            order.supervisor_id = Some(supervisor_id);
        }
        order.updated_at = Utc::now();
        self.repo.update_work_order(&order).await?;
        info!(
            work_order_id = id,
            mechanic_id = ?order.assigned_mechanic_id,
            supervisor_id = ?order.supervisor_id,
            "work order assigned"
        );
        Ok(order)
    }

    /// Approval gate, kept apart from the work status. Not guarded against
    /// repeated decisions.
    pub async fn process_work_order_approval(
        &self,
        id: i64,
        decision: ApprovalDecision,
        notes: Option<String>,
        approver: i64,
    ) -> Result<WorkOrder, PosError> {
        let mut order = self.get_work_order(id).await?;
        let now = Utc::now();
        order.approval_status = decision.into();
        order.approved_by = Some(approver);
        order.approved_at = Some(now);
        order.approval_notes = optional(notes);
        order.updated_at = now;
        self.repo.update_work_order(&order).await?;
        info!(work_order_id = id, decision = %decision, approver, "work order approval recorded");
        Ok(order)
    }

    /// Soft delete.
    pub async fn delete_work_order(&self, id: i64) -> Result<(), PosError> {
        let mut order = self.get_work_order(id).await?;
        order.is_active = false;
        order.updated_at = Utc::now();
        self.repo.update_work_order(&order).await
    }

    pub async fn work_order_summary(&self, id: i64) -> Result<WorkOrderSummary, PosError> {
        self.get_work_order(id).await?;
        self.repo.work_order_summary(id).await
    }

    pub async fn repair_dashboard(&self) -> Result<RepairDashboard, PosError> {
        self.repo.repair_dashboard().await
    }

    pub async fn mechanic_metrics(&self, mechanic_id: i64) -> Result<MechanicMetrics, PosError> {
        self.staff(mechanic_id, "mechanic_id").await?;
        self.repo.mechanic_metrics(mechanic_id).await
    }
}

fn validate_schedule(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), PosError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(PosError::validation(
            "scheduled_end",
            "scheduled_end must not be before scheduled_start",
        )),
        _ => Ok(()),
    }
}
