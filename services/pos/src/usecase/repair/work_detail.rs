use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::workflow::{COMPLETION_RANGE, WorkDetailStatus};

use super::RepairService;
use crate::domain::patch::WorkDetailPatch;
use crate::domain::repository::{
    ProductRepository, RepairRepository, SequencePort, UserRepository, VehiclePurchaseRepository,
};
use crate::domain::types::{WorkDetail, WorkOrder};
use crate::error::{PosError, Resource};
use crate::usecase::{next_number, non_negative, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateWorkDetailInput {
    pub work_order_id: i64,
    pub damage_id: Option<i64>,
    pub task_name: String,
    pub description: Option<String>,
    pub mechanic_id: Option<i64>,
    #[serde(default)]
    pub estimated_hours: Decimal,
    #[serde(default)]
    pub labor_cost: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressInput {
    pub completion_percentage: i16,
    pub actual_hours: Option<Decimal>,
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
    pub async fn create_work_detail(
        &self,
        input: CreateWorkDetailInput,
    ) -> Result<WorkDetail, PosError> {
        let order = self.get_work_order(input.work_order_id).await?;
        if let Some(damage_id) = input.damage_id {
            self.damage_of(&order, damage_id).await?;
        }
        if let Some(mechanic_id) = input.mechanic_id {
            self.staff(mechanic_id, "mechanic_id").await?;
        }

        let now = Utc::now();
        let mut detail = WorkDetail {
            id: 0,
            detail_number: next_number(&self.seq, DocumentKind::WorkDetail, now).await?,
            work_order_id: order.id,
            damage_id: input.damage_id,
            task_name: required("task_name", &input.task_name)?,
            description: optional(input.description),
            mechanic_id: input.mechanic_id,
            status: WorkDetailStatus::Pending,
            completion_percentage: 0,
            estimated_hours: non_negative("estimated_hours", input.estimated_hours)?,
            actual_hours: Decimal::ZERO,
            labor_cost: non_negative("labor_cost", input.labor_cost)?,
            quality_checked: false,
            quality_checked_by: None,
            quality_checked_at: None,
            quality_notes: None,
            started_at: None,
            completed_at: None,
            notes: optional(input.notes),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        detail.id = self.repo.create_work_detail(&detail).await?;
        Ok(detail)
    }

    pub async fn list_work_details(&self, work_order_id: i64) -> Result<Vec<WorkDetail>, PosError> {
        self.get_work_order(work_order_id).await?;
        self.repo.list_work_details(work_order_id).await
    }

    pub async fn update_work_detail(
        &self,
        id: i64,
        patch: WorkDetailPatch,
    ) -> Result<WorkDetail, PosError> {
        let mut detail = self.get_work_detail(id).await?;
        if let Some(mechanic_id) = patch.mechanic_id.filter(|m| Some(*m) != detail.mechanic_id) {
            self.staff(mechanic_id, "mechanic_id").await?;
        }
        patch.apply_to(&mut detail);
        detail.task_name = required("task_name", &detail.task_name)?;
        non_negative("estimated_hours", detail.estimated_hours)?;
        non_negative("actual_hours", detail.actual_hours)?;
        non_negative("labor_cost", detail.labor_cost)?;
        detail.updated_at = Utc::now();
        self.repo.update_work_detail(&detail).await?;
        Ok(detail)
    }

    pub async fn update_work_detail_status(
        &self,
        id: i64,
        status: WorkDetailStatus,
    ) -> Result<WorkDetail, PosError> {
        let mut detail = self.get_work_detail(id).await?;
        let now = Utc::now();
        match status {
            WorkDetailStatus::Completed => detail.record_progress(100, now),
            _ => {
                detail.status = status;
                detail.updated_at = now;
            }
        }
        self.repo.update_work_detail(&detail).await?;
        Ok(detail)
    }

    /// Record completion progress; 100 completes the task.
    pub async fn update_progress(
        &self,
        id: i64,
        input: ProgressInput,
    ) -> Result<WorkDetail, PosError> {
        if !COMPLETION_RANGE.contains(&input.completion_percentage) {
            return Err(PosError::validation(
                "completion_percentage",
                "completion_percentage must be between 0 and 100",
            ));
        }
        let mut detail = self.get_work_detail(id).await?;
        if let Some(hours) = input.actual_hours {
            detail.actual_hours = non_negative("actual_hours", hours)?;
        }
        if let Some(notes) = optional(input.notes) {
            detail.notes = Some(notes);
        }
        detail.record_progress(input.completion_percentage, Utc::now());
        self.repo.update_work_detail(&detail).await?;
        info!(
            work_detail_id = id,
            completion = detail.completion_percentage,
            status = %detail.status,
            "work detail progress recorded"
        );
        Ok(detail)
    }

    /// Mark the task quality checked. Independent of its status.
    pub async fn quality_check(
        &self,
        id: i64,
        notes: Option<String>,
        checker: i64,
    ) -> Result<WorkDetail, PosError> {
        let mut detail = self.get_work_detail(id).await?;
        let now = Utc::now();
        detail.quality_checked = true;
        detail.quality_checked_by = Some(checker);
        detail.quality_checked_at = Some(now);
        detail.quality_notes = optional(notes);
        detail.updated_at = now;
        self.repo.update_work_detail(&detail).await?;
        info!(work_detail_id = id, checker, "work detail quality checked");
        Ok(detail)
    }

    /// Soft delete.
    pub async fn delete_work_detail(&self, id: i64) -> Result<(), PosError> {
        let mut detail = self.get_work_detail(id).await?;
        detail.is_active = false;
        detail.updated_at = Utc::now();
        self.repo.update_work_detail(&detail).await
    }

    async fn damage_of(&self, order: &WorkOrder, damage_id: i64) -> Result<(), PosError> {
        let damage = self
            .repo
            .find_damage(damage_id)
            .await?
            .ok_or(PosError::NotFound(Resource::Damage))?;
        if damage.transaction_id != order.transaction_id {
            return Err(PosError::validation(
                "damage_id",
                "damage belongs to a different transaction",
            ));
        }
        Ok(())
    }
}
