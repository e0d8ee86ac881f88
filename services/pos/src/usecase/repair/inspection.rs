use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use showroom_domain::numbering::DocumentKind;
use showroom_domain::workflow::{InspectionStatus, SignOffDecision, WorkOrderStatus};

use super::RepairService;
use crate::domain::patch::InspectionPatch;
use crate::domain::repository::{
    ProductRepository, RepairRepository, SequencePort, UserRepository, VehiclePurchaseRepository,
};
use crate::domain::stats::QualityMetrics;
use crate::domain::types::{QualityInspection, Ratings};
use crate::error::{PosError, Resource};
use crate::usecase::{next_number, optional, required};

#[derive(Debug, Deserialize)]
pub struct CreateInspectionInput {
    pub work_order_id: i64,
    pub inspector_id: i64,
    pub inspection_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub ratings: Ratings,
    pub defects_found: Option<String>,
    pub recommendations: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReworkInput {
    pub notes: String,
    pub due_date: Option<DateTime<Utc>>,
}

impl<R, T, U, P, N> RepairService<R, T, U, P, N>
where
    R: RepairRepository,
    T: VehiclePurchaseRepository,
    U: UserRepository,
    P: ProductRepository,
    N: SequencePort,
{
    pub async fn create_inspection(
        &self,
        input: CreateInspectionInput,
    ) -> Result<QualityInspection, PosError> {
        let order = self.get_work_order(input.work_order_id).await?;
        self.staff(input.inspector_id, "inspector_id").await?;
        validate_ratings(&input.ratings)?;

        let now = Utc::now();
        let mut inspection = QualityInspection {
            id: 0,
            inspection_number: next_number(&self.seq, DocumentKind::QualityInspection, now)
                .await?,
            work_order_id: order.id,
            inspector_id: input.inspector_id,
            inspection_date: input.inspection_date.unwrap_or(now),
            status: InspectionStatus::Scheduled,
            ratings: input.ratings,
            defects_found: optional(input.defects_found),
            recommendations: optional(input.recommendations),
            notes: optional(input.notes),
            rework_required: false,
            rework_notes: None,
            rework_due_date: None,
            signed_off_by: None,
            signed_off_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inspection.id = self.repo.create_inspection(&inspection).await?;
        Ok(inspection)
    }

    pub async fn get_inspection(&self, id: i64) -> Result<QualityInspection, PosError> {
        self.repo
            .find_inspection(id)
            .await?
            .ok_or(PosError::NotFound(Resource::Inspection))
    }

    pub async fn list_inspections(
        &self,
        work_order_id: i64,
    ) -> Result<Vec<QualityInspection>, PosError> {
        self.get_work_order(work_order_id).await?;
        self.repo.list_inspections(work_order_id).await
    }

    pub async fn update_inspection(
        &self,
        id: i64,
        patch: InspectionPatch,
    ) -> Result<QualityInspection, PosError> {
        let mut inspection = self.get_inspection(id).await?;
        patch.apply_to(&mut inspection);
        validate_ratings(&inspection.ratings)?;
        inspection.updated_at = Utc::now();
        self.repo.update_inspection(&inspection).await?;
        Ok(inspection)
    }

    pub async fn update_inspection_status(
        &self,
        id: i64,
        status: InspectionStatus,
    ) -> Result<QualityInspection, PosError> {
        let mut inspection = self.get_inspection(id).await?;
        inspection.status = status;
        inspection.updated_at = Utc::now();
        self.repo.update_inspection(&inspection).await?;
        Ok(inspection)
    }

    /// Final verdict. Distinct from a status update: stamps the signer.
    pub async fn sign_off_inspection(
        &self,
        id: i64,
        decision: SignOffDecision,
        notes: Option<String>,
        signer: i64,
    ) -> Result<QualityInspection, PosError> {
        let mut inspection = self.get_inspection(id).await?;
        let now = Utc::now();
        inspection.status = decision.into();
        inspection.signed_off_by = Some(signer);
        inspection.signed_off_at = Some(now);
        if let Some(notes) = optional(notes) {
            inspection.notes = Some(notes);
        }
        inspection.updated_at = now;
        self.repo.update_inspection(&inspection).await?;
        info!(inspection_id = id, decision = %decision, signer, "inspection signed off");
        Ok(inspection)
    }

    /// Send the work order back to the shop floor.
    pub async fn schedule_rework(
        &self,
        id: i64,
        input: ReworkInput,
    ) -> Result<QualityInspection, PosError> {
        let mut inspection = self.get_inspection(id).await?;
        let notes = required("notes", &input.notes)?;
        let mut order = self.get_work_order(inspection.work_order_id).await?;

        let now = Utc::now();
        inspection.rework_required = true;
        inspection.rework_notes = Some(notes);
        inspection.rework_due_date = input.due_date;
        inspection.status = InspectionStatus::NeedsRework;
        inspection.updated_at = now;
        order.transition(WorkOrderStatus::InProgress, now);
        order.completed_at = None;
        self.repo.schedule_rework(&inspection, &order).await?;
        info!(
            inspection_id = id,
            work_order_id = order.id,
            "rework scheduled"
        );
        Ok(inspection)
    }

    pub async fn quality_metrics(&self) -> Result<QualityMetrics, PosError> {
        self.repo.quality_metrics().await
    }
}

fn validate_ratings(ratings: &Ratings) -> Result<(), PosError> {
    match ratings.first_invalid() {
        Some(field) => Err(PosError::validation(
            field,
            format!("{field} must be between 1 and 10"),
        )),
        None => Ok(()),
    }
}
