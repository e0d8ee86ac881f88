use std::cmp::Reverse;

use anyhow::Context as _;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Statement,
    TransactionError, TransactionTrait,
};

use showroom_core::sea_ext::fetch_page;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::PartsUsageStatus;
use showroom_pos_schema::{
    quality_inspections, repair_parts_usage, repair_work_details, repair_work_orders,
    vehicle_damages,
};

use super::{parse_column, transaction_error, try_page, write_error};
use crate::domain::repository::{PartsDecision, RepairRepository};
use crate::domain::stats::{MechanicMetrics, QualityMetrics, RepairDashboard, WorkOrderSummary};
use crate::domain::types::{
    PartsUsage, QualityInspection, Ratings, VehicleDamage, WorkDetail, WorkOrder,
    WorkOrderFilter,
};
use crate::error::PosError;

const TAKE_STOCK_SQL: &str = r#"
UPDATE products
   SET stock_quantity = stock_quantity - $1, updated_at = NOW()
 WHERE id = $2 AND stock_quantity >= $1
"#;

/// Reasons to abandon a parts decision half way.
#[derive(Debug, thiserror::Error)]
enum DecisionAbort {
    #[error("parts usage is no longer pending")]
    NotPending,
    #[error("insufficient stock")]
    InsufficientStock,
    #[error(transparent)]
    Db(#[from] DbErr),
}

const WORK_ORDER_SUMMARY_SQL: &str = r#"
SELECT
    COUNT(*) AS total_details,
    COUNT(*) FILTER (WHERE status = 'completed') AS completed_details,
    COUNT(*) FILTER (WHERE quality_checked) AS quality_checked_details,
    COALESCE(AVG(completion_percentage), 0)::float8 AS average_completion,
    COALESCE(SUM(estimated_hours), 0) AS estimated_hours,
    COALESCE(SUM(actual_hours), 0) AS actual_hours,
    COALESCE(SUM(labor_cost), 0) AS labor_cost,
    (SELECT COALESCE(SUM(pu.total_price), 0)
       FROM repair_parts_usage pu
       JOIN repair_work_details d ON d.id = pu.work_detail_id
      WHERE d.work_order_id = $1 AND d.is_active AND pu.is_active
        AND pu.status = 'approved') AS parts_cost,
    (SELECT COUNT(*)
       FROM repair_parts_usage pu
       JOIN repair_work_details d ON d.id = pu.work_detail_id
      WHERE d.work_order_id = $1 AND d.is_active AND pu.is_active
        AND pu.status = 'pending') AS pending_parts_requests
FROM repair_work_details
WHERE work_order_id = $1 AND is_active
"#;

const REPAIR_DASHBOARD_SQL: &str = r#"
SELECT
    COUNT(*) AS total_work_orders,
    COUNT(*) FILTER (WHERE status = 'draft') AS draft,
    COUNT(*) FILTER (WHERE status = 'scheduled') AS scheduled,
    COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
    COUNT(*) FILTER (WHERE status = 'suspended') AS suspended,
    COUNT(*) FILTER (WHERE status = 'completed') AS completed,
    COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
    COUNT(*) FILTER (WHERE approval_status = 'pending') AS pending_approval,
    (SELECT COUNT(*)
       FROM vehicle_damages
      WHERE is_active AND status NOT IN ('completed', 'cancelled')) AS open_damages,
    (SELECT COUNT(*)
       FROM repair_parts_usage
      WHERE is_active AND status = 'pending') AS pending_parts_requests,
    COALESCE(SUM(actual_cost), 0) AS total_actual_cost
FROM repair_work_orders
WHERE is_active
"#;

const MECHANIC_METRICS_SQL: &str = r#"
SELECT
    (SELECT COUNT(*) FROM repair_work_orders
      WHERE is_active AND assigned_mechanic_id = $1) AS assigned_work_orders,
    (SELECT COUNT(*) FROM repair_work_orders
      WHERE is_active AND assigned_mechanic_id = $1
        AND status = 'in_progress') AS in_progress_work_orders,
    (SELECT COUNT(*) FROM repair_work_orders
      WHERE is_active AND assigned_mechanic_id = $1
        AND status = 'completed') AS completed_work_orders,
    COUNT(*) AS total_details,
    COUNT(*) FILTER (WHERE status = 'completed') AS completed_details,
    COALESCE(AVG(completion_percentage), 0)::float8 AS average_completion,
    COALESCE(SUM(actual_hours), 0) AS actual_hours
FROM repair_work_details
WHERE is_active AND mechanic_id = $1
"#;

const QUALITY_METRICS_SQL: &str = r#"
SELECT
    COUNT(*) AS total_inspections,
    COUNT(*) FILTER (WHERE status = 'scheduled') AS scheduled,
    COUNT(*) FILTER (WHERE status = 'passed') AS passed,
    COUNT(*) FILTER (WHERE status = 'failed') AS failed,
    COUNT(*) FILTER (WHERE status = 'conditional_pass') AS conditional_pass,
    COUNT(*) FILTER (WHERE status = 'needs_rework') AS needs_rework,
    COALESCE(
        100.0 * COUNT(*) FILTER (WHERE status IN ('passed', 'conditional_pass'))
            / NULLIF(COUNT(*) FILTER (WHERE status <> 'scheduled'), 0),
        0
    )::float8 AS pass_rate,
    AVG(overall_rating)::float8 AS average_overall,
    AVG(workmanship_rating)::float8 AS average_workmanship,
    AVG(safety_rating)::float8 AS average_safety,
    AVG(appearance_rating)::float8 AS average_appearance,
    AVG(functionality_rating)::float8 AS average_functionality
FROM quality_inspections
WHERE is_active
"#;

#[derive(Clone)]
pub struct DbRepairRepository {
    pub db: DatabaseConnection,
}

impl DbRepairRepository {
    fn statement(&self, sql: &str, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

impl RepairRepository for DbRepairRepository {
    // ── Damages ──────────────────────────────────────────────────────────────

    async fn find_damage(&self, id: i64) -> Result<Option<VehicleDamage>, PosError> {
        let model = vehicle_damages::Entity::find_by_id(id)
            .filter(vehicle_damages::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find damage by id")?;
        model.map(damage_from_model).transpose()
    }

    async fn create_damage(&self, damage: &VehicleDamage) -> Result<i64, PosError> {
        let mut am = damage_to_active(damage);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create damage"))?;
        Ok(model.id)
    }

    async fn update_damage(&self, damage: &VehicleDamage) -> Result<(), PosError> {
        damage_to_active(damage)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update damage"))?;
        Ok(())
    }

    async fn list_damages(&self, transaction_id: i64) -> Result<Vec<VehicleDamage>, PosError> {
        let models = vehicle_damages::Entity::find()
            .filter(vehicle_damages::Column::TransactionId.eq(transaction_id))
            .filter(vehicle_damages::Column::IsActive.eq(true))
            .order_by_asc(vehicle_damages::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list damages")?;
        let mut damages = models
            .into_iter()
            .map(damage_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        damages.sort_by_key(|d| Reverse(d.severity.rank()));
        Ok(damages)
    }

    // ── Work orders ──────────────────────────────────────────────────────────

    async fn find_work_order(&self, id: i64) -> Result<Option<WorkOrder>, PosError> {
        let model = repair_work_orders::Entity::find_by_id(id)
            .filter(repair_work_orders::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find work order by id")?;
        model.map(work_order_from_model).transpose()
    }

    async fn create_work_order(&self, order: &WorkOrder) -> Result<i64, PosError> {
        let mut am = work_order_to_active(order);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create work order"))?;
        Ok(model.id)
    }

    async fn update_work_order(&self, order: &WorkOrder) -> Result<(), PosError> {
        work_order_to_active(order)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update work order"))?;
        Ok(())
    }

    async fn list_work_orders(
        &self,
        filter: &WorkOrderFilter,
        page: PageRequest,
    ) -> Result<Page<WorkOrder>, PosError> {
        let mut query = repair_work_orders::Entity::find()
            .filter(repair_work_orders::Column::IsActive.eq(true));
        if let Some(status) = filter.status {
            query = query.filter(repair_work_orders::Column::Status.eq(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(repair_work_orders::Column::Priority.eq(priority.as_str()));
        }
        if let Some(transaction_id) = filter.transaction_id {
            query = query.filter(repair_work_orders::Column::TransactionId.eq(transaction_id));
        }
        if let Some(mechanic_id) = filter.mechanic_id {
            query = query.filter(repair_work_orders::Column::AssignedMechanicId.eq(mechanic_id));
        }
        let page = fetch_page(
            query.order_by_desc(repair_work_orders::Column::CreatedAt),
            &self.db,
            page,
        )
        .await
        .context("list work orders")?;
        try_page(page, work_order_from_model)
    }

    // ── Work details ─────────────────────────────────────────────────────────

    async fn find_work_detail(&self, id: i64) -> Result<Option<WorkDetail>, PosError> {
        let model = repair_work_details::Entity::find_by_id(id)
            .filter(repair_work_details::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find work detail by id")?;
        model.map(work_detail_from_model).transpose()
    }

    async fn create_work_detail(&self, detail: &WorkDetail) -> Result<i64, PosError> {
        let mut am = work_detail_to_active(detail);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create work detail"))?;
        Ok(model.id)
    }

    async fn update_work_detail(&self, detail: &WorkDetail) -> Result<(), PosError> {
        work_detail_to_active(detail)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update work detail"))?;
        Ok(())
    }

    async fn list_work_details(&self, work_order_id: i64) -> Result<Vec<WorkDetail>, PosError> {
        let models = repair_work_details::Entity::find()
            .filter(repair_work_details::Column::WorkOrderId.eq(work_order_id))
            .filter(repair_work_details::Column::IsActive.eq(true))
            .order_by_asc(repair_work_details::Column::Id)
            .all(&self.db)
            .await
            .context("list work details")?;
        models.into_iter().map(work_detail_from_model).collect()
    }

    // ── Parts usage ──────────────────────────────────────────────────────────

    async fn find_parts_usage(&self, id: i64) -> Result<Option<PartsUsage>, PosError> {
        let model = repair_parts_usage::Entity::find_by_id(id)
            .filter(repair_parts_usage::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find parts usage by id")?;
        model.map(parts_usage_from_model).transpose()
    }

    async fn create_parts_usage(&self, usage: &PartsUsage) -> Result<i64, PosError> {
        let mut am = parts_usage_to_active(usage);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create parts usage"))?;
        Ok(model.id)
    }

    async fn record_parts_decision(&self, usage: &PartsUsage) -> Result<PartsDecision, PosError> {
        use repair_parts_usage::Column;

        let usage = usage.clone();
        let outcome = self
            .db
            .transaction::<_, (), DecisionAbort>(|txn| {
                Box::pin(async move {
                    let decided = repair_parts_usage::Entity::update_many()
                        .col_expr(Column::Status, Expr::value(usage.status.as_str()))
                        .col_expr(Column::ApprovedBy, Expr::value(usage.approved_by))
                        .col_expr(Column::ApprovedAt, Expr::value(usage.approved_at))
                        .col_expr(Column::ApprovalNotes, Expr::value(usage.approval_notes))
                        .col_expr(Column::UpdatedAt, Expr::value(usage.updated_at))
                        .filter(Column::Id.eq(usage.id))
                        .filter(Column::Status.eq(PartsUsageStatus::Pending.as_str()))
                        .filter(Column::IsActive.eq(true))
                        .exec(txn)
                        .await?;
                    if decided.rows_affected == 0 {
                        return Err(DecisionAbort::NotPending);
                    }
                    if usage.status == PartsUsageStatus::Approved {
                        let taken = txn
                            .execute(Statement::from_sql_and_values(
                                txn.get_database_backend(),
                                TAKE_STOCK_SQL,
                                [usage.quantity.into(), usage.product_id.into()],
                            ))
                            .await?;
                        if taken.rows_affected() == 0 {
                            return Err(DecisionAbort::InsufficientStock);
                        }
                    }
                    Ok(())
                })
            })
            .await;
        match outcome {
            Ok(()) => Ok(PartsDecision::Recorded),
            Err(TransactionError::Transaction(DecisionAbort::NotPending)) => {
                Ok(PartsDecision::NotPending)
            }
            Err(TransactionError::Transaction(DecisionAbort::InsufficientStock)) => {
                Ok(PartsDecision::InsufficientStock)
            }
            Err(TransactionError::Transaction(DecisionAbort::Db(e)))
            | Err(TransactionError::Connection(e)) => Err(PosError::Internal(
                anyhow::Error::new(e).context("record parts decision"),
            )),
        }
    }

    async fn list_parts_usage(&self, work_detail_id: i64) -> Result<Vec<PartsUsage>, PosError> {
        let models = repair_parts_usage::Entity::find()
            .filter(repair_parts_usage::Column::WorkDetailId.eq(work_detail_id))
            .filter(repair_parts_usage::Column::IsActive.eq(true))
            .order_by_asc(repair_parts_usage::Column::Id)
            .all(&self.db)
            .await
            .context("list parts usage")?;
        models.into_iter().map(parts_usage_from_model).collect()
    }

    async fn pending_parts_usage(
        &self,
        page: PageRequest,
    ) -> Result<Page<PartsUsage>, PosError> {
        let query = repair_parts_usage::Entity::find()
            .filter(repair_parts_usage::Column::IsActive.eq(true))
            .filter(repair_parts_usage::Column::Status.eq(PartsUsageStatus::Pending.as_str()))
            .order_by_asc(repair_parts_usage::Column::CreatedAt);
        let page = fetch_page(query, &self.db, page)
            .await
            .context("list pending parts usage")?;
        try_page(page, parts_usage_from_model)
    }

    // ── Quality inspections ──────────────────────────────────────────────────

    async fn find_inspection(&self, id: i64) -> Result<Option<QualityInspection>, PosError> {
        let model = quality_inspections::Entity::find_by_id(id)
            .filter(quality_inspections::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find inspection by id")?;
        model.map(inspection_from_model).transpose()
    }

    async fn create_inspection(&self, inspection: &QualityInspection) -> Result<i64, PosError> {
        let mut am = inspection_to_active(inspection);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create inspection"))?;
        Ok(model.id)
    }

    async fn update_inspection(&self, inspection: &QualityInspection) -> Result<(), PosError> {
        inspection_to_active(inspection)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update inspection"))?;
        Ok(())
    }

    async fn schedule_rework(
        &self,
        inspection: &QualityInspection,
        order: &WorkOrder,
    ) -> Result<(), PosError> {
        let inspection = inspection_to_active(inspection);
        let order = work_order_to_active(order);
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    inspection.update(txn).await?;
                    order.update(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| transaction_error(e, "schedule rework"))
    }

    async fn list_inspections(
        &self,
        work_order_id: i64,
    ) -> Result<Vec<QualityInspection>, PosError> {
        let models = quality_inspections::Entity::find()
            .filter(quality_inspections::Column::WorkOrderId.eq(work_order_id))
            .filter(quality_inspections::Column::IsActive.eq(true))
            .order_by_desc(quality_inspections::Column::InspectionDate)
            .all(&self.db)
            .await
            .context("list inspections")?;
        models.into_iter().map(inspection_from_model).collect()
    }

    // ── Reporting ────────────────────────────────────────────────────────────

    async fn work_order_summary(&self, work_order_id: i64) -> Result<WorkOrderSummary, PosError> {
        let summary = WorkOrderSummary::find_by_statement(
            self.statement(WORK_ORDER_SUMMARY_SQL, vec![work_order_id.into()]),
        )
        .one(&self.db)
        .await
        .context("work order summary")?;
        Ok(summary.unwrap_or_default())
    }

    async fn repair_dashboard(&self) -> Result<RepairDashboard, PosError> {
        let stats = RepairDashboard::find_by_statement(self.statement(REPAIR_DASHBOARD_SQL, vec![]))
            .one(&self.db)
            .await
            .context("repair dashboard")?;
        Ok(stats.unwrap_or_default())
    }

    async fn mechanic_metrics(&self, mechanic_id: i64) -> Result<MechanicMetrics, PosError> {
        let metrics = MechanicMetrics::find_by_statement(
            self.statement(MECHANIC_METRICS_SQL, vec![mechanic_id.into()]),
        )
        .one(&self.db)
        .await
        .context("mechanic metrics")?;
        Ok(metrics.unwrap_or_default())
    }

    async fn quality_metrics(&self) -> Result<QualityMetrics, PosError> {
        let metrics = QualityMetrics::find_by_statement(self.statement(QUALITY_METRICS_SQL, vec![]))
            .one(&self.db)
            .await
            .context("quality metrics")?;
        Ok(metrics.unwrap_or_default())
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

fn damage_to_active(d: &VehicleDamage) -> vehicle_damages::ActiveModel {
    vehicle_damages::ActiveModel {
        id: Set(d.id),
        damage_number: Set(d.damage_number.clone()),
        transaction_id: Set(d.transaction_id),
        damage_type: Set(d.damage_type.clone()),
        description: Set(d.description.clone()),
        location: Set(d.location.clone()),
        severity: Set(d.severity.as_str().to_owned()),
        status: Set(d.status.as_str().to_owned()),
        estimated_cost: Set(d.estimated_cost),
        actual_cost: Set(d.actual_cost),
        identified_by: Set(d.identified_by),
        is_active: Set(d.is_active),
        created_at: Set(d.created_at),
        updated_at: Set(d.updated_at),
    }
}

fn damage_from_model(m: vehicle_damages::Model) -> Result<VehicleDamage, PosError> {
    Ok(VehicleDamage {
        id: m.id,
        damage_number: m.damage_number,
        transaction_id: m.transaction_id,
        damage_type: m.damage_type,
        description: m.description,
        location: m.location,
        severity: parse_column(&m.severity)?,
        status: parse_column(&m.status)?,
        estimated_cost: m.estimated_cost,
        actual_cost: m.actual_cost,
        identified_by: m.identified_by,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn work_order_to_active(o: &WorkOrder) -> repair_work_orders::ActiveModel {
    repair_work_orders::ActiveModel {
        id: Set(o.id),
        work_order_number: Set(o.work_order_number.clone()),
        transaction_id: Set(o.transaction_id),
        description: Set(o.description.clone()),
        priority: Set(o.priority.as_str().to_owned()),
        status: Set(o.status.as_str().to_owned()),
        approval_status: Set(o.approval_status.as_str().to_owned()),
        assigned_mechanic_id: Set(o.assigned_mechanic_id),
        supervisor_id: Set(o.supervisor_id),
        estimated_hours: Set(o.estimated_hours),
        actual_hours: Set(o.actual_hours),
        estimated_cost: Set(o.estimated_cost),
        actual_cost: Set(o.actual_cost),
        scheduled_start: Set(o.scheduled_start),
        scheduled_end: Set(o.scheduled_end),
        started_at: Set(o.started_at),
        completed_at: Set(o.completed_at),
        notes: Set(o.notes.clone()),
        approved_by: Set(o.approved_by),
        approved_at: Set(o.approved_at),
        approval_notes: Set(o.approval_notes.clone()),
        created_by: Set(o.created_by),
        is_active: Set(o.is_active),
        created_at: Set(o.created_at),
        updated_at: Set(o.updated_at),
    }
}

fn work_order_from_model(m: repair_work_orders::Model) -> Result<WorkOrder, PosError> {
    Ok(WorkOrder {
        id: m.id,
        work_order_number: m.work_order_number,
        transaction_id: m.transaction_id,
        description: m.description,
        priority: parse_column(&m.priority)?,
        status: parse_column(&m.status)?,
        approval_status: parse_column(&m.approval_status)?,
        assigned_mechanic_id: m.assigned_mechanic_id,
        supervisor_id: m.supervisor_id,
        estimated_hours: m.estimated_hours,
        actual_hours: m.actual_hours,
        estimated_cost: m.estimated_cost,
        actual_cost: m.actual_cost,
        scheduled_start: m.scheduled_start,
        scheduled_end: m.scheduled_end,
        started_at: m.started_at,
        completed_at: m.completed_at,
        notes: m.notes,
        approved_by: m.approved_by,
        approved_at: m.approved_at,
        approval_notes: m.approval_notes,
        created_by: m.created_by,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn work_detail_to_active(d: &WorkDetail) -> repair_work_details::ActiveModel {
    repair_work_details::ActiveModel {
        id: Set(d.id),
        detail_number: Set(d.detail_number.clone()),
        work_order_id: Set(d.work_order_id),
        damage_id: Set(d.damage_id),
        task_name: Set(d.task_name.clone()),
        description: Set(d.description.clone()),
        mechanic_id: Set(d.mechanic_id),
        status: Set(d.status.as_str().to_owned()),
        completion_percentage: Set(d.completion_percentage),
        estimated_hours: Set(d.estimated_hours),
        actual_hours: Set(d.actual_hours),
        labor_cost: Set(d.labor_cost),
        quality_checked: Set(d.quality_checked),
        quality_checked_by: Set(d.quality_checked_by),
        quality_checked_at: Set(d.quality_checked_at),
        quality_notes: Set(d.quality_notes.clone()),
        started_at: Set(d.started_at),
        completed_at: Set(d.completed_at),
        notes: Set(d.notes.clone()),
        is_active: Set(d.is_active),
        created_at: Set(d.created_at),
        updated_at: Set(d.updated_at),
    }
}

fn work_detail_from_model(m: repair_work_details::Model) -> Result<WorkDetail, PosError> {
    Ok(WorkDetail {
        id: m.id,
        detail_number: m.detail_number,
        work_order_id: m.work_order_id,
        damage_id: m.damage_id,
        task_name: m.task_name,
        description: m.description,
        mechanic_id: m.mechanic_id,
        status: parse_column(&m.status)?,
        completion_percentage: m.completion_percentage,
        estimated_hours: m.estimated_hours,
        actual_hours: m.actual_hours,
        labor_cost: m.labor_cost,
        quality_checked: m.quality_checked,
        quality_checked_by: m.quality_checked_by,
        quality_checked_at: m.quality_checked_at,
        quality_notes: m.quality_notes,
        started_at: m.started_at,
        completed_at: m.completed_at,
        notes: m.notes,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn parts_usage_to_active(u: &PartsUsage) -> repair_parts_usage::ActiveModel {
    repair_parts_usage::ActiveModel {
        id: Set(u.id),
        usage_number: Set(u.usage_number.clone()),
        work_detail_id: Set(u.work_detail_id),
        product_id: Set(u.product_id),
        quantity: Set(u.quantity),
        unit_price: Set(u.unit_price),
        total_price: Set(u.total_price),
        status: Set(u.status.as_str().to_owned()),
        requested_by: Set(u.requested_by),
        approved_by: Set(u.approved_by),
        approved_at: Set(u.approved_at),
        approval_notes: Set(u.approval_notes.clone()),
        notes: Set(u.notes.clone()),
        is_active: Set(u.is_active),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

fn parts_usage_from_model(m: repair_parts_usage::Model) -> Result<PartsUsage, PosError> {
    Ok(PartsUsage {
        id: m.id,
        usage_number: m.usage_number,
        work_detail_id: m.work_detail_id,
        product_id: m.product_id,
        quantity: m.quantity,
        unit_price: m.unit_price,
        total_price: m.total_price,
        status: parse_column(&m.status)?,
        requested_by: m.requested_by,
        approved_by: m.approved_by,
        approved_at: m.approved_at,
        approval_notes: m.approval_notes,
        notes: m.notes,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn inspection_to_active(i: &QualityInspection) -> quality_inspections::ActiveModel {
    quality_inspections::ActiveModel {
        id: Set(i.id),
        inspection_number: Set(i.inspection_number.clone()),
        work_order_id: Set(i.work_order_id),
        inspector_id: Set(i.inspector_id),
        inspection_date: Set(i.inspection_date),
        status: Set(i.status.as_str().to_owned()),
        overall_rating: Set(i.ratings.overall),
        workmanship_rating: Set(i.ratings.workmanship),
        safety_rating: Set(i.ratings.safety),
        appearance_rating: Set(i.ratings.appearance),
        functionality_rating: Set(i.ratings.functionality),
        defects_found: Set(i.defects_found.clone()),
        recommendations: Set(i.recommendations.clone()),
        notes: Set(i.notes.clone()),
        rework_required: Set(i.rework_required),
        rework_notes: Set(i.rework_notes.clone()),
        rework_due_date: Set(i.rework_due_date),
        signed_off_by: Set(i.signed_off_by),
        signed_off_at: Set(i.signed_off_at),
        is_active: Set(i.is_active),
        created_at: Set(i.created_at),
        updated_at: Set(i.updated_at),
    }
}

fn inspection_from_model(m: quality_inspections::Model) -> Result<QualityInspection, PosError> {
    Ok(QualityInspection {
        id: m.id,
        inspection_number: m.inspection_number,
        work_order_id: m.work_order_id,
        inspector_id: m.inspector_id,
        inspection_date: m.inspection_date,
        status: parse_column(&m.status)?,
        ratings: Ratings {
            overall: m.overall_rating,
            workmanship: m.workmanship_rating,
            safety: m.safety_rating,
            appearance: m.appearance_rating,
            functionality: m.functionality_rating,
        },
        defects_found: m.defects_found,
        recommendations: m.recommendations,
        notes: m.notes,
        rework_required: m.rework_required,
        rework_notes: m.rework_notes,
        rework_due_date: m.rework_due_date,
        signed_off_by: m.signed_off_by,
        signed_off_at: m.signed_off_at,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
