//! Read-only projections computed by the store's aggregate queries.

use rust_decimal::Decimal;
use sea_orm::FromQueryResult;
use serde::Serialize;

/// Vehicle purchase dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromQueryResult)]
pub struct PurchaseDashboard {
    pub total_transactions: i64,
    pub pending: i64,
    pub inspection: i64,
    pub approved: i64,
    pub rejected: i64,
    pub completed: i64,
    pub cancelled: i64,
    /// Sum of purchase prices of approved and completed transactions.
    pub total_purchase_value: Decimal,
    pub average_purchase_value: Decimal,
    pub completed_payment_total: Decimal,
    pub pending_payment_count: i64,
    pub this_month_transactions: i64,
}

/// Count and value of transactions in one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBucket {
    pub status: String,
    pub count: i64,
    pub total_value: Decimal,
}

/// Transactions created within `[from, to)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStatistics {
    pub total_count: i64,
    pub total_value: Decimal,
    pub by_status: Vec<StatusBucket>,
}

/// Progress of one work order across its details and parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromQueryResult)]
pub struct WorkOrderSummary {
    pub total_details: i64,
    pub completed_details: i64,
    pub quality_checked_details: i64,
    pub average_completion: f64,
    pub estimated_hours: Decimal,
    pub actual_hours: Decimal,
    pub labor_cost: Decimal,
    /// Total price of approved parts usage.
    pub parts_cost: Decimal,
    pub pending_parts_requests: i64,
}

/// Repair dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromQueryResult)]
pub struct RepairDashboard {
    pub total_work_orders: i64,
    pub draft: i64,
    pub scheduled: i64,
    pub in_progress: i64,
    pub suspended: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub pending_approval: i64,
    pub open_damages: i64,
    pub pending_parts_requests: i64,
    pub total_actual_cost: Decimal,
}

/// Workload and throughput of one mechanic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromQueryResult)]
pub struct MechanicMetrics {
    pub assigned_work_orders: i64,
    pub in_progress_work_orders: i64,
    pub completed_work_orders: i64,
    pub total_details: i64,
    pub completed_details: i64,
    pub average_completion: f64,
    pub actual_hours: Decimal,
}

/// Outcome of quality inspections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromQueryResult)]
pub struct QualityMetrics {
    pub total_inspections: i64,
    pub scheduled: i64,
    pub passed: i64,
    pub failed: i64,
    pub conditional_pass: i64,
    pub needs_rework: i64,
    /// Passed (including conditional) over decided inspections, 0–100.
    pub pass_rate: f64,
    pub average_overall: Option<f64>,
    pub average_workmanship: Option<f64>,
    pub average_safety: Option<f64>,
    pub average_appearance: Option<f64>,
    pub average_functionality: Option<f64>,
}
