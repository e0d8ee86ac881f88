use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use showroom_domain::user::UserRole;
use showroom_domain::workflow::{
    ApprovalStatus, CustomerType, DamageSeverity, DamageStatus, InspectionStatus,
    PartsUsageStatus, PaymentMethod, PaymentStatus, SupplierType, TransactionStatus,
    WorkDetailStatus, WorkOrderPriority, WorkOrderStatus,
};

// ── Users and sessions ───────────────────────────────────────────────────────

/// Staff account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Login session. Access tokens carry the session id and are only honoured
/// while the session is active.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip)]
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub login_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub logout_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

// ── Master data ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: i64,
    pub customer_code: String,
    pub name: String,
    pub customer_type: CustomerType,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub id_card_number: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Supplier {
    pub id: i64,
    pub supplier_code: String,
    pub name: String,
    pub supplier_type: SupplierType,
    pub contact_person: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleBrand {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleCategory {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleModel {
    pub id: i64,
    pub code: String,
    pub brand_id: i64,
    pub category_id: i64,
    pub name: String,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
    pub engine_capacity_cc: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Node of the product category tree. `path` is the `/`-joined chain of codes
/// from the root down to this node.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCategory {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub level: i32,
    pub path: String,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl ProductCategory {
    /// `(level, path)` of a node with `code` placed under `parent`.
    pub fn placement(code: &str, parent: Option<&ProductCategory>) -> (i32, String) {
        match parent {
            Some(p) => (p.level + 1, format!("{}/{}", p.path, code)),
            None => (0, code.to_owned()),
        }
    }

    /// Whether `self` lies strictly below `ancestor` in the tree.
    pub fn is_descendant_of(&self, ancestor: &ProductCategory) -> bool {
        self.path
            .strip_prefix(&ancestor.path)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub category_id: i64,
    pub unit: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub stock_quantity: i32,
    pub min_stock: i32,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

// ── Vehicle purchase ─────────────────────────────────────────────────────────

/// Purchase of a used vehicle from a customer.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseTransaction {
    pub id: i64,
    pub transaction_number: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub vehicle_model_id: Option<i64>,
    pub vin: String,
    pub license_plate: Option<String>,
    pub engine_number: Option<String>,
    pub manufacture_year: Option<i32>,
    pub color: Option<String>,
    pub mileage: Option<i32>,
    pub asking_price: Decimal,
    pub purchase_price: Decimal,
    pub condition_rating: Option<i16>,
    pub inspection_notes: Option<String>,
    pub inspected_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub inspected_at: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    pub notes: Option<String>,
    pub approved_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub approved_at: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchasePayment {
    pub id: i64,
    pub payment_number: String,
    pub transaction_id: i64,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub payment_date: DateTime<Utc>,
    pub reference_number: Option<String>,
    pub status: PaymentStatus,
    pub notes: Option<String>,
    pub processed_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub processed_at: Option<DateTime<Utc>>,
    pub approved_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub approved_at: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

// ── Repair ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct VehicleDamage {
    pub id: i64,
    pub damage_number: String,
    pub transaction_id: i64,
    pub damage_type: String,
    pub description: String,
    pub location: Option<String>,
    pub severity: DamageSeverity,
    pub status: DamageStatus,
    pub estimated_cost: Decimal,
    pub actual_cost: Option<Decimal>,
    pub identified_by: i64,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Container of repair tasks for one purchased vehicle. Approval is tracked
/// apart from the work status.
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrder {
    pub id: i64,
    pub work_order_number: String,
    pub transaction_id: i64,
    pub description: String,
    pub priority: WorkOrderPriority,
    pub status: WorkOrderStatus,
    pub approval_status: ApprovalStatus,
    pub assigned_mechanic_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub estimated_hours: Decimal,
    pub actual_hours: Decimal,
    pub estimated_cost: Decimal,
    pub actual_cost: Decimal,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub scheduled_end: Option<DateTime<Utc>>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub approved_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub approved_at: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl WorkOrder {
    /// Set `status`, stamping the start and completion times the first time
    /// the order enters those states.
    pub fn transition(&mut self, status: WorkOrderStatus, at: DateTime<Utc>) {
        match status {
            WorkOrderStatus::InProgress if self.started_at.is_none() => {
                self.started_at = Some(at);
            }
            WorkOrderStatus::Completed => {
                self.completed_at.get_or_insert(at);
            }
            _ => {}
        }
        self.status = status;
        self.updated_at = at;
    }
}

/// One task line within a work order.
#[derive(Debug, Clone, Serialize)]
pub struct WorkDetail {
    pub id: i64,
    pub detail_number: String,
    pub work_order_id: i64,
    pub damage_id: Option<i64>,
    pub task_name: String,
    pub description: Option<String>,
    pub mechanic_id: Option<i64>,
    pub status: WorkDetailStatus,
    pub completion_percentage: i16,
    pub estimated_hours: Decimal,
    pub actual_hours: Decimal,
    pub labor_cost: Decimal,
    pub quality_checked: bool,
    pub quality_checked_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub quality_checked_at: Option<DateTime<Utc>>,
    pub quality_notes: Option<String>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl WorkDetail {
    /// Record progress. Any progress starts the task; 100% completes it.
    pub fn record_progress(&mut self, percentage: i16, at: DateTime<Utc>) {
        self.completion_percentage = percentage;
        if percentage >= 100 {
            self.status = WorkDetailStatus::Completed;
            self.completed_at = Some(at);
            self.started_at.get_or_insert(at);
        } else if percentage > 0 {
            self.status = WorkDetailStatus::InProgress;
            self.started_at.get_or_insert(at);
            self.completed_at = None;
        }
        self.updated_at = at;
    }
}

/// Inventory parts consumed by a work detail, subject to approval.
#[derive(Debug, Clone, Serialize)]
pub struct PartsUsage {
    pub id: i64,
    pub usage_number: String,
    pub work_detail_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub status: PartsUsageStatus,
    pub requested_by: i64,
    pub approved_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub approved_at: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Five 1–10 ratings of a work order's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct Ratings {
    #[serde(rename = "overall_rating")]
    pub overall: Option<i16>,
    #[serde(rename = "workmanship_rating")]
    pub workmanship: Option<i16>,
    #[serde(rename = "safety_rating")]
    pub safety: Option<i16>,
    #[serde(rename = "appearance_rating")]
    pub appearance: Option<i16>,
    #[serde(rename = "functionality_rating")]
    pub functionality: Option<i16>,
}

impl Ratings {
    /// Name of the first rating outside the accepted range.
    pub fn first_invalid(&self) -> Option<&'static str> {
        [
            ("overall_rating", self.overall),
            ("workmanship_rating", self.workmanship),
            ("safety_rating", self.safety),
            ("appearance_rating", self.appearance),
            ("functionality_rating", self.functionality),
        ]
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !showroom_domain::workflow::is_valid_rating(v)))
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityInspection {
    pub id: i64,
    pub inspection_number: String,
    pub work_order_id: i64,
    pub inspector_id: i64,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub inspection_date: DateTime<Utc>,
    pub status: InspectionStatus,
    #[serde(flatten)]
    pub ratings: Ratings,
    pub defects_found: Option<String>,
    pub recommendations: Option<String>,
    pub notes: Option<String>,
    pub rework_required: bool,
    pub rework_notes: Option<String>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub rework_due_date: Option<DateTime<Utc>>,
    pub signed_off_by: Option<i64>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms_opt")]
    pub signed_off_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "showroom_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

// ── List filters ─────────────────────────────────────────────────────────────

/// Filter shared by master-data lists: free-text search plus active flag.
#[derive(Debug, Clone, Default)]
pub struct MasterFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl MasterFilter {
    /// Case-insensitive substring match against any of `fields`.
    pub fn matches(&self, is_active: bool, fields: &[&str]) -> bool {
        if self.is_active.is_some_and(|want| want != is_active) {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(term) if !term.is_empty() => {
                fields.iter().any(|f| f.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleModelFilter {
    pub base: MasterFilter,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub base: MasterFilter,
    pub category_id: Option<i64>,
    pub low_stock: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub customer_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkOrderFilter {
    pub status: Option<WorkOrderStatus>,
    pub priority: Option<WorkOrderPriority>,
    pub transaction_id: Option<i64>,
    pub mechanic_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(code: &str, level: i32, path: &str) -> ProductCategory {
        ProductCategory {
            id: 1,
            code: code.into(),
            name: code.into(),
            description: None,
            parent_id: None,
            level,
            path: path.into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn should_place_root_at_level_zero() {
        assert_eq!(
            ProductCategory::placement("ENG", None),
            (0, "ENG".to_owned())
        );
    }

    #[test]
    fn should_extend_parent_path() {
        let parent = category("ENG", 0, "ENG");
        assert_eq!(
            ProductCategory::placement("FLT", Some(&parent)),
            (1, "ENG/FLT".to_owned())
        );
    }

    #[test]
    fn should_not_treat_shared_code_prefix_as_descendant() {
        let eng = category("ENG", 0, "ENG");
        let engine = category("ENGINE", 0, "ENGINE");
        let filter = category("FLT", 1, "ENG/FLT");
        assert!(filter.is_descendant_of(&eng));
        assert!(!engine.is_descendant_of(&eng));
        assert!(!eng.is_descendant_of(&eng));
    }

    #[test]
    fn should_report_first_rating_out_of_range() {
        let ratings = Ratings {
            overall: Some(8),
            safety: Some(11),
            ..Default::default()
        };
        assert_eq!(ratings.first_invalid(), Some("safety_rating"));
        assert_eq!(Ratings::default().first_invalid(), None);
    }

    #[test]
    fn should_match_master_filter_case_insensitively() {
        let filter = MasterFilter {
            search: Some("toy".into()),
            is_active: Some(true),
        };
        assert!(filter.matches(true, &["Toyota", "BRD00001"]));
        assert!(!filter.matches(false, &["Toyota"]));
        assert!(!filter.matches(true, &["Honda"]));
    }

    #[test]
    fn should_start_and_complete_work_detail_by_progress() {
        let now = Utc::now();
        let mut detail = WorkDetail {
            id: 1,
            detail_number: "RWD2026100001".into(),
            work_order_id: 1,
            damage_id: None,
            task_name: "paint".into(),
            description: None,
            mechanic_id: None,
            status: WorkDetailStatus::Pending,
            completion_percentage: 0,
            estimated_hours: Decimal::ZERO,
            actual_hours: Decimal::ZERO,
            labor_cost: Decimal::ZERO,
            quality_checked: false,
            quality_checked_by: None,
            quality_checked_at: None,
            quality_notes: None,
            started_at: None,
            completed_at: None,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        detail.record_progress(40, now);
        assert_eq!(detail.status, WorkDetailStatus::InProgress);
        assert!(detail.started_at.is_some());
        assert!(detail.completed_at.is_none());

        detail.record_progress(100, now);
        assert_eq!(detail.status, WorkDetailStatus::Completed);
        assert_eq!(detail.completed_at, Some(now));
    }
}
