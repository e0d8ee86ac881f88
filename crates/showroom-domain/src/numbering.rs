//! Human-readable document numbers.
//!
//! Master data uses `PREFIX` + 5-digit sequence (`CUS00012`). Workflow
//! documents restart their sequence every month: `PREFIX` + `yyyymm` +
//! 4-digit sequence (`VPT2026100007`).

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Customer,
    Supplier,
    VehicleBrand,
    VehicleCategory,
    VehicleModel,
    PurchaseTransaction,
    PurchasePayment,
    VehicleDamage,
    WorkOrder,
    WorkDetail,
    PartsUsage,
    QualityInspection,
}

impl DocumentKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Customer => "CUS",
            Self::Supplier => "SUP",
            Self::VehicleBrand => "BRD",
            Self::VehicleCategory => "VCT",
            Self::VehicleModel => "VMD",
            Self::PurchaseTransaction => "VPT",
            Self::PurchasePayment => "VPP",
            Self::VehicleDamage => "DMG",
            Self::WorkOrder => "RWO",
            Self::WorkDetail => "RWD",
            Self::PartsUsage => "RPU",
            Self::QualityInspection => "QIN",
        }
    }

    /// Whether the sequence restarts each month.
    pub fn is_monthly(self) -> bool {
        !matches!(
            self,
            Self::Customer
                | Self::Supplier
                | Self::VehicleBrand
                | Self::VehicleCategory
                | Self::VehicleModel
        )
    }

    fn width(self) -> usize {
        if self.is_monthly() { 4 } else { 5 }
    }

    /// Prefix shared by every number issued at `at`.
    pub fn prefix(self, at: DateTime<Utc>) -> String {
        if self.is_monthly() {
            format!("{}{}", self.code(), at.format("%Y%m"))
        } else {
            self.code().to_owned()
        }
    }

    /// Next number after `last`, the greatest number already issued under
    /// `prefix` (if any). The width is a minimum: the sequence keeps counting
    /// past it. Unparseable tails restart at 1.
    pub fn next_number(self, prefix: &str, last: Option<&str>) -> String {
        let next = last
            .and_then(|n| n.strip_prefix(prefix))
            .and_then(|tail| tail.parse::<u64>().ok())
            .map_or(1, |seq| seq + 1);
        format!("{prefix}{next:0width$}", width = self.width())
    }
}
