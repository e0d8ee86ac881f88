//! Status and type vocabularies of the master-data and workflow entities.
//!
//! Every long-lived workflow entity has two write paths: a general status
//! update constrained to the entity's status set, and an approval gate that
//! only accepts the two terminal decisions below. No transition table is
//! enforced; any member of a set may follow any other.

use std::ops::RangeInclusive;

use crate::macros::closed_enum;

closed_enum! {
    CustomerType as "customer type" {
        Individual => "individual",
        Corporate => "corporate",
    }
}

closed_enum! {
    SupplierType as "supplier type" {
        Parts => "parts",
        Vehicle => "vehicle",
        Both => "both",
    }
}

closed_enum! {
    TransactionStatus as "transaction status" {
        Pending => "pending",
        /// Inspection recorded, waiting for the approval gate.
        Inspection => "inspection",
        Approved => "approved",
        Rejected => "rejected",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

closed_enum! {
    /// Decision accepted by the approval gate of transactions, work orders
    /// and parts usage.
    ApprovalDecision as "approval status" {
        Approved => "approved",
        Rejected => "rejected",
    }
}

closed_enum! {
    ApprovalStatus as "approval status" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

closed_enum! {
    PaymentStatus as "payment status" {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
    }
}

closed_enum! {
    /// Decision accepted by the payment approval gate.
    PaymentDecision as "payment approval status" {
        Completed => "completed",
        Failed => "failed",
    }
}

closed_enum! {
    PaymentMethod as "payment method" {
        Cash => "cash",
        BankTransfer => "bank_transfer",
        Check => "check",
        Credit => "credit",
    }
}

closed_enum! {
    DamageSeverity as "damage severity" {
        Minor => "minor",
        Moderate => "moderate",
        Major => "major",
        Critical => "critical",
    }
}

closed_enum! {
    DamageStatus as "damage status" {
        Identified => "identified",
        Assessed => "assessed",
        Scheduled => "scheduled",
        Repairing => "repairing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

closed_enum! {
    WorkOrderStatus as "work order status" {
        Draft => "draft",
        Scheduled => "scheduled",
        InProgress => "in_progress",
        Suspended => "suspended",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

closed_enum! {
    WorkOrderPriority as "work order priority" {
        Low => "low",
        Normal => "normal",
        High => "high",
        Urgent => "urgent",
    }
}

closed_enum! {
    WorkDetailStatus as "work detail status" {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

closed_enum! {
    PartsUsageStatus as "parts usage status" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

closed_enum! {
    InspectionStatus as "inspection status" {
        Scheduled => "scheduled",
        Passed => "passed",
        Failed => "failed",
        ConditionalPass => "conditional_pass",
        NeedsRework => "needs_rework",
    }
}

closed_enum! {
    /// Final verdict recorded by an inspection sign-off.
    SignOffDecision as "sign-off status" {
        Passed => "passed",
        Failed => "failed",
    }
}

impl DamageSeverity {
    /// Repair priority; higher is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Self::Minor => 0,
            Self::Moderate => 1,
            Self::Major => 2,
            Self::Critical => 3,
        }
    }
}

impl From<ApprovalDecision> for TransactionStatus {
    fn from(decision: ApprovalDecision) -> Self {
        match decision {
            ApprovalDecision::Approved => Self::Approved,
            ApprovalDecision::Rejected => Self::Rejected,
        }
    }
}

impl From<ApprovalDecision> for ApprovalStatus {
    fn from(decision: ApprovalDecision) -> Self {
        match decision {
            ApprovalDecision::Approved => Self::Approved,
            ApprovalDecision::Rejected => Self::Rejected,
        }
    }
}

impl From<ApprovalDecision> for PartsUsageStatus {
    fn from(decision: ApprovalDecision) -> Self {
        match decision {
            ApprovalDecision::Approved => Self::Approved,
            ApprovalDecision::Rejected => Self::Rejected,
        }
    }
}

impl From<PaymentDecision> for PaymentStatus {
    fn from(decision: PaymentDecision) -> Self {
        match decision {
            PaymentDecision::Completed => Self::Completed,
            PaymentDecision::Failed => Self::Failed,
        }
    }
}

impl From<SignOffDecision> for InspectionStatus {
    fn from(decision: SignOffDecision) -> Self {
        match decision {
            SignOffDecision::Passed => Self::Passed,
            SignOffDecision::Failed => Self::Failed,
        }
    }
}

/// Accepted range for condition and quality ratings.
pub const RATING_RANGE: RangeInclusive<i16> = 1..=10;

/// Accepted range for work detail completion.
pub const COMPLETION_RANGE: RangeInclusive<i16> = 0..=100;

pub fn is_valid_rating(rating: i16) -> bool {
    RATING_RANGE.contains(&rating)
}
