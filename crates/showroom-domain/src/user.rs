//! User domain types.

use crate::macros::closed_enum;

closed_enum! {
    /// Role carried by every user account and by the access token.
    UserRole as "role" {
        Admin => "admin",
        Sales => "sales",
        Cashier => "cashier",
        Mechanic => "mechanic",
        Manager => "manager",
    }
}

impl UserRole {
    /// Roles allowed to pass approval gates and sign off inspections.
    pub fn can_approve(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;
