pub mod auth;
pub mod customer;
pub mod product_catalog;
pub mod repair;
pub mod supplier;
pub mod user;
pub mod vehicle_catalog;
pub mod vehicle_purchase;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use showroom_domain::numbering::DocumentKind;

use crate::domain::repository::{ContactLookup, SequencePort};
use crate::domain::types::{Customer, Supplier};
use crate::error::PosError;

/// Next free number of `kind` for the period containing `now`.
///
/// Not atomic with the insert that follows; number columns are unique, so a
/// concurrent collision fails the insert with a conflict.
pub(crate) async fn next_number<N: SequencePort>(
    seq: &N,
    kind: DocumentKind,
    now: DateTime<Utc>,
) -> Result<String, PosError> {
    let prefix = kind.prefix(now);
    let last = seq.last_number(kind, &prefix).await?;
    Ok(kind.next_number(&prefix, last.as_deref()))
}

/// Record reachable by phone and email.
pub(crate) trait Contact {
    const PARTY: &'static str;
    fn id(&self) -> i64;
}

impl Contact for Customer {
    const PARTY: &'static str = "customer";
    fn id(&self) -> i64 {
        self.id
    }
}

impl Contact for Supplier {
    const PARTY: &'static str = "supplier";
    fn id(&self) -> i64 {
        self.id
    }
}

/// Conflict when `phone` or `email` already belongs to a record other than
/// `except`.
pub(crate) async fn ensure_contact_free<T, R>(
    repo: &R,
    phone: &str,
    email: Option<&str>,
    except: Option<i64>,
) -> Result<(), PosError>
where
    T: Contact,
    R: ContactLookup<T>,
{
    let taken = |owner: Option<T>| owner.is_some_and(|o| Some(o.id()) != except);
    if taken(repo.find_by_phone(phone).await?) {
        return Err(PosError::conflict(format!(
            "{} with phone {phone} already exists",
            T::PARTY
        )));
    }
    if let Some(email) = email {
        if taken(repo.find_by_email(email).await?) {
            return Err(PosError::conflict(format!(
                "{} with email {email} already exists",
                T::PARTY
            )));
        }
    }
    Ok(())
}

/// Trimmed copy of a required text field.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, PosError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PosError::validation(field, format!("{field} is required")));
    }
    Ok(value.to_owned())
}

/// Trimmed copy of an optional text field; blank becomes `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, PosError> {
    if value < Decimal::ZERO {
        return Err(PosError::validation(field, format!("{field} must not be negative")));
    }
    Ok(value)
}
