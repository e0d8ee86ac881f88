//! sea-orm implementations of the repository traits.

mod master_data;
mod repair;
mod sequence;
mod user;
mod vehicle_purchase;

pub use master_data::{
    DbCustomerRepository, DbProductCategoryRepository, DbProductRepository,
    DbSupplierRepository, DbVehicleBrandRepository, DbVehicleCategoryRepository,
    DbVehicleModelRepository,
};
pub use repair::DbRepairRepository;
pub use sequence::DbSequence;
pub use user::{DbSessionRepository, DbUserRepository};
pub use vehicle_purchase::DbVehiclePurchaseRepository;

use std::str::FromStr;

use anyhow::anyhow;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, DbErr, TransactionError};

use showroom_core::sea_ext::{is_unique_violation, like_pattern};
use showroom_domain::UnknownVariant;
use showroom_domain::pagination::Page;

use crate::error::PosError;

/// Map a failed insert or update. Unique violations become conflicts; the
/// rest are internal errors carrying `action` as context.
pub(crate) fn write_error(err: DbErr, action: &'static str) -> PosError {
    if is_unique_violation(&err) {
        PosError::conflict(format!("{action}: a record with the same unique value already exists"))
    } else {
        PosError::Internal(anyhow::Error::new(err).context(action))
    }
}

/// [`write_error`] for a unit of work run inside `db.transaction`.
pub(crate) fn transaction_error(err: TransactionError<DbErr>, action: &'static str) -> PosError {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => write_error(e, action),
    }
}

/// Parse a status or type column. A value outside the set means the row was
/// written by something other than this service.
pub(crate) fn parse_column<T>(value: &str) -> Result<T, PosError>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse()
        .map_err(|e: UnknownVariant| PosError::Internal(anyhow!(e).context("decode stored column")))
}

/// Case-insensitive substring match of `term` against any of `columns`.
pub(crate) fn search<C: ColumnTrait>(term: &str, columns: &[C]) -> Condition {
    let pattern = like_pattern(&term.to_lowercase());
    columns.iter().fold(Condition::any(), |cond, column| {
        cond.add(Expr::expr(Func::lower(Expr::col(*column))).like(pattern.clone()))
    })
}

/// Search term worth filtering on.
pub(crate) fn search_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

pub(crate) fn try_page<M, T>(
    page: Page<M>,
    convert: impl Fn(M) -> Result<T, PosError>,
) -> Result<Page<T>, PosError> {
    let items = page
        .items
        .into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(items, page.total))
}
