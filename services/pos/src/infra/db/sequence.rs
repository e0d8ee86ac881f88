use anyhow::Context as _;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};

use showroom_domain::numbering::DocumentKind;

use crate::domain::repository::SequencePort;
use crate::error::PosError;

/// Table and number column holding each kind of document number.
fn number_column(kind: DocumentKind) -> (&'static str, &'static str) {
    match kind {
        DocumentKind::Customer => ("customers", "customer_code"),
        DocumentKind::Supplier => ("suppliers", "supplier_code"),
        DocumentKind::VehicleBrand => ("vehicle_brands", "code"),
        DocumentKind::VehicleCategory => ("vehicle_categories", "code"),
        DocumentKind::VehicleModel => ("vehicle_models", "code"),
        DocumentKind::PurchaseTransaction => {
            ("vehicle_purchase_transactions", "transaction_number")
        }
        DocumentKind::PurchasePayment => ("vehicle_purchase_payments", "payment_number"),
        DocumentKind::VehicleDamage => ("vehicle_damages", "damage_number"),
        DocumentKind::WorkOrder => ("repair_work_orders", "work_order_number"),
        DocumentKind::WorkDetail => ("repair_work_details", "detail_number"),
        DocumentKind::PartsUsage => ("repair_parts_usage", "usage_number"),
        DocumentKind::QualityInspection => ("quality_inspections", "inspection_number"),
    }
}

#[derive(Clone)]
pub struct DbSequence {
    pub db: DatabaseConnection,
}

impl SequencePort for DbSequence {
    async fn last_number(
        &self,
        kind: DocumentKind,
        prefix: &str,
    ) -> Result<Option<String>, PosError> {
        #[derive(Debug, FromQueryResult)]
        struct LastNumber {
            last: Option<String>,
        }

        let row = LastNumber::find_by_statement(last_number_statement(
            self.db.get_database_backend(),
            kind,
            prefix,
        ))
        .one(&self.db)
        .await
        .with_context(|| format!("last {} number", kind.code()))?;
        Ok(row.and_then(|r| r.last))
    }
}

/// Sequences outgrow their zero padding (`...9999` then `...10000`), so the
/// longest number wins before the lexical comparison. Soft-deleted rows keep
/// their numbers and are not filtered out.
fn last_number_statement(backend: DbBackend, kind: DocumentKind, prefix: &str) -> Statement {
    let (table, column) = number_column(kind);
    let sql = format!(
        "SELECT {column} AS last FROM {table} WHERE {column} LIKE $1 \
         ORDER BY LENGTH({column}) DESC, {column} DESC LIMIT 1"
    );
    Statement::from_sql_and_values(backend, sql, [format!("{prefix}%").into()])
}
