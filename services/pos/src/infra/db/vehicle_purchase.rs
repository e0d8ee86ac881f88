use anyhow::Context as _;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    Statement,
};

use showroom_core::sea_ext::fetch_page;
use showroom_domain::pagination::{Page, PageRequest};
use showroom_domain::workflow::TransactionStatus;
use showroom_pos_schema::{
    vehicle_purchase_payments as payments, vehicle_purchase_transactions as transactions,
};

use super::{parse_column, search, search_term, try_page, write_error};
use crate::domain::repository::VehiclePurchaseRepository;
use crate::domain::stats::{PeriodStatistics, PurchaseDashboard, StatusBucket};
use crate::domain::types::{PurchasePayment, PurchaseTransaction, TransactionFilter};
use crate::error::PosError;

// The ROLLUP row (status NULL) carries the totals of the period.
const PERIOD_STATISTICS_SQL: &str = r#"
SELECT status,
       COUNT(*) AS count,
       COALESCE(SUM(purchase_price), 0) AS total_value
  FROM vehicle_purchase_transactions
 WHERE is_active AND created_at >= $1 AND created_at < $2
 GROUP BY ROLLUP (status)
 ORDER BY status NULLS LAST
"#;

#[derive(Debug, FromQueryResult)]
struct StatusRow {
    status: Option<String>,
    count: i64,
    total_value: Decimal,
}

fn period_from_rows(rows: Vec<StatusRow>) -> PeriodStatistics {
    let mut stats = PeriodStatistics {
        total_count: 0,
        total_value: Decimal::ZERO,
        by_status: Vec::with_capacity(rows.len()),
    };
    for row in rows {
        match row.status {
            Some(status) => stats.by_status.push(StatusBucket {
                status,
                count: row.count,
                total_value: row.total_value,
            }),
            None => {
                stats.total_count = row.count;
                stats.total_value = row.total_value;
            }
        }
    }
    stats
}

#[derive(Clone)]
pub struct DbVehiclePurchaseRepository {
    pub db: DatabaseConnection,
}

impl VehiclePurchaseRepository for DbVehiclePurchaseRepository {
    // ── Transactions ─────────────────────────────────────────────────────────

    async fn find_transaction(&self, id: i64) -> Result<Option<PurchaseTransaction>, PosError> {
        let model = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find transaction by id")?;
        model.map(transaction_from_model).transpose()
    }

    async fn find_transaction_by_number(
        &self,
        number: &str,
    ) -> Result<Option<PurchaseTransaction>, PosError> {
        let model = transactions::Entity::find()
            .filter(transactions::Column::TransactionNumber.eq(number))
            .filter(transactions::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find transaction by number")?;
        model.map(transaction_from_model).transpose()
    }

    async fn find_transaction_by_vin(
        &self,
        vin: &str,
    ) -> Result<Option<PurchaseTransaction>, PosError> {
        let model = transactions::Entity::find()
            .filter(transactions::Column::Vin.eq(vin))
            .filter(transactions::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find transaction by vin")?;
        model.map(transaction_from_model).transpose()
    }

    // The VIN column stays unique after a soft delete.
    async fn vin_owner(&self, vin: &str) -> Result<Option<i64>, PosError> {
        let id = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Id)
            .filter(transactions::Column::Vin.eq(vin))
            .into_tuple::<i64>()
            .one(&self.db)
            .await
            .context("find vin owner")?;
        Ok(id)
    }

    async fn create_transaction(&self, tx: &PurchaseTransaction) -> Result<i64, PosError> {
        let mut am = transaction_to_active(tx);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create transaction"))?;
        Ok(model.id)
    }

    async fn update_transaction(&self, tx: &PurchaseTransaction) -> Result<(), PosError> {
        transaction_to_active(tx)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update transaction"))?;
        Ok(())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::IsActive.eq(true));
        if let Some(status) = filter.status {
            query = query.filter(transactions::Column::Status.eq(status.as_str()));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(transactions::Column::CustomerId.eq(customer_id));
        }
        if let Some(term) = search_term(filter.search.as_deref()) {
            query = query.filter(search(
                term,
                &[
                    transactions::Column::TransactionNumber,
                    transactions::Column::Vin,
                    transactions::Column::CustomerName,
                    transactions::Column::LicensePlate,
                ],
            ));
        }
        let page = fetch_page(
            query.order_by_desc(transactions::Column::CreatedAt),
            &self.db,
            page,
        )
        .await
        .context("list transactions")?;
        try_page(page, transaction_from_model)
    }

    async fn pending_approval(
        &self,
        page: PageRequest,
    ) -> Result<Page<PurchaseTransaction>, PosError> {
        let query = transactions::Entity::find()
            .filter(transactions::Column::IsActive.eq(true))
            .filter(transactions::Column::Status.eq(TransactionStatus::Inspection.as_str()))
            .order_by_asc(transactions::Column::CreatedAt);
        let page = fetch_page(query, &self.db, page)
            .await
            .context("list transactions pending approval")?;
        try_page(page, transaction_from_model)
    }

    // ── Payments ─────────────────────────────────────────────────────────────

    async fn find_payment(&self, id: i64) -> Result<Option<PurchasePayment>, PosError> {
        let model = payments::Entity::find_by_id(id)
            .filter(payments::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find payment by id")?;
        model.map(payment_from_model).transpose()
    }

    async fn create_payment(&self, payment: &PurchasePayment) -> Result<i64, PosError> {
        let mut am = payment_to_active(payment);
        am.id = NotSet;
        let model = am
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "create payment"))?;
        Ok(model.id)
    }

    async fn update_payment(&self, payment: &PurchasePayment) -> Result<(), PosError> {
        payment_to_active(payment)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update payment"))?;
        Ok(())
    }

    async fn list_payments(&self, transaction_id: i64) -> Result<Vec<PurchasePayment>, PosError> {
        let models = payments::Entity::find()
            .filter(payments::Column::TransactionId.eq(transaction_id))
            .filter(payments::Column::IsActive.eq(true))
            .order_by_asc(payments::Column::PaymentDate)
            .all(&self.db)
            .await
            .context("list payments")?;
        models.into_iter().map(payment_from_model).collect()
    }

    // ── Reporting ────────────────────────────────────────────────────────────

    async fn dashboard(&self, now: DateTime<Utc>) -> Result<PurchaseDashboard, PosError> {
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        let stats = PurchaseDashboard::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT
                COUNT(*) AS total_transactions,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'inspection') AS inspection,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                COALESCE(SUM(purchase_price)
                    FILTER (WHERE status IN ('approved', 'completed')), 0) AS total_purchase_value,
                COALESCE(ROUND(AVG(purchase_price)
                    FILTER (WHERE status IN ('approved', 'completed')), 2), 0) AS average_purchase_value,
                (SELECT COALESCE(SUM(amount), 0)
                   FROM vehicle_purchase_payments
                  WHERE is_active AND status = 'completed') AS completed_payment_total,
                (SELECT COUNT(*)
                   FROM vehicle_purchase_payments
                  WHERE is_active AND status = 'pending') AS pending_payment_count,
                COUNT(*) FILTER (WHERE created_at >= $1) AS this_month_transactions
            FROM vehicle_purchase_transactions
            WHERE is_active
            "#,
            [month_start.into()],
        ))
        .one(&self.db)
        .await
        .context("purchase dashboard")?;
        Ok(stats.unwrap_or_default())
    }

    async fn period_statistics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodStatistics, PosError> {
        let rows = StatusRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            PERIOD_STATISTICS_SQL,
            [from.into(), to.into()],
        ))
        .all(&self.db)
        .await
        .context("transaction statistics by status")?;
        Ok(period_from_rows(rows))
    }
}

fn transaction_to_active(t: &PurchaseTransaction) -> transactions::ActiveModel {
    transactions::ActiveModel {
        id: Set(t.id),
        transaction_number: Set(t.transaction_number.clone()),
        customer_id: Set(t.customer_id),
        customer_name: Set(t.customer_name.clone()),
        vehicle_model_id: Set(t.vehicle_model_id),
        vin: Set(t.vin.clone()),
        license_plate: Set(t.license_plate.clone()),
        engine_number: Set(t.engine_number.clone()),
        manufacture_year: Set(t.manufacture_year),
        color: Set(t.color.clone()),
        mileage: Set(t.mileage),
        asking_price: Set(t.asking_price),
        purchase_price: Set(t.purchase_price),
        condition_rating: Set(t.condition_rating),
        inspection_notes: Set(t.inspection_notes.clone()),
        inspected_by: Set(t.inspected_by),
        inspected_at: Set(t.inspected_at),
        status: Set(t.status.as_str().to_owned()),
        notes: Set(t.notes.clone()),
        approved_by: Set(t.approved_by),
        approved_at: Set(t.approved_at),
        approval_notes: Set(t.approval_notes.clone()),
        created_by: Set(t.created_by),
        is_active: Set(t.is_active),
        created_at: Set(t.created_at),
        updated_at: Set(t.updated_at),
    }
}

fn transaction_from_model(m: transactions::Model) -> Result<PurchaseTransaction, PosError> {
    Ok(PurchaseTransaction {
        id: m.id,
        transaction_number: m.transaction_number,
        customer_id: m.customer_id,
        customer_name: m.customer_name,
        vehicle_model_id: m.vehicle_model_id,
        vin: m.vin,
        license_plate: m.license_plate,
        engine_number: m.engine_number,
        manufacture_year: m.manufacture_year,
        color: m.color,
        mileage: m.mileage,
        asking_price: m.asking_price,
        purchase_price: m.purchase_price,
        condition_rating: m.condition_rating,
        inspection_notes: m.inspection_notes,
        inspected_by: m.inspected_by,
        inspected_at: m.inspected_at,
        status: parse_column(&m.status)?,
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

fn payment_to_active(p: &PurchasePayment) -> payments::ActiveModel {
    payments::ActiveModel {
        id: Set(p.id),
        payment_number: Set(p.payment_number.clone()),
        transaction_id: Set(p.transaction_id),
        amount: Set(p.amount),
        payment_method: Set(p.payment_method.as_str().to_owned()),
        payment_date: Set(p.payment_date),
        reference_number: Set(p.reference_number.clone()),
        status: Set(p.status.as_str().to_owned()),
        notes: Set(p.notes.clone()),
        processed_by: Set(p.processed_by),
        processed_at: Set(p.processed_at),
        approved_by: Set(p.approved_by),
        approved_at: Set(p.approved_at),
        approval_notes: Set(p.approval_notes.clone()),
        created_by: Set(p.created_by),
        is_active: Set(p.is_active),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

fn payment_from_model(m: payments::Model) -> Result<PurchasePayment, PosError> {
    Ok(PurchasePayment {
        id: m.id,
        payment_number: m.payment_number,
        transaction_id: m.transaction_id,
        amount: m.amount,
        payment_method: parse_column(&m.payment_method)?,
        payment_date: m.payment_date,
        reference_number: m.reference_number,
        status: parse_column(&m.status)?,
        notes: m.notes,
        processed_by: m.processed_by,
        processed_at: m.processed_at,
        approved_by: m.approved_by,
        approved_at: m.approved_at,
        approval_notes: m.approval_notes,
        created_by: m.created_by,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
