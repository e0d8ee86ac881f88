use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use showroom_domain::pagination::PageRequest;
use showroom_domain::workflow::{
    ApprovalDecision, CustomerType, PaymentDecision, PaymentMethod, PaymentStatus,
    TransactionStatus,
};

use showroom_pos::domain::types::PurchaseTransaction;
use showroom_pos::error::{PosError, Resource};
use showroom_pos::usecase::customer::CreateCustomerInput;
use showroom_pos::usecase::vehicle_purchase::{CreatePaymentInput, CreateTransactionInput};

use crate::helpers::{MemoryDb, customer_service, purchase_service};

const SALES: i64 = 7;
const MANAGER: i64 = 3;

async fn seed_customer(db: &MemoryDb) -> i64 {
    customer_service(db)
        .create(
            CreateCustomerInput {
                name: "Andi".to_owned(),
                customer_type: CustomerType::Individual,
                phone: "08111".to_owned(),
                email: None,
                address: None,
                id_card_number: None,
                notes: None,
            },
            SALES,
        )
        .await
        .unwrap()
        .id
}

fn purchase(customer_id: i64, vin: &str, price: i64) -> CreateTransactionInput {
    CreateTransactionInput {
        customer_id,
        vehicle_model_id: None,
        vin: vin.to_owned(),
        license_plate: Some("B 1234 XYZ".to_owned()),
        engine_number: None,
        manufacture_year: Some(2019),
        color: Some("silver".to_owned()),
        mileage: Some(54_000),
        asking_price: Decimal::new(price + 10_000_000, 0),
        purchase_price: Decimal::new(price, 0),
        notes: None,
    }
}

async fn seed_transaction(db: &MemoryDb, vin: &str) -> PurchaseTransaction {
    let customer_id = seed_customer(db).await;
    purchase_service(db)
        .create_transaction(purchase(customer_id, vin, 150_000_000), SALES)
        .await
        .unwrap()
}

fn payment(transaction_id: i64, amount: i64) -> CreatePaymentInput {
    CreatePaymentInput {
        transaction_id,
        amount: Decimal::new(amount, 0),
        payment_method: PaymentMethod::BankTransfer,
        payment_date: None,
        reference_number: Some("TRF-001".to_owned()),
        notes: None,
    }
}

// ── Transactions ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_walk_transaction_through_inspection_and_approval() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let tx = seed_transaction(&db, "vin123").await;

    assert_eq!(tx.status, TransactionStatus::Pending);
    assert_eq!(tx.vin, "VIN123");
    assert_eq!(tx.customer_name, "Andi");
    let prefix = format!("VPT{}", Utc::now().format("%Y%m"));
    assert_eq!(tx.transaction_number, format!("{prefix}0001"));

    let inspected = purchases
        .complete_inspection(tx.id, 8, Some("minor scratches".to_owned()), SALES)
        .await
        .unwrap();
    assert_eq!(inspected.status, TransactionStatus::Inspection);
    assert_eq!(inspected.condition_rating, Some(8));
    assert_eq!(inspected.inspected_by, Some(SALES));

    let pending = purchases.pending_approval(PageRequest::default()).await.unwrap();
    assert_eq!(pending.total, 1);

    let approved = purchases
        .process_approval(tx.id, ApprovalDecision::Approved, None, MANAGER)
        .await
        .unwrap();
    assert_eq!(approved.status, TransactionStatus::Approved);
    assert_eq!(approved.approved_by, Some(MANAGER));
    assert!(approved.approved_at.is_some());
    assert_eq!(
        purchases.pending_approval(PageRequest::default()).await.unwrap().total,
        0
    );
}

#[tokio::test]
async fn should_let_second_approval_overwrite_the_first() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let tx = seed_transaction(&db, "VIN123").await;

    purchases
        .process_approval(tx.id, ApprovalDecision::Approved, None, MANAGER)
        .await
        .unwrap();
    let second = purchases
        .process_approval(tx.id, ApprovalDecision::Rejected, Some("price".to_owned()), 4)
        .await
        .unwrap();

    assert_eq!(second.status, TransactionStatus::Rejected);
    assert_eq!(second.approved_by, Some(4));
    assert_eq!(second.approval_notes.as_deref(), Some("price"));
}

#[tokio::test]
async fn should_reject_rating_outside_range_without_changes() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let tx = seed_transaction(&db, "VIN123").await;

    for rating in [0, 11] {
        let result = purchases.complete_inspection(tx.id, rating, None, SALES).await;
        assert!(matches!(
            result,
            Err(PosError::Validation {
                field: "condition_rating",
                ..
            })
        ));
    }
    let unchanged = purchases.get_transaction(tx.id).await.unwrap();
    assert_eq!(unchanged.status, TransactionStatus::Pending);
    assert_eq!(unchanged.condition_rating, None);
}

#[tokio::test]
async fn should_reject_duplicate_vin_regardless_of_case() {
    let db = MemoryDb::new();
    let tx = seed_transaction(&db, "VIN123").await;

    let result = purchase_service(&db)
        .create_transaction(purchase(tx.customer_id, "  vin123 ", 90_000_000), SALES)
        .await;
    assert!(matches!(result, Err(PosError::Conflict(_))));
    assert_eq!(db.lock().transactions.len(), 1);
}

#[tokio::test]
async fn should_reject_transaction_of_unknown_customer() {
    let db = MemoryDb::new();
    let result = purchase_service(&db)
        .create_transaction(purchase(42, "VIN123", 90_000_000), SALES)
        .await;
    assert!(matches!(result, Err(PosError::NotFound(Resource::Customer))));
}

#[tokio::test]
async fn should_hide_soft_deleted_transaction_but_keep_its_vin_taken() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let tx = seed_transaction(&db, "VIN123").await;

    purchases.delete_transaction(tx.id).await.unwrap();

    assert!(matches!(
        purchases.get_transaction(tx.id).await,
        Err(PosError::NotFound(Resource::Transaction))
    ));
    assert!(matches!(
        purchases.get_transaction_by_vin("VIN123").await,
        Err(PosError::NotFound(Resource::Transaction))
    ));
    let result = purchases
        .create_transaction(purchase(tx.customer_id, "VIN123", 90_000_000), SALES)
        .await;
    assert!(matches!(result, Err(PosError::Conflict(_))));
}

#[tokio::test]
async fn should_find_transaction_by_number_and_vin() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let tx = seed_transaction(&db, "VIN123").await;

    let by_number = purchases
        .get_transaction_by_number(&tx.transaction_number)
        .await
        .unwrap();
    assert_eq!(by_number.id, tx.id);
    let by_vin = purchases.get_transaction_by_vin("vin123").await.unwrap();
    assert_eq!(by_vin.id, tx.id);
}

#[tokio::test]
async fn should_keep_numbering_transactions_past_four_digits() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let first = seed_transaction(&db, "VIN001").await;
    let prefix = format!("VPT{}", Utc::now().format("%Y%m"));
    db.lock().transactions[0].transaction_number = format!("{prefix}9999");

    let widened = purchases
        .create_transaction(purchase(first.customer_id, "VIN002", 90_000_000), SALES)
        .await
        .unwrap();
    assert_eq!(widened.transaction_number, format!("{prefix}10000"));

    let next = purchases
        .create_transaction(purchase(first.customer_id, "VIN003", 90_000_000), SALES)
        .await
        .unwrap();
    assert_eq!(next.transaction_number, format!("{prefix}10001"));
}

// ── Payments ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_payment_processing_and_approval() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let tx = seed_transaction(&db, "VIN123").await;

    let created = purchases
        .create_payment(payment(tx.id, 50_000_000), SALES)
        .await
        .unwrap();
    assert_eq!(created.status, PaymentStatus::Pending);
    assert!(created.payment_number.starts_with("VPP"));

    let processing = purchases
        .process_payment(created.id, PaymentStatus::Processing, None, 9)
        .await
        .unwrap();
    assert_eq!(processing.processed_by, Some(9));

    let done = purchases
        .process_payment_approval(created.id, PaymentDecision::Completed, None, MANAGER)
        .await
        .unwrap();
    assert_eq!(done.status, PaymentStatus::Completed);
    assert_eq!(done.approved_by, Some(MANAGER));

    let listed = purchases.list_payments(tx.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, PaymentStatus::Completed);
}

#[tokio::test]
async fn should_reject_non_positive_payment() {
    let db = MemoryDb::new();
    let tx = seed_transaction(&db, "VIN123").await;

    let result = purchase_service(&db).create_payment(payment(tx.id, 0), SALES).await;
    assert!(matches!(
        result,
        Err(PosError::Validation { field: "amount", .. })
    ));
    assert!(db.lock().payments.is_empty());
}

// ── Reporting ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_summarise_transactions_on_dashboard() {
    let db = MemoryDb::new();
    let purchases = purchase_service(&db);
    let customer_id = seed_customer(&db).await;
    let first = purchases
        .create_transaction(purchase(customer_id, "VIN001", 100_000_000), SALES)
        .await
        .unwrap();
    purchases
        .create_transaction(purchase(customer_id, "VIN002", 200_000_000), SALES)
        .await
        .unwrap();
    purchases
        .process_approval(first.id, ApprovalDecision::Approved, None, MANAGER)
        .await
        .unwrap();
    purchases
        .create_payment(payment(first.id, 10_000_000), SALES)
        .await
        .unwrap();

    let dashboard = purchases.dashboard().await.unwrap();
    assert_eq!(dashboard.total_transactions, 2);
    assert_eq!(dashboard.pending, 1);
    assert_eq!(dashboard.approved, 1);
    assert_eq!(dashboard.total_purchase_value, Decimal::new(100_000_000, 0));
    assert_eq!(dashboard.pending_payment_count, 1);
    assert_eq!(dashboard.this_month_transactions, 2);

    let now = Utc::now();
    let stats = purchases
        .statistics(now - Duration::days(1), now + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.total_value, Decimal::new(300_000_000, 0));
    assert_eq!(stats.by_status.len(), 2);
}

#[tokio::test]
async fn should_reject_empty_statistics_period() {
    let db = MemoryDb::new();
    let now = Utc::now();
    let result = purchase_service(&db).statistics(now, now).await;
    assert!(matches!(result, Err(PosError::Validation { field: "to", .. })));
}
