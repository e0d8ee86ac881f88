use rust_decimal::Decimal;

use showroom_domain::user::UserRole;
use showroom_domain::workflow::{
    ApprovalDecision, CustomerType, DamageSeverity, InspectionStatus, PartsUsageStatus,
    SignOffDecision, WorkDetailStatus, WorkOrderStatus,
};

use showroom_pos::domain::types::{Product, Ratings, WorkOrder};
use showroom_pos::error::{PosError, Resource};
use showroom_pos::usecase::customer::CreateCustomerInput;
use showroom_pos::usecase::product_catalog::{CreateProductCategoryInput, CreateProductInput};
use showroom_pos::usecase::repair::{
    AssignInput, CreateDamageInput, CreateInspectionInput, CreatePartsUsageInput,
    CreateWorkDetailInput, CreateWorkOrderInput, ProgressInput, ReworkInput,
};
use showroom_pos::usecase::vehicle_purchase::CreateTransactionInput;

use crate::helpers::{
    MemoryDb, customer_service, product_catalog_service, purchase_service, repair_service,
    seed_user,
};

const SUPERVISOR: i64 = 2;

async fn seed_transaction(db: &MemoryDb, vin: &str, phone: &str) -> i64 {
    let customer = customer_service(db)
        .create(
            CreateCustomerInput {
                name: format!("Owner of {vin}"),
                customer_type: CustomerType::Individual,
                phone: phone.to_owned(),
                email: None,
                address: None,
                id_card_number: None,
                notes: None,
            },
            1,
        )
        .await
        .unwrap();
    purchase_service(db)
        .create_transaction(
            CreateTransactionInput {
                customer_id: customer.id,
                vehicle_model_id: None,
                vin: vin.to_owned(),
                license_plate: None,
                engine_number: None,
                manufacture_year: Some(2018),
                color: None,
                mileage: None,
                asking_price: Decimal::new(120_000_000, 0),
                purchase_price: Decimal::new(110_000_000, 0),
                notes: None,
            },
            1,
        )
        .await
        .unwrap()
        .id
}

fn work_order_input(transaction_id: i64) -> CreateWorkOrderInput {
    CreateWorkOrderInput {
        transaction_id,
        description: "Body and paint refresh".to_owned(),
        priority: None,
        estimated_hours: Decimal::new(12, 0),
        estimated_cost: Decimal::new(4_500_000, 0),
        scheduled_start: None,
        scheduled_end: None,
        notes: None,
    }
}

fn detail_input(work_order_id: i64, damage_id: Option<i64>) -> CreateWorkDetailInput {
    CreateWorkDetailInput {
        work_order_id,
        damage_id,
        task_name: "Repaint rear bumper".to_owned(),
        description: None,
        mechanic_id: None,
        estimated_hours: Decimal::new(3, 0),
        labor_cost: Decimal::new(600_000, 0),
        notes: None,
    }
}

async fn seed_work_order(db: &MemoryDb) -> WorkOrder {
    let tx = seed_transaction(db, "VIN123", "08111").await;
    repair_service(db)
        .create_work_order(work_order_input(tx), 1)
        .await
        .unwrap()
}

async fn seed_product(db: &MemoryDb, stock: i32) -> Product {
    let catalog = product_catalog_service(db);
    let paint = catalog
        .create_category(CreateProductCategoryInput {
            code: "PAINT".to_owned(),
            name: "Paint".to_owned(),
            description: None,
            parent_id: None,
        })
        .await
        .unwrap();
    catalog
        .create_product(CreateProductInput {
            sku: "PNT-SLV".to_owned(),
            name: "Silver base coat".to_owned(),
            category_id: paint.id,
            unit: "can".to_owned(),
            cost_price: Decimal::new(150_000, 0),
            selling_price: Decimal::new(200_000, 0),
            stock_quantity: stock,
            min_stock: 1,
        })
        .await
        .unwrap()
}

fn stock_of(db: &MemoryDb, product_id: i64) -> i32 {
    db.lock()
        .products
        .iter()
        .find(|p| p.id == product_id)
        .unwrap()
        .stock_quantity
}

// ── Work orders ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_create_work_order_for_unknown_transaction() {
    let db = MemoryDb::new();

    let result = repair_service(&db)
        .create_work_order(work_order_input(404), 1)
        .await;
    assert!(
        matches!(result, Err(PosError::NotFound(Resource::Transaction))),
        "expected transaction not found, got {result:?}"
    );
    assert!(db.lock().work_orders.is_empty());
}

#[tokio::test]
async fn should_open_work_order_as_draft_pending_approval() {
    let db = MemoryDb::new();
    let order = seed_work_order(&db).await;

    assert_eq!(order.status, WorkOrderStatus::Draft);
    assert!(order.work_order_number.starts_with("RWO"));
    assert_eq!(order.actual_cost, Decimal::ZERO);

    let dashboard = repair_service(&db).repair_dashboard().await.unwrap();
    assert_eq!(dashboard.total_work_orders, 1);
    assert_eq!(dashboard.draft, 1);
    assert_eq!(dashboard.pending_approval, 1);
}

#[tokio::test]
async fn should_stamp_start_time_once() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;

    let started = repair
        .update_work_order_status(order.id, WorkOrderStatus::InProgress, None)
        .await
        .unwrap();
    let first_start = started.started_at.unwrap();
    repair
        .update_work_order_status(order.id, WorkOrderStatus::Suspended, None)
        .await
        .unwrap();
    let resumed = repair
        .update_work_order_status(order.id, WorkOrderStatus::InProgress, None)
        .await
        .unwrap();
    assert_eq!(resumed.started_at, Some(first_start));
}

#[tokio::test]
async fn should_refuse_inactive_mechanic_assignment() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let mechanic = seed_user(&db, "joko", UserRole::Mechanic);
    db.lock().users[0].is_active = false;

    let result = repair
        .assign_work_order(
            order.id,
            AssignInput {
                mechanic_id: Some(mechanic.id),
                supervisor_id: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(PosError::Validation {
            field: "mechanic_id",
            ..
        })
    ));
    assert_eq!(repair.get_work_order(order.id).await.unwrap().assigned_mechanic_id, None);
}

#[tokio::test]
async fn should_track_mechanic_metrics() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let mechanic = seed_user(&db, "joko", UserRole::Mechanic);
    repair
        .assign_work_order(
            order.id,
            AssignInput {
                mechanic_id: Some(mechanic.id),
                supervisor_id: None,
            },
        )
        .await
        .unwrap();
    let mut detail = detail_input(order.id, None);
    detail.mechanic_id = Some(mechanic.id);
    let detail = repair.create_work_detail(detail).await.unwrap();
    repair
        .update_progress(
            detail.id,
            ProgressInput {
                completion_percentage: 50,
                actual_hours: Some(Decimal::new(2, 0)),
                notes: None,
            },
        )
        .await
        .unwrap();

    let metrics = repair.mechanic_metrics(mechanic.id).await.unwrap();
    assert_eq!(metrics.assigned_work_orders, 1);
    assert_eq!(metrics.total_details, 1);
    assert_eq!(metrics.average_completion, 50.0);
    assert_eq!(metrics.actual_hours, Decimal::new(2, 0));
}

// ── Damages and work details ─────────────────────────────────────────────────

#[tokio::test]
async fn should_list_damages_most_severe_first() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let tx = seed_transaction(&db, "VIN123", "08111").await;
    for severity in [DamageSeverity::Minor, DamageSeverity::Critical, DamageSeverity::Moderate] {
        repair
            .create_damage(
                CreateDamageInput {
                    transaction_id: tx,
                    damage_type: "dent".to_owned(),
                    description: format!("{severity} dent"),
                    location: None,
                    severity,
                    estimated_cost: Decimal::new(250_000, 0),
                },
                1,
            )
            .await
            .unwrap();
    }

    let severities: Vec<_> = repair
        .list_damages(tx)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.severity)
        .collect();
    assert_eq!(
        severities,
        [DamageSeverity::Critical, DamageSeverity::Moderate, DamageSeverity::Minor]
    );
}

#[tokio::test]
async fn should_reject_damage_of_another_transaction() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let other_tx = seed_transaction(&db, "VIN999", "08999").await;
    let foreign = repair
        .create_damage(
            CreateDamageInput {
                transaction_id: other_tx,
                damage_type: "scratch".to_owned(),
                description: "door scratch".to_owned(),
                location: Some("left door".to_owned()),
                severity: DamageSeverity::Minor,
                estimated_cost: Decimal::ZERO,
            },
            1,
        )
        .await
        .unwrap();

    let result = repair.create_work_detail(detail_input(order.id, Some(foreign.id))).await;
    assert!(matches!(
        result,
        Err(PosError::Validation {
            field: "damage_id",
            ..
        })
    ));
    assert!(db.lock().work_details.is_empty());
}

#[tokio::test]
async fn should_complete_detail_at_full_progress() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let detail = repair.create_work_detail(detail_input(order.id, None)).await.unwrap();
    assert_eq!(detail.status, WorkDetailStatus::Pending);

    let halfway = repair
        .update_progress(
            detail.id,
            ProgressInput {
                completion_percentage: 40,
                actual_hours: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(halfway.status, WorkDetailStatus::InProgress);
    assert!(halfway.started_at.is_some());

    let done = repair
        .update_progress(
            detail.id,
            ProgressInput {
                completion_percentage: 100,
                actual_hours: Some(Decimal::new(3, 0)),
                notes: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(done.status, WorkDetailStatus::Completed);
    assert!(done.completed_at.is_some());
    assert_eq!(done.started_at, halfway.started_at);

    let out_of_range = repair
        .update_progress(
            detail.id,
            ProgressInput {
                completion_percentage: 101,
                actual_hours: None,
                notes: None,
            },
        )
        .await;
    assert!(out_of_range.is_err());

    let summary = repair.work_order_summary(order.id).await.unwrap();
    assert_eq!(summary.total_details, 1);
    assert_eq!(summary.completed_details, 1);
    assert_eq!(summary.average_completion, 100.0);
}

// ── Parts usage ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_parts_approval_beyond_stock() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let detail = repair.create_work_detail(detail_input(order.id, None)).await.unwrap();
    let product = seed_product(&db, 2).await;
    let usage = repair
        .create_parts_usage(
            CreatePartsUsageInput {
                work_detail_id: detail.id,
                product_id: product.id,
                quantity: 3,
                unit_price: None,
                notes: None,
            },
            1,
        )
        .await
        .unwrap();

    let result = repair
        .process_parts_approval(usage.id, ApprovalDecision::Approved, None, SUPERVISOR)
        .await;
    assert!(matches!(
        result,
        Err(PosError::Validation {
            field: "quantity",
            ..
        })
    ));
    assert_eq!(stock_of(&db, product.id), 2);
    assert_eq!(
        repair.get_parts_usage(usage.id).await.unwrap().status,
        PartsUsageStatus::Pending
    );
}

#[tokio::test]
async fn should_take_approved_parts_out_of_stock_once() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let detail = repair.create_work_detail(detail_input(order.id, None)).await.unwrap();
    let product = seed_product(&db, 5).await;
    let usage = repair
        .create_parts_usage(
            CreatePartsUsageInput {
                work_detail_id: detail.id,
                product_id: product.id,
                quantity: 2,
                unit_price: None,
                notes: None,
            },
            1,
        )
        .await
        .unwrap();
    assert_eq!(usage.unit_price, product.selling_price);
    assert_eq!(usage.total_price, Decimal::new(400_000, 0));

    let approved = repair
        .process_parts_approval(usage.id, ApprovalDecision::Approved, None, SUPERVISOR)
        .await
        .unwrap();
    assert_eq!(approved.status, PartsUsageStatus::Approved);
    assert_eq!(approved.approved_by, Some(SUPERVISOR));
    assert_eq!(stock_of(&db, product.id), 3);

    let again = repair
        .process_parts_approval(usage.id, ApprovalDecision::Approved, None, SUPERVISOR)
        .await;
    assert!(matches!(again, Err(PosError::Validation { field: "status", .. })));
    assert_eq!(stock_of(&db, product.id), 3);

    let summary = repair.work_order_summary(order.id).await.unwrap();
    assert_eq!(summary.parts_cost, Decimal::new(400_000, 0));
    assert_eq!(summary.pending_parts_requests, 0);
}

#[tokio::test]
async fn should_leave_stock_alone_on_rejection() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let detail = repair.create_work_detail(detail_input(order.id, None)).await.unwrap();
    let product = seed_product(&db, 5).await;
    let usage = repair
        .create_parts_usage(
            CreatePartsUsageInput {
                work_detail_id: detail.id,
                product_id: product.id,
                quantity: 2,
                unit_price: Some(Decimal::new(180_000, 0)),
                notes: None,
            },
            1,
        )
        .await
        .unwrap();

    let rejected = repair
        .process_parts_approval(usage.id, ApprovalDecision::Rejected, None, SUPERVISOR)
        .await
        .unwrap();
    assert_eq!(rejected.status, PartsUsageStatus::Rejected);
    assert_eq!(stock_of(&db, product.id), 5);
}

// ── Quality inspections ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_reopen_work_order_when_rework_is_scheduled() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let inspector = seed_user(&db, "rina", UserRole::Manager);
    repair
        .update_work_order_status(order.id, WorkOrderStatus::Completed, None)
        .await
        .unwrap();

    let inspection = repair
        .create_inspection(CreateInspectionInput {
            work_order_id: order.id,
            inspector_id: inspector.id,
            inspection_date: None,
            ratings: Ratings {
                overall: Some(5),
                ..Ratings::default()
            },
            defects_found: Some("orange peel on bumper".to_owned()),
            recommendations: None,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(inspection.status, InspectionStatus::Scheduled);

    let reworked = repair
        .schedule_rework(
            inspection.id,
            ReworkInput {
                notes: "sand and recoat".to_owned(),
                due_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(reworked.status, InspectionStatus::NeedsRework);
    assert!(reworked.rework_required);

    let order = repair.get_work_order(order.id).await.unwrap();
    assert_eq!(order.status, WorkOrderStatus::InProgress);
    assert_eq!(order.completed_at, None);

    let metrics = repair.quality_metrics().await.unwrap();
    assert_eq!(metrics.needs_rework, 1);
    assert_eq!(metrics.pass_rate, 0.0);
    assert_eq!(metrics.average_overall, Some(5.0));
}

#[tokio::test]
async fn should_stamp_signer_on_sign_off() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let inspector = seed_user(&db, "rina", UserRole::Manager);
    let inspection = repair
        .create_inspection(CreateInspectionInput {
            work_order_id: order.id,
            inspector_id: inspector.id,
            inspection_date: None,
            ratings: Ratings::default(),
            defects_found: None,
            recommendations: None,
            notes: None,
        })
        .await
        .unwrap();

    let signed = repair
        .sign_off_inspection(inspection.id, SignOffDecision::Passed, None, inspector.id)
        .await
        .unwrap();
    assert_eq!(signed.status, InspectionStatus::Passed);
    assert_eq!(signed.signed_off_by, Some(inspector.id));
    assert_eq!(repair.quality_metrics().await.unwrap().pass_rate, 100.0);
}

#[tokio::test]
async fn should_reject_rating_outside_range() {
    let db = MemoryDb::new();
    let repair = repair_service(&db);
    let order = seed_work_order(&db).await;
    let inspector = seed_user(&db, "rina", UserRole::Manager);

    let result = repair
        .create_inspection(CreateInspectionInput {
            work_order_id: order.id,
            inspector_id: inspector.id,
            inspection_date: None,
            ratings: Ratings {
                safety: Some(11),
                ..Ratings::default()
            },
            defects_found: None,
            recommendations: None,
            notes: None,
        })
        .await;
    assert!(matches!(
        result,
        Err(PosError::Validation {
            field: "safety_rating",
            ..
        })
    ));
    assert!(db.lock().inspections.is_empty());
}
