use rust_decimal::Decimal;

use showroom_domain::pagination::PageRequest;
use showroom_domain::workflow::{CustomerType, SupplierType};

use showroom_pos::domain::patch::SupplierPatch;
use showroom_pos::domain::types::{MasterFilter, ProductFilter};
use showroom_pos::error::{PosError, Resource};
use showroom_pos::usecase::customer::CreateCustomerInput;
use showroom_pos::usecase::product_catalog::{CreateProductCategoryInput, CreateProductInput};
use showroom_pos::usecase::supplier::CreateSupplierInput;
use showroom_pos::usecase::vehicle_catalog::{
    CreateVehicleBrandInput, CreateVehicleCategoryInput, CreateVehicleModelInput,
};

use crate::helpers::{
    MemoryDb, customer_service, product_catalog_service, supplier_service,
    vehicle_catalog_service,
};

fn customer(name: &str, phone: &str) -> CreateCustomerInput {
    CreateCustomerInput {
        name: name.to_owned(),
        customer_type: CustomerType::Individual,
        phone: phone.to_owned(),
        email: None,
        address: None,
        id_card_number: None,
        notes: None,
    }
}

fn supplier(name: &str, phone: &str, email: &str) -> CreateSupplierInput {
    CreateSupplierInput {
        name: name.to_owned(),
        supplier_type: SupplierType::Parts,
        contact_person: None,
        phone: phone.to_owned(),
        email: Some(email.to_owned()),
        address: None,
        notes: None,
    }
}

fn category(code: &str, parent_id: Option<i64>) -> CreateProductCategoryInput {
    CreateProductCategoryInput {
        code: code.to_owned(),
        name: code.to_lowercase(),
        description: None,
        parent_id,
    }
}

// ── Customers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_number_customers_in_sequence() {
    let db = MemoryDb::new();
    let customers = customer_service(&db);

    let first = customers.create(customer("Andi", "08111"), 1).await.unwrap();
    let second = customers.create(customer("Budi", "08222"), 1).await.unwrap();

    assert_eq!(first.customer_code, "CUS00001");
    assert_eq!(second.customer_code, "CUS00002");
}

#[tokio::test]
async fn should_reject_duplicate_phone_and_keep_first_customer() {
    let db = MemoryDb::new();
    let customers = customer_service(&db);
    let first = customers.create(customer("Andi", "08111"), 1).await.unwrap();

    let result = customers.create(customer("Andika", "08111"), 1).await;
    assert!(
        matches!(result, Err(PosError::Conflict(_))),
        "expected Conflict, got {result:?}"
    );

    let kept = customers.get(first.id).await.unwrap();
    assert_eq!(kept.name, "Andi");
    assert_eq!(db.lock().customers.len(), 1);
}

#[tokio::test]
async fn should_page_customer_list() {
    let db = MemoryDb::new();
    let customers = customer_service(&db);
    for i in 0..25 {
        customers
            .create(customer(&format!("Customer {i:02}"), &format!("0812{i:04}")), 1)
            .await
            .unwrap();
    }

    let filter = MasterFilter::default();
    let first = customers.list(&filter, PageRequest::new(1, 10)).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total, 25);
    assert_eq!(first.items[0].name, "Customer 00");

    let last = customers.list(&filter, PageRequest::new(3, 10)).await.unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[4].name, "Customer 24");
}

#[tokio::test]
async fn should_soft_delete_customer() {
    let db = MemoryDb::new();
    let customers = customer_service(&db);
    let created = customers.create(customer("Andi", "08111"), 1).await.unwrap();

    customers.delete(created.id).await.unwrap();

    assert!(!customers.get(created.id).await.unwrap().is_active);
    let active = MasterFilter {
        is_active: Some(true),
        ..MasterFilter::default()
    };
    let page = customers.list(&active, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn should_search_customers_case_insensitively() {
    let db = MemoryDb::new();
    let customers = customer_service(&db);
    customers.create(customer("Andi Wijaya", "08111"), 1).await.unwrap();
    customers.create(customer("Budi Santoso", "08222"), 1).await.unwrap();

    let filter = MasterFilter {
        search: Some("WIJAYA".to_owned()),
        is_active: None,
    };
    let page = customers.list(&filter, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Andi Wijaya");
}

// ── Suppliers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_supplier_email_held_by_another_supplier() {
    let db = MemoryDb::new();
    let suppliers = supplier_service(&db);
    let first = suppliers
        .create(supplier("Astra Parts", "0215550001", "sales@astra.example"), 1)
        .await
        .unwrap();
    let second = suppliers
        .create(supplier("Mitra Oli", "0215550002", "info@mitra.example"), 1)
        .await
        .unwrap();
    assert_eq!(first.supplier_code, "SUP00001");

    let taken = suppliers
        .update(
            second.id,
            SupplierPatch {
                email: Some("sales@astra.example".to_owned()),
                ..SupplierPatch::default()
            },
        )
        .await;
    match taken {
        Err(PosError::Conflict(message)) => assert!(message.starts_with("supplier with email")),
        other => panic!("expected Conflict, got {other:?}"),
    }

    // Keeping its own phone is not a clash.
    let renamed = suppliers
        .update(
            first.id,
            SupplierPatch {
                name: Some("Astra Otoparts".to_owned()),
                phone: Some("0215550001".to_owned()),
                ..SupplierPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Astra Otoparts");
}

// ── Vehicle catalog ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_model_of_unknown_brand() {
    let db = MemoryDb::new();
    let catalog = vehicle_catalog_service(&db);
    let sedan = catalog
        .create_category(CreateVehicleCategoryInput {
            name: "Sedan".to_owned(),
            description: None,
        })
        .await
        .unwrap();

    let result = catalog
        .create_model(CreateVehicleModelInput {
            brand_id: 999,
            category_id: sedan.id,
            name: "Vios".to_owned(),
            year_start: None,
            year_end: None,
            engine_capacity_cc: None,
            fuel_type: None,
            transmission: None,
        })
        .await;
    assert!(matches!(result, Err(PosError::NotFound(Resource::VehicleBrand))));
    assert!(db.lock().models.is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_brand_name() {
    let db = MemoryDb::new();
    let catalog = vehicle_catalog_service(&db);
    let brand = || CreateVehicleBrandInput {
        name: "Toyota".to_owned(),
        country_of_origin: Some("Japan".to_owned()),
        description: None,
    };

    let created = catalog.create_brand(brand()).await.unwrap();
    assert_eq!(created.code, "BRD00001");
    assert!(matches!(
        catalog.create_brand(brand()).await,
        Err(PosError::Conflict(_))
    ));
}

// ── Product catalog ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_move_category_subtree() {
    let db = MemoryDb::new();
    let catalog = product_catalog_service(&db);
    let engine = catalog.create_category(category("ENG", None)).await.unwrap();
    let body = catalog.create_category(category("BODY", None)).await.unwrap();
    let filters = catalog.create_category(category("FLT", Some(engine.id))).await.unwrap();
    let oil = catalog.create_category(category("OIL", Some(filters.id))).await.unwrap();
    assert_eq!(oil.path, "ENG/FLT/OIL");
    assert_eq!(oil.level, 2);

    let moved = catalog.move_category(filters.id, Some(body.id)).await.unwrap();
    assert_eq!(moved.path, "BODY/FLT");
    assert_eq!(moved.level, 1);

    let oil = catalog.get_category(oil.id).await.unwrap();
    assert_eq!(oil.path, "BODY/FLT/OIL");
    assert_eq!(oil.level, 2);

    let root = catalog.move_category(filters.id, None).await.unwrap();
    assert_eq!(root.path, "FLT");
    assert_eq!(root.level, 0);
    assert_eq!(catalog.get_category(oil.id).await.unwrap().path, "FLT/OIL");
}

#[tokio::test]
async fn should_refuse_to_move_category_below_its_descendant() {
    let db = MemoryDb::new();
    let catalog = product_catalog_service(&db);
    let engine = catalog.create_category(category("ENG", None)).await.unwrap();
    let filters = catalog.create_category(category("FLT", Some(engine.id))).await.unwrap();

    let below_child = catalog.move_category(engine.id, Some(filters.id)).await;
    assert!(matches!(
        below_child,
        Err(PosError::Validation {
            field: "parent_id",
            ..
        })
    ));
    let onto_itself = catalog.move_category(engine.id, Some(engine.id)).await;
    assert!(onto_itself.is_err());
    assert_eq!(catalog.get_category(engine.id).await.unwrap().path, "ENG");
}

#[tokio::test]
async fn should_refuse_to_deactivate_category_with_active_children() {
    let db = MemoryDb::new();
    let catalog = product_catalog_service(&db);
    let engine = catalog.create_category(category("ENG", None)).await.unwrap();
    let filters = catalog.create_category(category("FLT", Some(engine.id))).await.unwrap();

    assert!(matches!(
        catalog.deactivate_category(engine.id).await,
        Err(PosError::Conflict(_))
    ));

    catalog.deactivate_category(filters.id).await.unwrap();
    let engine = catalog.deactivate_category(engine.id).await.unwrap();
    assert!(!engine.is_active);
}

#[tokio::test]
async fn should_keep_stock_non_negative_and_flag_low_stock() {
    let db = MemoryDb::new();
    let catalog = product_catalog_service(&db);
    let oil = catalog.create_category(category("OIL", None)).await.unwrap();
    let product = catalog
        .create_product(CreateProductInput {
            sku: "OIL-5W30".to_owned(),
            name: "Engine oil 5W-30".to_owned(),
            category_id: oil.id,
            unit: "litre".to_owned(),
            cost_price: Decimal::new(80_000, 0),
            selling_price: Decimal::new(95_000, 0),
            stock_quantity: 6,
            min_stock: 5,
        })
        .await
        .unwrap();

    let product = catalog.adjust_stock(product.id, -2).await.unwrap();
    assert_eq!(product.stock_quantity, 4);
    assert!(matches!(
        catalog.adjust_stock(product.id, -10).await,
        Err(PosError::Validation { .. })
    ));
    assert_eq!(catalog.get_product(product.id).await.unwrap().stock_quantity, 4);

    let low = ProductFilter {
        low_stock: true,
        ..ProductFilter::default()
    };
    let page = catalog.list_products(&low, PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1);
}
