use std::sync::Arc;

use axum_stock_api::{
    audit::ActivitySink,
    dto::{
        products::ProductForm,
        units::{AddUnitsRequest, ChangeStatusRequest, UpdateUnitRequest},
    },
    error::AppError,
    models::{StockLevel, UnitStatus},
    routes::params::ProductQuery,
    services::{label_service, product_service, unit_service},
    state::AppState,
    store::InventoryStore,
};
use uuid::Uuid;

fn test_state() -> AppState {
    AppState {
        store: Arc::new(InventoryStore::new()),
        activity: ActivitySink::new(),
        qr_base_url: "https://qr.test/codes".to_string(),
    }
}

fn widget_form() -> ProductForm {
    ProductForm {
        name: Some("Pump X200".into()),
        category: Some("Pumps".into()),
        supplier: Some("Acme".into()),
        description: Some("Industrial pump".into()),
        base_price: Some(1499.99),
        min_stock: Some(5),
    }
}

// Full flow: create product -> receive a batch -> sell one unit -> print
// labels -> delete a unit -> cascade-delete the product.
#[tokio::test]
async fn receive_sell_label_and_cascade_delete_flow() -> anyhow::Result<()> {
    let state = test_state();

    let created = product_service::create_product(&state, widget_form()).await?;
    let product = created.data.expect("product").product;
    assert_eq!(product.total_received, 0);
    assert_eq!(product.units.len(), 0);

    let batch = unit_service::add_units(
        &state,
        product.id,
        AddUnitsRequest {
            serial_number: Some("X200".into()),
            lot: Some("L1".into()),
            location: Some("A-01".into()),
            notes: None,
            quantity: 3,
        },
    )
    .await?;
    let units = batch.data.expect("batch").units;
    assert_eq!(units.len(), 3);
    let serials: Vec<&str> = units.iter().map(|u| u.serial_number.as_str()).collect();
    assert_eq!(serials, vec!["X200-001", "X200-002", "X200-003"]);
    assert!(units.iter().all(|u| u.lot == "L1"));
    assert!(units.iter().all(|u| u.status == UnitStatus::Disponible));

    let fetched = product_service::get_product(&state, product.id).await?;
    let fetched = fetched.data.expect("product");
    assert_eq!(fetched.product.total_received, 3);
    assert_eq!(fetched.product.total_available, 3);
    // 3 available against a reorder threshold of 5.
    assert_eq!(fetched.stock_level, StockLevel::LowStock);

    // Sell the first unit.
    let sold = unit_service::change_status(
        &state,
        product.id,
        units[0].id,
        ChangeStatusRequest {
            status: UnitStatus::Vendu,
            sold_to: Some("Client 42".into()),
        },
    )
    .await?;
    let sold = sold.data.expect("unit");
    assert_eq!(sold.status, UnitStatus::Vendu);
    assert!(sold.sold_date.is_some());
    assert_eq!(sold.sold_to.as_deref(), Some("Client 42"));

    let fetched = product_service::get_product(&state, product.id).await?;
    let fetched = fetched.data.expect("product").product;
    assert_eq!(fetched.total_available, 2);
    assert_eq!(fetched.total_sold, 1);
    assert_eq!(fetched.total_received, 3);

    // Labels carry fully-qualified URLs and the owning product's name.
    let labels = label_service::list_labels(&state, Some(product.id)).await?;
    let labels = labels.data.expect("labels").items;
    assert_eq!(labels.len(), 3);
    assert!(labels
        .iter()
        .all(|l| l.qr_code.starts_with("https://qr.test/codes/QR-")));
    assert!(labels.iter().all(|l| l.product_name == "Pump X200"));

    // Deleting a non-available unit still leaves the counts consistent,
    // because totals are recomputed from the surviving units.
    unit_service::delete_unit(&state, product.id, units[0].id).await?;
    let fetched = product_service::get_product(&state, product.id).await?;
    let fetched = fetched.data.expect("product").product;
    assert_eq!(fetched.total_received, 2);
    assert_eq!(fetched.total_available, 2);
    assert_eq!(fetched.total_sold, 0);

    // Cascade delete: the product disappears and its label sheet goes empty.
    product_service::delete_product(&state, product.id).await?;
    assert!(matches!(
        product_service::get_product(&state, product.id).await,
        Err(AppError::NotFound)
    ));
    let labels = label_service::list_labels(&state, Some(product.id)).await?;
    assert!(labels.data.expect("labels").items.is_empty());

    Ok(())
}

#[tokio::test]
async fn single_unit_keeps_base_serial() -> anyhow::Result<()> {
    let state = test_state();
    let product = product_service::create_product(&state, widget_form())
        .await?
        .data
        .expect("product")
        .product;

    let batch = unit_service::add_units(
        &state,
        product.id,
        AddUnitsRequest {
            serial_number: Some("ABC".into()),
            lot: Some("L1".into()),
            location: Some("A-01".into()),
            notes: None,
            quantity: 1,
        },
    )
    .await?;
    let units = batch.data.expect("batch").units;
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].serial_number, "ABC");

    Ok(())
}

#[tokio::test]
async fn product_validation_lists_every_missing_field() {
    let state = test_state();
    let err = product_service::create_product(&state, ProductForm::default())
        .await
        .expect_err("empty form must be rejected");
    match err {
        AppError::Validation(problems) => {
            assert_eq!(problems.len(), 3);
            assert!(problems.iter().any(|p| p.contains("name")));
            assert!(problems.iter().any(|p| p.contains("category")));
            assert!(problems.iter().any(|p| p.contains("base_price")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn negative_price_is_rejected_without_creating_anything() -> anyhow::Result<()> {
    let state = test_state();
    let mut form = widget_form();
    form.base_price = Some(-1.0);
    assert!(matches!(
        product_service::create_product(&state, form).await,
        Err(AppError::Validation(_))
    ));

    let listed = product_service::list_products(&state, ProductQuery::default()).await?;
    assert!(listed.data.expect("list").items.is_empty());
    Ok(())
}

#[tokio::test]
async fn unit_batch_requires_serial_lot_and_location() -> anyhow::Result<()> {
    let state = test_state();
    let product = product_service::create_product(&state, widget_form())
        .await?
        .data
        .expect("product")
        .product;

    let err = unit_service::add_units(
        &state,
        product.id,
        AddUnitsRequest {
            serial_number: Some("  ".into()),
            lot: None,
            location: Some("A-01".into()),
            notes: None,
            quantity: 2,
        },
    )
    .await
    .expect_err("blank serial and missing lot must be rejected");
    match err {
        AppError::Validation(problems) => {
            assert!(problems.iter().any(|p| p.contains("serial_number")));
            assert!(problems.iter().any(|p| p.contains("lot")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let fetched = product_service::get_product(&state, product.id).await?;
    assert_eq!(fetched.data.expect("product").product.total_received, 0);
    Ok(())
}

#[tokio::test]
async fn operations_on_unknown_ids_are_surfaced_not_fatal() {
    let state = test_state();
    let ghost = Uuid::new_v4();

    assert!(matches!(
        product_service::update_product(&state, ghost, widget_form()).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        product_service::delete_product(&state, ghost).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        unit_service::update_unit(&state, ghost, Uuid::new_v4(), UpdateUnitRequest::default())
            .await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn search_is_case_insensitive_and_stable() -> anyhow::Result<()> {
    let state = test_state();
    for (name, category, supplier) in [
        ("Pump X200", "Pumps", "Acme"),
        ("Valve V7", "Valves", "Hydrotech"),
        ("Hose H1", "Hoses", "Acme"),
    ] {
        product_service::create_product(
            &state,
            ProductForm {
                name: Some(name.into()),
                category: Some(category.into()),
                supplier: Some(supplier.into()),
                description: None,
                base_price: Some(10.0),
                min_stock: None,
            },
        )
        .await?;
    }

    let query = |q: Option<&str>| ProductQuery {
        q: q.map(str::to_string),
        ..ProductQuery::default()
    };

    // Empty term returns everything, newest first.
    let all = product_service::list_products(&state, query(None)).await?;
    assert_eq!(all.data.expect("list").items.len(), 3);

    // Supplier match, case-insensitive, and stable across repeated calls.
    let first = product_service::list_products(&state, query(Some("ACME"))).await?;
    let second = product_service::list_products(&state, query(Some("ACME"))).await?;
    let names = |resp: axum_stock_api::response::ApiResponse<
        axum_stock_api::dto::products::ProductList,
    >| {
        resp.data
            .expect("list")
            .items
            .into_iter()
            .map(|item| item.product.name)
            .collect::<Vec<_>>()
    };
    let first = names(first);
    assert_eq!(first, vec!["Hose H1", "Pump X200"]);
    assert_eq!(first, names(second));

    Ok(())
}
