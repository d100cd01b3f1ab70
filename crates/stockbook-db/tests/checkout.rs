//! Integration tests for the sale transaction.
//!
//! Every test runs against a fresh in-memory SQLite database with the real
//! migrations applied, so the constraints under test (CHECK quantity >= 0,
//! foreign keys, UNIQUE tax id) are the production ones.

use stockbook_core::{CartLine, SaleRejection};
use stockbook_db::repository::item::new_item;
use stockbook_db::{CheckoutError, Database, DbConfig, DbError, NewCustomer};

const OWNER: &str = "owner-1";

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn seed_customer(db: &Database, name: &str, tax_id: &str) -> String {
    let customer = db
        .customers()
        .insert(NewCustomer {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    customer.id
}

async fn seed_item(db: &Database, name: &str, quantity: i64, price_cents: i64) -> String {
    let item = new_item(name, quantity, None, price_cents, OWNER);
    db.items().insert(&item).await.unwrap();
    item.id
}

async fn stock_of(db: &Database, item_id: &str) -> i64 {
    db.items()
        .get_owned(item_id, OWNER)
        .await
        .unwrap()
        .unwrap()
        .quantity
}

fn cart(lines: &[(&str, i64)]) -> Vec<CartLine> {
    lines
        .iter()
        .map(|(id, qty)| CartLine {
            item_id: id.to_string(),
            quantity: *qty,
        })
        .collect()
}

#[tokio::test]
async fn checkout_decrements_stock_and_records_lines() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    let sale = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 3)]))
        .await
        .unwrap();

    assert_eq!(stock_of(&db, &item_id).await, 2);

    let lines = db.sales().get_lines(&sale.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].item_id, item_id);
    assert_eq!(lines[0].quantity, 3);
    assert_eq!(lines[0].unit_price_cents, 1099);

    let stored = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
    assert_eq!(stored.customer_id, customer_id);
}

#[tokio::test]
async fn insufficient_stock_rejects_and_changes_nothing() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 2, 1099).await;

    let err = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 3)]))
        .await
        .unwrap_err();

    match err {
        CheckoutError::Rejected(SaleRejection::InsufficientStock {
            available,
            requested,
            ..
        }) => {
            assert_eq!(available, 2);
            assert_eq!(requested, 3);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(stock_of(&db, &item_id).await, 2);
    assert!(db.sales().list_summaries().await.unwrap().is_empty());
}

#[tokio::test]
async fn failing_second_line_rolls_back_first_line() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let plenty = seed_item(&db, "Pencil", 10, 150).await;
    let scarce = seed_item(&db, "Notebook", 1, 1099).await;

    let err = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&plenty, 4), (&scarce, 2)]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Rejected(SaleRejection::InsufficientStock { .. })
    ));

    // The first line's decrement and the sale row must both be gone.
    assert_eq!(stock_of(&db, &plenty).await, 10);
    assert_eq!(stock_of(&db, &scarce).await, 1);
    assert!(db.sales().list_summaries().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_item_across_lines_sees_earlier_decrement() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    // 3 + 3 exceeds the 5 on hand even though each line alone fits.
    let err = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 3), (&item_id, 3)]))
        .await
        .unwrap_err();

    match err {
        CheckoutError::Rejected(SaleRejection::InsufficientStock { available, .. }) => {
            assert_eq!(available, 2);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(stock_of(&db, &item_id).await, 5);
}

#[tokio::test]
async fn sequential_sales_deplete_stock() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    db.sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 3)]))
        .await
        .unwrap();

    let err = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 3)]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Rejected(SaleRejection::InsufficientStock { .. })
    ));
    assert_eq!(stock_of(&db, &item_id).await, 2);
}

#[tokio::test]
async fn unknown_customer_is_rejected() {
    let db = test_db().await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    let err = db
        .sales()
        .checkout(OWNER, "no-such-customer", &cart(&[(&item_id, 1)]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Rejected(SaleRejection::InvalidCustomer(_))
    ));
    assert_eq!(stock_of(&db, &item_id).await, 5);
}

#[tokio::test]
async fn other_owners_item_is_not_sellable() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;

    let foreign = new_item("Notebook", 5, None, 1099, "owner-2");
    db.items().insert(&foreign).await.unwrap();

    let err = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&foreign.id, 1)]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Rejected(SaleRejection::ItemNotFound(_))
    ));
}

#[tokio::test]
async fn zero_and_negative_quantities_are_rejected() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    for bad in [0, -2] {
        let err = db
            .sales()
            .checkout(OWNER, &customer_id, &cart(&[(&item_id, bad)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Rejected(SaleRejection::InvalidQuantity { requested, .. })
                if requested == bad
        ));
    }

    assert_eq!(stock_of(&db, &item_id).await, 5);
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;

    let err = db
        .sales()
        .checkout(OWNER, &customer_id, &[])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Rejected(SaleRejection::EmptyCart)
    ));
}

#[tokio::test]
async fn line_price_is_a_snapshot() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    let sale = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 2)]))
        .await
        .unwrap();

    // Reprice the item after the sale.
    let mut item = db.items().get_owned(&item_id, OWNER).await.unwrap().unwrap();
    item.price_cents = 9999;
    db.items().update(&item).await.unwrap();

    let lines = db.sales().get_lines(&sale.id).await.unwrap();
    assert_eq!(lines[0].unit_price_cents, 1099);

    let summaries = db.sales().list_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_cents, 2198);
    assert_eq!(summaries[0].customer_name, "Alice");
}

#[tokio::test]
async fn summaries_list_newest_first_with_totals() {
    let db = test_db().await;
    let alice = seed_customer(&db, "Alice", "11122233344").await;
    let bob = seed_customer(&db, "Bob", "55566677788").await;
    let item_id = seed_item(&db, "Notebook", 10, 1000).await;

    let first = db
        .sales()
        .checkout(OWNER, &alice, &cart(&[(&item_id, 1)]))
        .await
        .unwrap();
    let second = db
        .sales()
        .checkout(OWNER, &bob, &cart(&[(&item_id, 2)]))
        .await
        .unwrap();

    let summaries = db.sales().list_summaries().await.unwrap();
    assert_eq!(summaries.len(), 2);

    let ids: Vec<&str> = summaries.iter().map(|s| s.sale_id.as_str()).collect();
    assert!(ids.contains(&first.id.as_str()));
    assert!(ids.contains(&second.id.as_str()));
    // Newest first.
    assert!(summaries[0].created_at >= summaries[1].created_at);

    let bob_row = summaries.iter().find(|s| s.sale_id == second.id).unwrap();
    assert_eq!(bob_row.total_cents, 2000);
    assert_eq!(bob_row.customer_name, "Bob");
}

#[tokio::test]
async fn summaries_since_filters_by_start() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 10, 1000).await;

    let sale = db
        .sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 1)]))
        .await
        .unwrap();

    let before = sale.created_at - chrono::Duration::hours(1);
    let after = sale.created_at + chrono::Duration::hours(1);

    let in_window = db.sales().list_summaries_since(before).await.unwrap();
    assert_eq!(in_window.len(), 1);
    assert_eq!(in_window[0].sale_id, sale.id);

    let out_of_window = db.sales().list_summaries_since(after).await.unwrap();
    assert!(out_of_window.is_empty());
}

#[tokio::test]
async fn duplicate_tax_id_is_a_unique_violation() {
    let db = test_db().await;
    seed_customer(&db, "Alice", "11122233344").await;

    let err = db
        .customers()
        .insert(NewCustomer {
            name: "Alice Clone".to_string(),
            tax_id: "11122233344".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::UniqueViolation { .. }));
}

#[tokio::test]
async fn deleting_category_orphans_items() {
    let db = test_db().await;
    let category = db.categories().insert("Stationery").await.unwrap();

    let item = new_item("Notebook", 5, Some(category.id.clone()), 1099, OWNER);
    db.items().insert(&item).await.unwrap();

    db.categories().delete(&category.id).await.unwrap();

    let reloaded = db.items().get_owned(&item.id, OWNER).await.unwrap().unwrap();
    assert_eq!(reloaded.category_id, None);
}

#[tokio::test]
async fn sold_item_cannot_be_deleted() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 5, 1099).await;

    db.sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 1)]))
        .await
        .unwrap();

    let err = db.items().delete(&item_id, OWNER).await.unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
}

#[tokio::test]
async fn available_items_exclude_sold_out() {
    let db = test_db().await;
    let customer_id = seed_customer(&db, "Alice", "11122233344").await;
    let item_id = seed_item(&db, "Notebook", 2, 1099).await;
    seed_item(&db, "Pencil", 0, 150).await;

    let available = db.items().list_available(OWNER).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, item_id);

    db.sales()
        .checkout(OWNER, &customer_id, &cart(&[(&item_id, 2)]))
        .await
        .unwrap();

    assert!(db.items().list_available(OWNER).await.unwrap().is_empty());
}
