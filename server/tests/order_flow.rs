//! Checkout workflow tests: totals, atomicity, coupon redemption, lifecycle.

mod common;

use atelier_server::auth::{CurrentUser, Role};
use atelier_server::db::models::{
    OrderCreate, OrderFilters, OrderItemRequest, OrderPriority, OrderStatus, OrderUpdate,
    Pagination,
};
use atelier_server::orders::{OrderError, OrderManager, OrderScope};
use common::*;

const TAX_RATE_BP: u32 = 800;

fn manager(pool: &sqlx::SqlitePool) -> OrderManager {
    OrderManager::new(pool.clone(), TAX_RATE_BP)
}

fn item(product_id: &str, quantity: i64) -> OrderItemRequest {
    OrderItemRequest {
        product_id: product_id.to_string(),
        quantity,
        size: None,
        color: None,
    }
}

fn request(items: Vec<OrderItemRequest>, shipping_address_id: Option<&str>) -> OrderCreate {
    OrderCreate {
        items,
        shipping_address_id: shipping_address_id.map(str::to_string),
        billing_address_id: None,
        payment_method: None,
        priority: OrderPriority::default(),
        coupon_code: None,
        notes: None,
    }
}

fn customer(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        role: Role::Customer,
    }
}

fn admin() -> CurrentUser {
    CurrentUser {
        id: "admin".to_string(),
        role: Role::Admin,
    }
}

#[tokio::test]
async fn totals_for_simple_order_over_free_shipping_threshold() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;
    seed_address(&pool, "a1", "u1", "US").await;

    let detail = manager(&pool)
        .create_order("u1", request(vec![item("suit", 1)], Some("a1")))
        .await
        .unwrap();

    assert_eq!(detail.header.subtotal_cents, 12_000);
    assert_eq!(detail.header.tax_cents, 960);
    assert_eq!(detail.header.shipping_cents, 0);
    assert_eq!(detail.header.discount_cents, 0);
    assert_eq!(detail.header.total_cents, 12_960);
    assert_eq!(detail.header.status, OrderStatus::Pending);
    assert!(detail.header.order_number.starts_with("ORD-"));
    // Billing falls back to shipping when omitted
    assert_eq!(detail.header.billing_address_id.as_deref(), Some("a1"));
    assert_eq!(detail.items_count, 1);
    assert_eq!(detail.items[0].unit_price_cents, 12_000);
    assert_eq!(stock_of(&pool, "suit").await, 9);
}

#[tokio::test]
async fn fixed_coupon_with_domestic_shipping() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "shirt", 2_000, 10).await;
    seed_address(&pool, "a1", "u1", "US").await;
    seed_coupon(&pool, "c1", "TEN-OFF", "fixed", 1_000, None, None).await;

    let mut req = request(vec![item("shirt", 2)], Some("a1"));
    req.coupon_code = Some("TEN-OFF".to_string());
    let detail = manager(&pool).create_order("u1", req).await.unwrap();

    assert_eq!(detail.header.subtotal_cents, 4_000);
    assert_eq!(detail.header.discount_cents, 1_000);
    assert_eq!(detail.header.tax_cents, 240);
    assert_eq!(detail.header.shipping_cents, 500);
    assert_eq!(detail.header.total_cents, 3_740);
    assert_eq!(detail.header.coupon_code.as_deref(), Some("TEN-OFF"));
    assert_eq!(coupon_used_count(&pool, "TEN-OFF").await, 1);
}

#[tokio::test]
async fn rejects_insufficient_stock_without_side_effects() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "coat", 8_000, 3).await;

    let err = manager(&pool)
        .create_order("u1", request(vec![item("coat", 5)], None))
        .await
        .unwrap_err();

    match err {
        OrderError::InsufficientStock {
            available,
            requested,
            ..
        } => {
            assert_eq!(available, 3);
            assert_eq!(requested, 5);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
    assert_eq!(stock_of(&pool, "coat").await, 3);
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn failing_line_rolls_back_the_whole_batch() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "jacket", 9_000, 10).await;
    seed_product(&pool, "scarf", 1_500, 1).await;

    let err = manager(&pool)
        .create_order("u1", request(vec![item("jacket", 1), item("scarf", 2)], None))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InsufficientStock { .. }));
    assert_eq!(stock_of(&pool, "jacket").await, 10);
    assert_eq!(stock_of(&pool, "scarf").await, 1);
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn duplicate_lines_are_checked_cumulatively() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "vest", 3_000, 3).await;

    let err = manager(&pool)
        .create_order("u1", request(vec![item("vest", 2), item("vest", 2)], None))
        .await
        .unwrap_err();

    match err {
        OrderError::InsufficientStock { requested, .. } => assert_eq!(requested, 4),
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
    assert_eq!(stock_of(&pool, "vest").await, 3);
}

#[tokio::test]
async fn coupon_minimum_order_is_enforced() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "tie", 2_000, 10).await;
    seed_coupon(&pool, "c1", "BIG-SPEND", "fixed", 1_000, Some(5_000), None).await;

    let mut req = request(vec![item("tie", 1)], None);
    req.coupon_code = Some("BIG-SPEND".to_string());
    let err = manager(&pool).create_order("u1", req).await.unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(coupon_used_count(&pool, "BIG-SPEND").await, 0);
}

#[tokio::test]
async fn exhausted_coupon_is_rejected_on_the_next_order() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "belt", 3_000, 10).await;
    seed_coupon(&pool, "c1", "ONCE", "percentage", 10, None, Some(1)).await;

    let mut first = request(vec![item("belt", 1)], None);
    first.coupon_code = Some("ONCE".to_string());
    let detail = manager(&pool).create_order("u1", first).await.unwrap();
    assert_eq!(detail.header.discount_cents, 300);
    assert_eq!(coupon_used_count(&pool, "ONCE").await, 1);

    let mut second = request(vec![item("belt", 1)], None);
    second.coupon_code = Some("ONCE".to_string());
    let err = manager(&pool).create_order("u1", second).await.unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert_eq!(coupon_used_count(&pool, "ONCE").await, 1);
}

#[tokio::test]
async fn missing_and_foreign_addresses_get_the_same_rejection() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_user(&pool, "u2", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;
    seed_address(&pool, "a2", "u2", "US").await;

    let mgr = manager(&pool);
    let foreign = mgr
        .create_order("u1", request(vec![item("suit", 1)], Some("a2")))
        .await
        .unwrap_err();
    let missing = mgr
        .create_order("u1", request(vec![item("suit", 1)], Some("nope")))
        .await
        .unwrap_err();

    assert!(matches!(foreign, OrderError::Validation(_)));
    assert_eq!(foreign.to_string(), missing.to_string());
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn checkout_clears_the_whole_cart() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;
    seed_product(&pool, "shirt", 2_000, 10).await;

    let mgr = manager(&pool);
    mgr.add_to_cart(
        "u1",
        atelier_server::db::models::CartAdd {
            product_id: "suit".to_string(),
            quantity: 1,
            size: None,
            color: None,
            customizations: None,
        },
    )
    .await
    .unwrap();
    mgr.add_to_cart(
        "u1",
        atelier_server::db::models::CartAdd {
            product_id: "shirt".to_string(),
            quantity: 2,
            size: None,
            color: None,
            customizations: None,
        },
    )
    .await
    .unwrap();

    // The order covers only the suit, but a successful checkout empties
    // the whole cart, unpurchased lines included.
    mgr.create_order("u1", request(vec![item("suit", 1)], None))
        .await
        .unwrap();

    assert_eq!(cart_row_count(&pool, "u1").await, 0);
    let summary = mgr.get_cart("u1").await.unwrap();
    assert!(summary.items.is_empty());
}

#[tokio::test]
async fn addressless_order_has_no_shipping_charge() {
    let pool = setup_pool().await;
    seed_user(&pool, "d1", "designer").await;
    seed_product(&pool, "muslin", 4_000, 10).await;

    let detail = manager(&pool)
        .create_order("d1", request(vec![item("muslin", 1)], None))
        .await
        .unwrap();

    assert_eq!(detail.header.shipping_cents, 0);
    assert_eq!(detail.header.tax_cents, 320);
    assert_eq!(detail.header.total_cents, 4_320);
}

#[tokio::test]
async fn cancel_restores_stock_exactly_once() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let detail = mgr
        .create_order("u1", request(vec![item("suit", 2)], None))
        .await
        .unwrap();
    assert_eq!(stock_of(&pool, "suit").await, 8);

    let cancelled = mgr.cancel_order(&detail.header.id, &customer("u1")).await.unwrap();
    assert_eq!(cancelled.header.status, OrderStatus::Cancelled);
    assert_eq!(stock_of(&pool, "suit").await, 10);

    let err = mgr
        .cancel_order(&detail.header.id, &customer("u1"))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Conflict(_)));
    assert_eq!(stock_of(&pool, "suit").await, 10);
}

#[tokio::test]
async fn cancel_is_rejected_once_processing_starts() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let detail = mgr
        .create_order("u1", request(vec![item("suit", 1)], None))
        .await
        .unwrap();

    mgr.update_order(
        &detail.header.id,
        OrderUpdate {
            status: Some(OrderStatus::Processing),
            ..Default::default()
        },
        &admin(),
    )
    .await
    .unwrap();

    let err = mgr
        .cancel_order(&detail.header.id, &customer("u1"))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Conflict(_)));
    assert_eq!(stock_of(&pool, "suit").await, 9);
}

#[tokio::test]
async fn customers_may_only_update_notes() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let detail = mgr
        .create_order("u1", request(vec![item("suit", 1)], None))
        .await
        .unwrap();

    // Staff-only fields in a customer patch are dropped, not applied
    let unchanged = mgr
        .update_order(
            &detail.header.id,
            OrderUpdate {
                status: Some(OrderStatus::Shipped),
                ..Default::default()
            },
            &customer("u1"),
        )
        .await
        .unwrap();
    assert_eq!(unchanged.header.status, OrderStatus::Pending);

    let updated = mgr
        .update_order(
            &detail.header.id,
            OrderUpdate {
                notes: Some("Please gift wrap".to_string()),
                ..Default::default()
            },
            &customer("u1"),
        )
        .await
        .unwrap();
    assert_eq!(updated.header.notes.as_deref(), Some("Please gift wrap"));
    assert_eq!(updated.header.status, OrderStatus::Pending);

    // Empty patch is a read
    let unchanged = mgr
        .update_order(&detail.header.id, OrderUpdate::default(), &customer("u1"))
        .await
        .unwrap();
    assert_eq!(unchanged.header.notes.as_deref(), Some("Please gift wrap"));
}

#[tokio::test]
async fn another_customers_order_reads_as_missing() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_user(&pool, "u2", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let detail = mgr
        .create_order("u1", request(vec![item("suit", 1)], None))
        .await
        .unwrap();

    let err = mgr
        .get_order(&detail.header.id, &OrderScope::Customer("u2".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));

    let err = mgr
        .update_order(
            &detail.header.id,
            OrderUpdate {
                notes: Some("mine now".to_string()),
                ..Default::default()
            },
            &customer("u2"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}

#[tokio::test]
async fn admin_listing_hides_cancelled_unless_filtered() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_user(&pool, "u2", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let kept = mgr
        .create_order("u1", request(vec![item("suit", 1)], None))
        .await
        .unwrap();
    let dropped = mgr
        .create_order("u2", request(vec![item("suit", 1)], None))
        .await
        .unwrap();
    mgr.cancel_order(&dropped.header.id, &customer("u2"))
        .await
        .unwrap();

    let page = mgr
        .list_orders(
            &OrderScope::Admin,
            &OrderFilters::default(),
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.orders[0].id, kept.header.id);
    assert_eq!(page.orders[0].items_count, 1);

    let cancelled_page = mgr
        .list_orders(
            &OrderScope::Admin,
            &OrderFilters {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(cancelled_page.total, 1);
    assert_eq!(cancelled_page.orders[0].id, dropped.header.id);

    // Customers only ever see their own orders
    let own = mgr
        .list_orders(
            &OrderScope::Customer("u1".to_string()),
            &OrderFilters::default(),
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(own.total, 1);
    assert_eq!(own.orders[0].id, kept.header.id);
}

#[tokio::test]
async fn admin_removal_is_soft_and_keeps_stock_committed() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let detail = mgr
        .create_order("u1", request(vec![item("suit", 2)], None))
        .await
        .unwrap();
    assert_eq!(stock_of(&pool, "suit").await, 8);

    mgr.delete_order(&detail.header.id).await.unwrap();

    let after = mgr
        .get_order(&detail.header.id, &OrderScope::Admin)
        .await
        .unwrap();
    assert_eq!(after.header.status, OrderStatus::Cancelled);
    // Removal is bookkeeping, not a return: stock stays sold
    assert_eq!(stock_of(&pool, "suit").await, 8);
}

#[tokio::test]
async fn shipped_orders_cannot_be_removed() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let detail = mgr
        .create_order("u1", request(vec![item("suit", 1)], None))
        .await
        .unwrap();
    mgr.update_order(
        &detail.header.id,
        OrderUpdate {
            status: Some(OrderStatus::Shipped),
            ..Default::default()
        },
        &admin(),
    )
    .await
    .unwrap();

    let err = mgr.delete_order(&detail.header.id).await.unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
}

#[tokio::test]
async fn empty_and_invalid_requests_are_rejected_up_front() {
    let pool = setup_pool().await;
    seed_user(&pool, "u1", "customer").await;
    seed_product(&pool, "suit", 12_000, 10).await;

    let mgr = manager(&pool);
    let err = mgr.create_order("u1", request(vec![], None)).await.unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));

    let err = mgr
        .create_order("u1", request(vec![item("suit", 0)], None))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));

    let err = mgr
        .create_order("u1", request(vec![item("ghost", 1)], None))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
}
