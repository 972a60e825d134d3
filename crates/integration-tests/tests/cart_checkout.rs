//! Cart editing, subscriptions and checkout.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use booknest_core::{BookId, Price};
use booknest_integration_tests::TestContext;
use booknest_storefront::{AppError, Notification, Severity};

#[test]
fn test_cart_lifecycle() {
    let ctx = TestContext::new();
    let mut storefront = ctx.storefront();

    // Add the same book twice and another once.
    storefront.add_to_cart(BookId::new(1)).unwrap();
    storefront.add_to_cart(BookId::new(1)).unwrap();
    storefront.add_to_cart(BookId::new(4)).unwrap();

    let cart = storefront.cart();
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.line(BookId::new(1)).unwrap().quantity, 2);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Price::from_cents(2499 * 2 + 2999));

    // Quantity edits.
    storefront.increment(BookId::new(4));
    storefront.decrement(BookId::new(1));
    assert_eq!(storefront.cart().line(BookId::new(4)).unwrap().quantity, 2);
    assert_eq!(storefront.cart().line(BookId::new(1)).unwrap().quantity, 1);

    storefront.update_quantity(BookId::new(1), 0);
    assert!(storefront.cart().line(BookId::new(1)).is_none());

    storefront.remove_from_cart(BookId::new(4));
    assert!(storefront.cart().is_empty());
    assert_eq!(storefront.cart_summary().badge(), None);
}

#[test]
fn test_cart_ignores_stock() {
    let ctx = TestContext::new();
    let mut storefront = ctx.storefront();
    let stock = storefront.catalog().find(BookId::new(2)).unwrap().stock;

    storefront.update_quantity(BookId::new(2), 1);
    assert!(storefront.cart().is_empty());

    storefront.add_to_cart(BookId::new(2)).unwrap();
    storefront.update_quantity(BookId::new(2), stock + 10);
    assert_eq!(storefront.cart().total_items(), stock + 10);
}

#[test]
fn test_unknown_book_is_rejected_with_notification() {
    let ctx = TestContext::new();
    let mut storefront = ctx.storefront();

    let err = storefront.add_to_cart(BookId::new(404)).unwrap_err();

    assert!(matches!(err, AppError::BookNotFound(id) if id == BookId::new(404)));
    assert_eq!(
        ctx.notifier.last().unwrap().severity,
        Severity::Destructive
    );
}

#[test]
fn test_checkout_acknowledges_and_keeps_cart() {
    let ctx = TestContext::new();
    let mut storefront = ctx.storefront();
    storefront.add_to_cart(BookId::new(3)).unwrap();
    storefront.add_to_cart(BookId::new(5)).unwrap();
    storefront.open_cart();

    let confirmation = storefront.checkout().unwrap();

    assert_eq!(confirmation.item_count, 2);
    assert_eq!(confirmation.total_price, Price::from_cents(1699 + 2299));
    assert_eq!(
        ctx.notifier.last().unwrap(),
        Notification::info(
            "Order placed successfully!",
            "Your order of 2 items for $39.98 has been confirmed."
        )
    );
    assert!(!storefront.is_cart_open());
    assert_eq!(storefront.cart().total_items(), 2);
}

#[test]
fn test_cart_is_not_persisted() {
    let ctx = TestContext::new();
    {
        let mut storefront = ctx.storefront();
        storefront.add_to_cart(BookId::new(1)).unwrap();
    }
    assert!(ctx.storefront().cart().is_empty());
}

#[tokio::test]
async fn test_cart_subscriber_wakes_on_change() {
    let ctx = TestContext::new();
    let mut storefront = ctx.storefront();
    let mut rx = storefront.subscribe_cart();

    let waiter = tokio::spawn(async move {
        rx.changed().await.unwrap();
        *rx.borrow_and_update()
    });

    storefront.add_to_cart(BookId::new(6)).unwrap();

    let summary = tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.item_count, 1);
    assert_eq!(summary.total_price, Price::from_cents(2699));
    assert_eq!(summary.badge().as_deref(), Some("1"));
}
