//! Order engine behavior: sequential line processing, snapshot pricing,
//! running totals, partial-failure exposure, terminal payment states.

mod common;

use barcade_server::AppError;
use barcade_server::db::models::{OrderItemType, OrderLineInput};
use barcade_server::db::repository::CafeItemRepository;
use chrono::{Duration, Utc};
use common::{id_of, seed_bar_game, seed_cafe_item, seed_customer, test_state};

fn cafe_line(item_id: &str, quantity: i64) -> OrderLineInput {
    OrderLineInput {
        item_id: item_id.to_string(),
        item_type: OrderItemType::CafeItem,
        quantity,
    }
}

fn session_line(session_id: &str) -> OrderLineInput {
    OrderLineInput {
        item_id: session_id.to_string(),
        item_type: OrderItemType::GameSession,
        quantity: 1,
    }
}

/// The stored total must always equal the sum over line contributions
fn assert_total_consistent(detail: &barcade_server::db::models::OrderDetail) {
    let expected: f64 = detail.items.iter().map(|i| i.line_total()).sum();
    assert!(
        (detail.total_amount - expected).abs() < 1e-9,
        "total {} != items sum {}",
        detail.total_amount,
        expected
    );
}

#[tokio::test]
async fn create_order_totals_and_reserves_stock() {
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;
    let cake = seed_cafe_item(&state, "cake", 5.5, 4).await;
    let customer = seed_customer(&state, "Alex").await;

    let detail = state
        .orders
        .create_order(
            &id_of(&customer.id),
            &[cafe_line(&id_of(&coffee.id), 2), cafe_line(&id_of(&cake.id), 1)],
        )
        .await
        .unwrap();

    assert_eq!(detail.items.len(), 2);
    assert!((detail.total_amount - 11.5).abs() < 1e-9);
    assert_total_consistent(&detail);

    let repo = CafeItemRepository::new(state.db.clone());
    let coffee_after = repo.find_by_id(&id_of(&coffee.id)).await.unwrap().unwrap();
    let cake_after = repo.find_by_id(&id_of(&cake.id)).await.unwrap().unwrap();
    assert_eq!(coffee_after.quantity, 8);
    assert_eq!(cake_after.quantity, 3);
}

#[tokio::test]
async fn create_order_requires_customer() {
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;

    let err = state
        .orders
        .create_order("customer:missing", &[cafe_line(&id_of(&coffee.id), 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Rejected before any line processing: stock untouched
    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&id_of(&coffee.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 10);
}

#[tokio::test]
async fn create_order_snapshots_session_cost() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "snooker", 10.0).await;
    let customer = seed_customer(&state, "Alex").await;

    let sessions =
        barcade_server::db::repository::GameSessionRepository::new(state.db.clone());
    let session = sessions
        .create(
            game.id.clone().unwrap(),
            customer.id.clone().unwrap(),
            Utc::now() - Duration::minutes(90),
        )
        .await
        .unwrap();
    let session_id = id_of(&session.id);
    state.sessions.check_out(&session_id).await.unwrap();

    let detail = state
        .orders
        .create_order(&id_of(&customer.id), &[session_line(&session_id)])
        .await
        .unwrap();

    assert_eq!(detail.items.len(), 1);
    let line = &detail.items[0];
    assert_eq!(line.quantity, 1);
    assert_eq!(line.price_at_sale, line.cost_at_sale.unwrap());
    assert!((detail.total_amount - 15.0).abs() < 0.01);
    assert_total_consistent(&detail);
}

#[tokio::test]
async fn open_session_line_charges_zero() {
    // A session that has not been checked out has no cost yet
    let state = test_state().await;
    let game = seed_bar_game(&state, "darts", 8.0).await;
    let customer = seed_customer(&state, "Sam").await;

    let session = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap();

    let detail = state
        .orders
        .create_order(&id_of(&customer.id), &[session_line(&id_of(&session.id))])
        .await
        .unwrap();

    assert_eq!(detail.total_amount, 0.0);
    assert_eq!(detail.items[0].price_at_sale, 0.0);
}

#[tokio::test]
async fn create_order_partial_failure_keeps_reservations() {
    // The second line fails on stock; the call returns an error, no order
    // is persisted, and the first line's decrement remains applied.
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 5).await;
    let cake = seed_cafe_item(&state, "cake", 5.5, 1).await;
    let customer = seed_customer(&state, "Alex").await;

    let err = state
        .orders
        .create_order(
            &id_of(&customer.id),
            &[cafe_line(&id_of(&coffee.id), 2), cafe_line(&id_of(&cake.id), 3)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock(_)));

    let orders = state.orders.list_orders().await.unwrap();
    assert!(orders.is_empty());

    let repo = CafeItemRepository::new(state.db.clone());
    let coffee_after = repo.find_by_id(&id_of(&coffee.id)).await.unwrap().unwrap();
    let cake_after = repo.find_by_id(&id_of(&cake.id)).await.unwrap().unwrap();
    assert_eq!(coffee_after.quantity, 3);
    assert_eq!(cake_after.quantity, 1);
}

#[tokio::test]
async fn add_items_accumulates_onto_the_total() {
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;
    let cake = seed_cafe_item(&state, "cake", 5.5, 4).await;
    let customer = seed_customer(&state, "Alex").await;

    let order = state
        .orders
        .create_order(&id_of(&customer.id), &[cafe_line(&id_of(&coffee.id), 1)])
        .await
        .unwrap();

    let updated = state
        .orders
        .add_items(&id_of(&order.id), &[cafe_line(&id_of(&cake.id), 2)])
        .await
        .unwrap();

    assert_eq!(updated.items.len(), 2);
    assert!((updated.total_amount - 14.0).abs() < 1e-9);
    assert_total_consistent(&updated);
}

#[tokio::test]
async fn resize_line_applies_price_delta_without_touching_stock() {
    // Raising a line from 2 to 5 adds 3 x unit price to the total; the
    // stored stock count is not adjusted for the delta.
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;
    let customer = seed_customer(&state, "Alex").await;

    let order = state
        .orders
        .create_order(&id_of(&customer.id), &[cafe_line(&id_of(&coffee.id), 2)])
        .await
        .unwrap();
    let line_id = id_of(&order.items[0].id);

    let updated = state
        .orders
        .update_item_quantity(&id_of(&order.id), &line_id, 5)
        .await
        .unwrap();

    assert!((updated.total_amount - 15.0).abs() < 1e-9);
    assert_total_consistent(&updated);

    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&id_of(&coffee.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 8); // only the original reservation of 2
}

#[tokio::test]
async fn session_lines_have_fixed_quantity() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "darts", 8.0).await;
    let customer = seed_customer(&state, "Sam").await;

    let session = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap();
    state.sessions.check_out(&id_of(&session.id)).await.unwrap();

    let order = state
        .orders
        .create_order(&id_of(&customer.id), &[session_line(&id_of(&session.id))])
        .await
        .unwrap();

    let err = state
        .orders
        .update_item_quantity(&id_of(&order.id), &id_of(&order.items[0].id), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn remove_line_subtracts_contribution_and_keeps_stock_reserved() {
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;
    let cake = seed_cafe_item(&state, "cake", 5.5, 4).await;
    let customer = seed_customer(&state, "Alex").await;

    let order = state
        .orders
        .create_order(
            &id_of(&customer.id),
            &[cafe_line(&id_of(&coffee.id), 2), cafe_line(&id_of(&cake.id), 1)],
        )
        .await
        .unwrap();
    let coffee_line = id_of(&order.items[0].id);

    let updated = state
        .orders
        .remove_item(&id_of(&order.id), &coffee_line)
        .await
        .unwrap();

    assert_eq!(updated.items.len(), 1);
    assert!((updated.total_amount - 5.5).abs() < 1e-9);
    assert_total_consistent(&updated);

    // Reserved stock is not returned to the ledger
    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&id_of(&coffee.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 8);

    // The line record is gone
    let err = state
        .orders
        .remove_item(&id_of(&order.id), &coffee_line)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn payment_is_idempotent_terminal() {
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;
    let customer = seed_customer(&state, "Alex").await;

    let order = state
        .orders
        .create_order(&id_of(&customer.id), &[cafe_line(&id_of(&coffee.id), 1)])
        .await
        .unwrap();
    let order_id = id_of(&order.id);

    let paid = state.orders.pay_for_order(&order_id).await.unwrap();
    assert_eq!(
        paid.payment_status,
        barcade_server::db::models::PaymentStatus::Paid
    );

    let err = state.orders.pay_for_order(&order_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let still_paid = state.orders.order_detail(&order_id).await.unwrap();
    assert_eq!(
        still_paid.payment_status,
        barcade_server::db::models::PaymentStatus::Paid
    );
}

#[tokio::test]
async fn paid_orders_reject_item_mutation() {
    let state = test_state().await;
    let coffee = seed_cafe_item(&state, "coffee", 3.0, 10).await;
    let cake = seed_cafe_item(&state, "cake", 5.5, 4).await;
    let customer = seed_customer(&state, "Alex").await;

    let order = state
        .orders
        .create_order(&id_of(&customer.id), &[cafe_line(&id_of(&coffee.id), 1)])
        .await
        .unwrap();
    let order_id = id_of(&order.id);
    let line_id = id_of(&order.items[0].id);

    state.orders.pay_for_order(&order_id).await.unwrap();

    let err = state
        .orders
        .add_items(&order_id, &[cafe_line(&id_of(&cake.id), 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = state
        .orders
        .update_item_quantity(&order_id, &line_id, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = state.orders.remove_item(&order_id, &line_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Total untouched by the rejected calls
    let detail = state.orders.order_detail(&order_id).await.unwrap();
    assert!((detail.total_amount - 3.0).abs() < 1e-9);
}
