//! Inventory ledger behavior: sufficiency checks, stock-flag drain,
//! serialized reservations under concurrency.

mod common;

use barcade_server::AppError;
use barcade_server::db::repository::CafeItemRepository;
use common::{id_of, seed_cafe_item, test_state};

#[tokio::test]
async fn reserve_returns_unit_price_and_decrements() {
    let state = test_state().await;
    let item = seed_cafe_item(&state, "espresso", 3.5, 10).await;
    let item_id = id_of(&item.id);

    let price = state.inventory.check_and_reserve(&item_id, 4).await.unwrap();
    assert_eq!(price, 3.5);

    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 6);
    assert!(stored.in_stock);
}

#[tokio::test]
async fn reserve_unknown_item_is_not_found() {
    let state = test_state().await;
    let err = state
        .inventory
        .check_and_reserve("cafe_item:missing", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn draining_stock_flips_the_flag_and_blocks_further_orders() {
    // Full quantity can be reserved in one call; the flag drops with the
    // count, and the next request is rejected.
    let state = test_state().await;
    let item = seed_cafe_item(&state, "muffin", 2.0, 5).await;
    let item_id = id_of(&item.id);

    state.inventory.check_and_reserve(&item_id, 5).await.unwrap();

    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 0);
    assert!(!stored.in_stock);

    let err = state
        .inventory
        .check_and_reserve(&item_id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock(_)));
}

#[tokio::test]
async fn partial_reservation_does_not_flip_the_flag() {
    let state = test_state().await;
    let item = seed_cafe_item(&state, "tea", 2.5, 3).await;
    let item_id = id_of(&item.id);

    state.inventory.check_and_reserve(&item_id, 2).await.unwrap();

    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 1);
    assert!(stored.in_stock);
}

#[tokio::test]
async fn concurrent_reservations_cannot_oversell() {
    // Two reservations of 3 against a count of 5: the per-item critical
    // section forces one to observe the other's decrement and fail.
    let state = test_state().await;
    let item = seed_cafe_item(&state, "stout", 6.0, 5).await;
    let item_id = id_of(&item.id);

    let ledger_a = state.inventory.clone();
    let ledger_b = state.inventory.clone();
    let id_a = item_id.clone();
    let id_b = item_id.clone();

    let (a, b) = tokio::join!(
        tokio::spawn(async move { ledger_a.check_and_reserve(&id_a, 3).await }),
        tokio::spawn(async move { ledger_b.check_and_reserve(&id_b, 3).await }),
    );
    let results = [a.unwrap(), b.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let stored = CafeItemRepository::new(state.db.clone())
        .find_by_id(&item_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity, 2);
    assert!(stored.quantity >= 0);
}
