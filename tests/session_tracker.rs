//! Session tracker behavior: check-in rules, checkout billing, terminality.

mod common;

use barcade_server::AppError;
use barcade_server::db::models::GameSessionUpdate;
use barcade_server::db::repository::{BarGameRepository, GameSessionRepository};
use chrono::{Duration, Utc};
use common::{id_of, seed_bar_game, seed_customer, test_state};

#[tokio::test]
async fn check_in_creates_an_active_session() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "darts", 8.0).await;
    let customer = seed_customer(&state, "Alex").await;

    let session = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap();

    assert!(session.end_time.is_none());
    assert!(session.cost.is_none());

    let active = state.sessions.active_sessions().await.unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn check_in_rejects_unavailable_game() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "pool", 12.0).await;
    let customer = seed_customer(&state, "Sam").await;

    BarGameRepository::new(state.db.clone())
        .update(
            &id_of(&game.id),
            barcade_server::db::models::BarGameUpdate {
                name: None,
                description: None,
                price_per_hour: None,
                available: Some(false),
            },
        )
        .await
        .unwrap();

    let err = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unavailable(_)));
}

#[tokio::test]
async fn check_in_rejects_missing_game_and_customer() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "foosball", 5.0).await;
    let customer = seed_customer(&state, "Kim").await;

    let err = state
        .sessions
        .check_in("bar_game:missing", &id_of(&customer.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = state
        .sessions
        .check_in(&id_of(&game.id), "customer:missing")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn one_active_session_per_customer() {
    let state = test_state().await;
    let darts = seed_bar_game(&state, "darts", 8.0).await;
    let pool = seed_bar_game(&state, "pool", 12.0).await;
    let customer = seed_customer(&state, "Alex").await;
    let other = seed_customer(&state, "Sam").await;

    state
        .sessions
        .check_in(&id_of(&darts.id), &id_of(&customer.id))
        .await
        .unwrap();

    // Same customer cannot hold a second open session, on any game
    let err = state
        .sessions
        .check_in(&id_of(&pool.id), &id_of(&customer.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // A different customer is unaffected
    state
        .sessions
        .check_in(&id_of(&pool.id), &id_of(&other.id))
        .await
        .unwrap();
}

#[tokio::test]
async fn checkout_bills_ninety_minutes_at_hourly_rate() {
    // 90 minutes at 10.0/hour comes to 15.0
    let state = test_state().await;
    let game = seed_bar_game(&state, "snooker", 10.0).await;
    let customer = seed_customer(&state, "Alex").await;

    let sessions = GameSessionRepository::new(state.db.clone());
    let session = sessions
        .create(
            game.id.clone().unwrap(),
            customer.id.clone().unwrap(),
            Utc::now() - Duration::minutes(90),
        )
        .await
        .unwrap();

    let closed = state.sessions.check_out(&id_of(&session.id)).await.unwrap();

    let cost = closed.cost.unwrap();
    assert!((cost - 15.0).abs() < 0.01, "cost was {cost}");
    assert!(closed.end_time.is_some());
}

#[tokio::test]
async fn checkout_is_terminal() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "darts", 8.0).await;
    let customer = seed_customer(&state, "Alex").await;

    let session = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap();
    let session_id = id_of(&session.id);

    let closed = state.sessions.check_out(&session_id).await.unwrap();

    let err = state.sessions.check_out(&session_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Cost and end time are unchanged by the failed second call
    let stored = GameSessionRepository::new(state.db.clone())
        .find_by_id(&session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.cost, closed.cost);
    assert_eq!(stored.end_time, closed.end_time);

    let past = state.sessions.past_sessions().await.unwrap();
    assert_eq!(past.len(), 1);
}

#[tokio::test]
async fn checkout_with_deleted_game_costs_zero() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "pinball", 9.0).await;
    let customer = seed_customer(&state, "Sam").await;

    let session = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap();

    BarGameRepository::new(state.db.clone())
        .delete(&id_of(&game.id))
        .await
        .unwrap();

    let closed = state.sessions.check_out(&id_of(&session.id)).await.unwrap();
    assert_eq!(closed.cost, Some(0.0));
}

#[tokio::test]
async fn closed_sessions_reject_updates() {
    let state = test_state().await;
    let game = seed_bar_game(&state, "darts", 8.0).await;
    let customer = seed_customer(&state, "Alex").await;

    let session = state
        .sessions
        .check_in(&id_of(&game.id), &id_of(&customer.id))
        .await
        .unwrap();
    let session_id = id_of(&session.id);
    state.sessions.check_out(&session_id).await.unwrap();

    let err = state
        .sessions
        .update_session(
            &session_id,
            GameSessionUpdate {
                start_time: None,
                end_time: None,
                cost: Some(0.0),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
