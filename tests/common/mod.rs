//! Shared test fixtures: in-memory server state and seed helpers
#![allow(dead_code)]

use barcade_server::db::models::{
    BarGame, BarGameCreate, CafeItem, CafeItemCreate, Customer, CustomerCreate,
};
use barcade_server::db::repository::{
    BarGameRepository, CafeItemRepository, CustomerRepository,
};
use barcade_server::{Config, ServerState};

/// Fresh state over an ephemeral in-memory database
pub async fn test_state() -> ServerState {
    let config = Config::with_overrides("/tmp/barcade-test", 0);
    ServerState::in_memory(config)
        .await
        .expect("in-memory state")
}

pub async fn seed_cafe_item(state: &ServerState, name: &str, price: f64, quantity: i64) -> CafeItem {
    CafeItemRepository::new(state.db.clone())
        .create(CafeItemCreate {
            name: name.to_string(),
            description: None,
            price,
            category: Some("drinks".to_string()),
            quantity: Some(quantity),
            in_stock: Some(quantity > 0),
        })
        .await
        .expect("seed cafe item")
}

pub async fn seed_bar_game(state: &ServerState, name: &str, price_per_hour: f64) -> BarGame {
    BarGameRepository::new(state.db.clone())
        .create(BarGameCreate {
            name: name.to_string(),
            description: None,
            price_per_hour,
            available: Some(true),
        })
        .await
        .expect("seed bar game")
}

pub async fn seed_customer(state: &ServerState, name: &str) -> Customer {
    CustomerRepository::new(state.db.clone())
        .create(CustomerCreate {
            name: name.to_string(),
            email: None,
            phone: None,
            membership: None,
        })
        .await
        .expect("seed customer")
}

/// String id of a persisted entity
pub fn id_of(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().expect("persisted id").to_string()
}
