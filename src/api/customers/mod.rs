//! Customer API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/search", get(handler::search))
        .route("/{id}/orders", get(handler::orders))
        .route("/{id}/game-sessions", get(handler::game_sessions))
        // assign and link are the same operation surfaced on two paths
        .route("/{id}/assign-membership", put(handler::assign_membership))
        .route("/{id}/link-membership", put(handler::assign_membership))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
