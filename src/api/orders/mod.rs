//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{order_id}/items", post(handler::add_items))
        .route(
            "/{order_id}/items/{item_id}",
            put(handler::update_item_quantity).delete(handler::remove_item),
        )
        .route("/{order_id}/pay", post(handler::pay))
        .route("/{order_id}", get(handler::get_by_id))
}
