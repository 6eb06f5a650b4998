//! Order API Handlers
//!
//! Thin layer over the order engine: field validation, then delegation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{OrderAddItems, OrderCreate, OrderDetail, OrderItemQuantityUpdate};
use crate::utils::{AppResponse, AppResult, created, ok};

/// List all orders
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<OrderDetail>>>> {
    let orders = state.orders.list_orders().await?;
    Ok(ok(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let order = state.orders.order_detail(&id).await?;
    Ok(ok(order))
}

/// Create an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<OrderDetail>>)> {
    payload.validate()?;
    let order = state
        .orders
        .create_order(&payload.customer_id, &payload.items)
        .await?;
    Ok(created(order))
}

/// Add items to an order
pub async fn add_items(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<OrderAddItems>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    payload.validate()?;
    let order = state.orders.add_items(&order_id, &payload.items).await?;
    Ok(ok(order))
}

/// Resize one line of an order
pub async fn update_item_quantity(
    State(state): State<ServerState>,
    Path((order_id, item_id)): Path<(String, String)>,
    Json(payload): Json<OrderItemQuantityUpdate>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    payload.validate()?;
    let order = state
        .orders
        .update_item_quantity(&order_id, &item_id, payload.quantity)
        .await?;
    Ok(ok(order))
}

/// Remove one line from an order
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((order_id, item_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let order = state.orders.remove_item(&order_id, &item_id).await?;
    Ok(ok(order))
}

/// Mark an order paid
pub async fn pay(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<OrderDetail>>> {
    let order = state.orders.pay_for_order(&order_id).await?;
    Ok(ok(order))
}
