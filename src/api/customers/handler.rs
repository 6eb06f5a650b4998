//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    AssignMembership, Customer, CustomerCreate, CustomerUpdate, GameSession, OrderDetail,
};
use crate::db::repository::{CustomerRepository, MembershipRepository};
use crate::utils::{AppError, AppResponse, AppResult, created, ok};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// List all customers
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Customer>>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customers = repo.find_all().await?;
    Ok(ok(customers))
}

/// Search customers by name, email or phone
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<AppResponse<Vec<Customer>>>> {
    if params.query.trim().is_empty() {
        return Err(AppError::validation("Search query is required"));
    }
    let repo = CustomerRepository::new(state.db.clone());
    let customers = repo.search(&params.query).await?;
    Ok(ok(customers))
}

/// Get customer by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Customer>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    Ok(ok(customer))
}

/// Create a customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Customer>>)> {
    payload.validate()?;
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.create(payload).await?;
    Ok(created(customer))
}

/// Update a customer
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<AppResponse<Customer>>> {
    payload.validate()?;
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.update(&id, payload).await?;
    Ok(ok(customer))
}

/// Delete a customer
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = CustomerRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(AppResponse::ok_empty()))
}

/// Orders placed by the customer
pub async fn orders(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<OrderDetail>>>> {
    let orders = state.orders.orders_for_customer(&id).await?;
    Ok(ok(orders))
}

/// Game sessions held by the customer
pub async fn game_sessions(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<GameSession>>>> {
    let sessions = state.sessions.sessions_for_customer(&id).await?;
    Ok(ok(sessions))
}

/// Link a customer to a membership
pub async fn assign_membership(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssignMembership>,
) -> AppResult<Json<AppResponse<Customer>>> {
    payload.validate()?;

    let memberships = MembershipRepository::new(state.db.clone());
    let membership = memberships
        .find_by_id(&payload.membership_id)
        .await?
        .ok_or_else(|| AppError::not_found("Membership not found"))?;

    let customers = CustomerRepository::new(state.db.clone());
    customers
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;

    let membership_ref = membership.id.ok_or_else(|| {
        AppError::internal("Membership record missing id")
    })?;
    let customer = customers.set_membership(&id, &membership_ref).await?;
    Ok(ok(customer))
}
