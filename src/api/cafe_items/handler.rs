//! Cafe Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{CafeItem, CafeItemCreate, CafeItemUpdate};
use crate::db::repository::CafeItemRepository;
use crate::utils::{AppError, AppResponse, AppResult, created, ok};

/// List all cafe items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<CafeItem>>>> {
    let repo = CafeItemRepository::new(state.db.clone());
    let items = repo.find_all().await?;
    Ok(ok(items))
}

/// Get cafe item by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<CafeItem>>> {
    let repo = CafeItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Cafe item not found"))?;
    Ok(ok(item))
}

/// Create a cafe item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CafeItemCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<CafeItem>>)> {
    payload.validate()?;
    let repo = CafeItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(created(item))
}

/// Update a cafe item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CafeItemUpdate>,
) -> AppResult<Json<AppResponse<CafeItem>>> {
    payload.validate()?;
    let repo = CafeItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    Ok(ok(item))
}

/// Delete a cafe item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = CafeItemRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(AppResponse::ok_empty()))
}

/// Items running low or flagged out of stock
pub async fn low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<CafeItem>>>> {
    let repo = CafeItemRepository::new(state.db.clone());
    let items = repo.find_low_stock().await?;
    Ok(ok(items))
}

/// List items in a category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_name): Path<String>,
) -> AppResult<Json<AppResponse<Vec<CafeItem>>>> {
    let repo = CafeItemRepository::new(state.db.clone());
    let items = repo.find_by_category(&category_name).await?;
    Ok(ok(items))
}
