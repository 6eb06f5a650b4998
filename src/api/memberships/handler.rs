//! Membership API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Membership, MembershipCreate, MembershipUpdate};
use crate::db::repository::MembershipRepository;
use crate::utils::{AppError, AppResponse, AppResult, created, ok};

/// List all memberships
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Membership>>>> {
    let repo = MembershipRepository::new(state.db.clone());
    let memberships = repo.find_all().await?;
    Ok(ok(memberships))
}

/// Get membership by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Membership>>> {
    let repo = MembershipRepository::new(state.db.clone());
    let membership = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Membership not found"))?;
    Ok(ok(membership))
}

/// Create a membership
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MembershipCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Membership>>)> {
    payload.validate()?;
    let repo = MembershipRepository::new(state.db.clone());
    let membership = repo.create(payload).await?;
    Ok(created(membership))
}

/// Update a membership
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MembershipUpdate>,
) -> AppResult<Json<AppResponse<Membership>>> {
    payload.validate()?;
    let repo = MembershipRepository::new(state.db.clone());
    let membership = repo.update(&id, payload).await?;
    Ok(ok(membership))
}

/// Delete a membership
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = MembershipRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(AppResponse::ok_empty()))
}
