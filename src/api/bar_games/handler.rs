//! Bar Game API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    BarGame, BarGameCreate, BarGameUpdate, CheckInRequest, GameSession, GameSessionUpdate,
};
use crate::db::repository::BarGameRepository;
use crate::utils::{AppError, AppResponse, AppResult, created, ok};

// ========== Bar Games ==========

/// List all bar games
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<BarGame>>>> {
    let repo = BarGameRepository::new(state.db.clone());
    let games = repo.find_all().await?;
    Ok(ok(games))
}

/// Get bar game by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<BarGame>>> {
    let repo = BarGameRepository::new(state.db.clone());
    let game = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Bar game not found"))?;
    Ok(ok(game))
}

/// Create a bar game
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BarGameCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<BarGame>>)> {
    payload.validate()?;
    let repo = BarGameRepository::new(state.db.clone());
    let game = repo.create(payload).await?;
    Ok(created(game))
}

/// Update a bar game
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BarGameUpdate>,
) -> AppResult<Json<AppResponse<BarGame>>> {
    payload.validate()?;
    let repo = BarGameRepository::new(state.db.clone());
    let game = repo.update(&id, payload).await?;
    Ok(ok(game))
}

/// Delete a bar game
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = BarGameRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(AppResponse::ok_empty()))
}

// ========== Game Sessions ==========

/// Check a customer into a game
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<GameSession>>)> {
    let session = state.sessions.check_in(&id, &payload.customer_id).await?;
    Ok(created(session))
}

/// Check out of a game session, computing the elapsed-time cost
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<GameSession>>> {
    let session = state.sessions.check_out(&id).await?;
    Ok(ok(session))
}

/// Sessions with no end time
pub async fn active_sessions(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<GameSession>>>> {
    let sessions = state.sessions.active_sessions().await?;
    Ok(ok(sessions))
}

/// Sessions already checked out
pub async fn past_sessions(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<GameSession>>>> {
    let sessions = state.sessions.past_sessions().await?;
    Ok(ok(sessions))
}

/// Administrative session update (closed sessions are rejected)
pub async fn update_session(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<GameSessionUpdate>,
) -> AppResult<Json<AppResponse<GameSession>>> {
    let session = state.sessions.update_session(&id, payload).await?;
    Ok(ok(session))
}

/// Administrative session delete
pub async fn delete_session(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.sessions.delete_session(&id).await?;
    Ok(Json(AppResponse::ok_empty()))
}
