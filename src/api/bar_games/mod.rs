//! Bar Game API module
//!
//! Game CRUD plus the session lifecycle routes (check-in, check-out,
//! active/past listings, administrative update/delete).

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bar-games", bar_game_routes())
}

fn bar_game_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/game-sessions/active", get(handler::active_sessions))
        .route("/game-sessions/past", get(handler::past_sessions))
        .route("/game-sessions/{id}/check-out", put(handler::check_out))
        .route(
            "/game-sessions/{id}",
            put(handler::update_session).delete(handler::delete_session),
        )
        .route("/{id}/check-in", post(handler::check_in))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
