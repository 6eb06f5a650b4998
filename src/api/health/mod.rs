//! Health API

use axum::{Json, Router, routing::get};
use chrono::Utc;
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    message: &'static str,
    timestamp: String,
}

async fn health() -> Json<AppResponse<Health>> {
    ok(Health {
        message: "Barcade management API is running",
        timestamp: Utc::now().to_rfc3339(),
    })
}
