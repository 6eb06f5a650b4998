//! Router assembly and HTTP middleware stack

use axum::{Json, Router};
use http::HeaderValue;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;
use crate::utils::AppResponse;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::cafe_items::router())
        .merge(api::bar_games::router())
        .merge(api::customers::router())
        .merge(api::memberships::router())
        .merge(api::orders::router())
        .fallback(not_found)
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    let request_id_header = http::HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(TraceLayer::new_for_http())
        // Request id generation and propagation
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, XRequestId))
        .with_state(state)
}

async fn not_found() -> (http::StatusCode, Json<AppResponse<()>>) {
    (
        http::StatusCode::NOT_FOUND,
        Json(AppResponse::error("Route not found")),
    )
}
