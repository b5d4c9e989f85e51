//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two surfaces under one Axum router: display-only storefront endpoints
//! (product, orders, admin dashboard) and the support-chat API that drives
//! the conversation state machine.

pub mod chat;
pub mod shop;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/product", get(shop::product))
        .route("/api/orders", get(shop::orders))
        .route("/api/admin/stats", get(shop::admin_stats))
        .route("/api/chat", get(chat::snapshot))
        .route("/api/chat/open", post(chat::open))
        .route("/api/chat/close", post(chat::close))
        .route("/api/chat/send", post(chat::send))
        .route("/api/chat/attach", post(chat::attach))
        .route("/api/chat/handoff", post(chat::handoff))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
