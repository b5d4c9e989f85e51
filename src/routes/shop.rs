//! Storefront display endpoints. Pure reads over the demo data.

use axum::extract::State;
use axum::response::Json;

use crate::catalog::{self, AdminStats, Order, Product};
use crate::state::AppState;

/// `GET /api/product` — the featured product detail.
pub async fn product(State(state): State<AppState>) -> Json<Product> {
    Json((*state.product).clone())
}

/// `GET /api/orders` — the order history list.
pub async fn orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json((*state.orders).clone())
}

/// `GET /api/admin/stats` — support-bot metrics for the admin dashboard.
pub async fn admin_stats() -> Json<AdminStats> {
    Json(catalog::demo_admin_stats())
}
