//! API routes module
//!
//! This module defines all HTTP API routes of the Items Service.

pub mod health;
pub mod items;

use axum::Router;
use axum_helpers::health_router;
use domain_items::ItemRepository;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes<R: ItemRepository + 'static>(state: &AppState<R>) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .merge(health::router(state.items.clone()))
        .merge(health_router(state.config.app.clone()))
}
