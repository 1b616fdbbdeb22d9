//! Items API routes
//!
//! This module wires up the items domain to HTTP routes.

use axum::Router;
use domain_items::{ItemRepository, handlers};

use crate::state::AppState;

/// Create items router
pub fn router<R: ItemRepository + 'static>(state: &AppState<R>) -> Router {
    handlers::router(state.items.clone())
}
