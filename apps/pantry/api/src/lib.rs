//! Pantry Items Service
//!
//! REST API over the items domain. The binary wires configuration, MongoDB
//! and graceful shutdown around [`build_router`]; tests drive the same router
//! over the in-memory store.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::{cors_layer_for_origin, create_router};
use domain_items::ItemRepository;

use config::Config;
use state::AppState;

/// Full service router: `/api` routes, Swagger UI and the common layers.
pub fn build_router<R: ItemRepository + 'static>(state: &AppState<R>) -> std::io::Result<Router> {
    let cors = cors_layer_for_origin(&state.config.cors.allowed_origin)?;
    Ok(create_router::<openapi::ApiDoc>(api::routes(state), cors))
}

/// Convenience constructor used by `main` and the end-to-end tests.
pub fn app<R: ItemRepository + 'static>(config: Config, repository: R) -> std::io::Result<Router> {
    build_router(&AppState::new(config, repository))
}
