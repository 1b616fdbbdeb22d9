//! Application state management.
//!
//! This module defines the shared application state passed to the routers.
//! The state contains:
//! - Configuration
//! - The item service (and through it the store)

use domain_items::{ItemRepository, ItemService};

use crate::config::Config;

/// Shared application state.
///
/// Cloning is inexpensive: the service shares its repository through an `Arc`.
pub struct AppState<R: ItemRepository> {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub items: ItemService<R>,
}

impl<R: ItemRepository> AppState<R> {
    pub fn new(config: Config, repository: R) -> Self {
        Self {
            config,
            items: ItemService::new(repository),
        }
    }
}

impl<R: ItemRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            items: self.items.clone(),
        }
    }
}
