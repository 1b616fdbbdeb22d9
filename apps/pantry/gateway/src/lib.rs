//! Pantry HTTP Gateway
//!
//! Stateless reverse proxy in front of the Items Service. It keeps the
//! service's `{ ok, data, error }` bodies and status codes intact and answers
//! 502 `{ ok: false, error: "proxy error" }` when the service cannot be
//! reached.

pub mod config;
pub mod error;
pub mod proxy;

use axum::Router;
use axum_helpers::with_common_layers;

pub use error::GatewayError;
pub use proxy::ProxyState;

/// Gateway router: proxy routes under `/api` plus the shared layers.
pub fn build_router(state: ProxyState) -> Router {
    let router = Router::new().nest("/api", proxy::router(state));
    with_common_layers(router, None)
}
