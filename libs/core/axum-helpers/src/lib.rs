//! # Axum Helpers
//!
//! Shared building blocks for the workspace's HTTP services.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: `AppError` and the `{ ok: false, error, code }` body
//! - **[`envelope`]**: the `{ ok: true, data }` success body
//! - **[`extractors`]**: JSON extractor reporting through `AppError`
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{cors_layer_for_origin, create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, cors_layer_for_origin(&origin)?);
//! create_production_app(router, &server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::ApiResponse;
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::LenientJson;
pub use http::{cors_layer_for_origin, create_cors_layer, security_headers};
pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, shutdown_signal, with_common_layers,
};
