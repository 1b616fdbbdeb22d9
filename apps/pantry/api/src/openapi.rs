//! OpenAPI documentation configuration

use axum_helpers::{HealthResponse, errors::responses::ServiceUnavailableResponse};
use utoipa::OpenApi;

use crate::api::health::ReadinessResponse;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry Items API",
        version = "0.1.0",
        description = "REST API for pantry and shopping list items backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5001", description = "Local development server")
    ),
    paths(crate::api::health::readiness_check),
    components(
        schemas(HealthResponse, ReadinessResponse),
        responses(ServiceUnavailableResponse)
    ),
    nest(
        (path = "/api/items", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Pantry and shopping list items (MongoDB)"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
