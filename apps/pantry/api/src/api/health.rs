//! Readiness endpoint

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{AppError, errors::responses::ServiceUnavailableResponse};
use domain_items::{ItemRepository, ItemService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    #[schema(example = true)]
    pub ok: bool,
    #[schema(example = "ready")]
    pub status: String,
}

/// Create the readiness router
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    Router::new()
        .route("/ready", get(readiness_check::<R>))
        .with_state(service)
}

/// Readiness check - verifies the item store answers
#[utoipa::path(
    get,
    path = "/api/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = ReadinessResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn readiness_check<R: ItemRepository>(
    State(service): State<ItemService<R>>,
) -> Result<Json<ReadinessResponse>, AppError> {
    service.check_store().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed");
        AppError::ServiceUnavailable("item store unavailable".to_string())
    })?;

    Ok(Json(ReadinessResponse {
        ok: true,
        status: "ready".to_string(),
    }))
}
