use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

/// Gateway failures
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The Items Service could not be reached or its response could not be read
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Upstream(cause) => {
                tracing::error!(
                    error = %cause,
                    url = cause.url().map(|u| u.as_str()),
                    "Upstream request failed"
                );
                AppError::BadGateway(ErrorCode::UpstreamUnreachable.default_message().to_string())
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
