use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Creates a CORS layer for a single browser origin.
///
/// Allows the verbs used by the REST API (GET, POST, PUT, PATCH, DELETE)
/// and the `Content-Type` request header. Preflight results are cached for
/// one hour.
pub fn create_cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Parses `origin` and builds the layer, failing on values that are not
/// valid header text.
pub fn cors_layer_for_origin(origin: &str) -> std::io::Result<CorsLayer> {
    let value = HeaderValue::from_str(origin).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid CORS origin '{}': {}", origin, e),
        )
    })?;
    Ok(create_cors_layer(value))
}
