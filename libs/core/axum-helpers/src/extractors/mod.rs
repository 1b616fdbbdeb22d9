//! Custom extractors for Axum handlers.

pub mod validated_json;

pub use validated_json::{LenientJson, parse_json_body};
