//! JSON body extractors that report failures in the shared error envelope.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// Parse a request body into `T`.
///
/// An empty body is read as `{}` so that handlers see missing fields rather
/// than a syntax error. Failures split into two kinds:
/// - malformed JSON → [`AppError::InvalidJson`]
/// - well-formed JSON with a bad value (e.g. an unknown enum member) →
///   [`AppError::Validation`] carrying the deserializer's message
pub fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|e| {
        let message = strip_location(&e.to_string());
        match e.classify() {
            Category::Data => AppError::Validation(message),
            _ => AppError::InvalidJson(message),
        }
    })
}

/// serde_json appends " at line N column M"; clients only need the reason.
fn strip_location(message: &str) -> String {
    match message.rsplit_once(" at line ") {
        Some((reason, _)) => reason.to_string(),
        None => message.to_string(),
    }
}

/// JSON extractor without a `Content-Type` check.
///
/// Parses with [`parse_json_body`] and leaves validation to the caller, so
/// domain code can normalize input before checking it.
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_json_body(&bytes).map(LenientJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Colour {
        Red,
    }

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: Option<String>,
        colour: Option<Colour>,
    }

    #[test]
    fn test_empty_body_reads_as_empty_object() {
        let payload: Payload = parse_json_body(b"").unwrap();
        assert!(payload.name.is_none());
        assert!(payload.colour.is_none());
    }

    #[test]
    fn test_syntax_error_is_invalid_json() {
        let err = parse_json_body::<Payload>(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::InvalidJson(_)));
    }

    #[test]
    fn test_bad_value_is_validation_error_without_location() {
        let err = parse_json_body::<Payload>(br#"{"colour":"blue"}"#).unwrap_err();
        match err {
            AppError::Validation(message) => {
                assert!(message.contains("blue"));
                assert!(!message.contains("at line"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
