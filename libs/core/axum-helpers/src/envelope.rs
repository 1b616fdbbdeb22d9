//! Success envelope shared by every JSON endpoint: `{ "ok": true, "data": ... }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// `{ ok, data?, error? }` wrapper.
///
/// Servers build it with [`ApiResponse::ok`]; clients deserialize it and
/// inspect `ok` before trusting `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Pair the envelope with a status code, e.g. `201 Created`.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Self) {
        (status, self)
    }
}

impl ApiResponse<()> {
    /// Bare acknowledgement: `{ "ok": true }`.
    pub fn ack() -> Self {
        Self {
            ok: true,
            data: None,
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_serializes_to_ok_only() {
        let json = serde_json::to_value(ApiResponse::ack()).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true }));
    }

    #[test]
    fn test_ok_wraps_data() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "data": [1, 2] }));
    }

    #[test]
    fn test_failure_envelope_deserializes() {
        let parsed: ApiResponse<Vec<u8>> =
            serde_json::from_str(r#"{"ok":false,"error":"not found","code":"NOT_FOUND"}"#)
                .unwrap();
        assert!(!parsed.ok);
        assert_eq!(parsed.error.as_deref(), Some("not found"));
        assert!(parsed.data.is_none());
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> ApiResponse<T> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_deserializes_payload_without_default() {
        let parsed: ApiResponse<Named> = parse(r#"{"ok":true,"data":{"name":"milk"}}"#);
        assert_eq!(parsed.data.map(|n| n.name).as_deref(), Some("milk"));

        let missing: ApiResponse<Named> = parse(r#"{"ok":false,"error":"boom"}"#);
        assert!(missing.data.is_none());
    }
}
