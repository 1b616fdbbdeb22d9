//! HTTP client for the items API

use async_trait::async_trait;
use axum_helpers::{ApiResponse, HealthResponse};
use domain_items::{Item, ItemCategory, ItemUnit};
use reqwest::{Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered but reported a failure
    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Fields the client sends on create and edit; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ItemCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<ItemUnit>,
}

/// Operations the terminal UI needs from the service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsApi: Send + Sync {
    async fn list_items(&self) -> ClientResult<Vec<Item>>;

    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<Item>;

    async fn update_item(&self, id: &str, draft: &ItemDraft) -> ClientResult<Item>;

    async fn toggle_item(&self, id: &str) -> ClientResult<Item>;

    async fn delete_item(&self, id: &str) -> ClientResult<()>;

    async fn health(&self) -> ClientResult<HealthResponse>;
}

/// [`ItemsApi`] over HTTP, against the service or the gateway
pub struct HttpItemsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpItemsClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, urlencoding::encode(id))
    }
}

/// Unwrap `{ ok, data, error }`, falling back to `fallback` when the service
/// gives no usable message.
async fn envelope_data<T: DeserializeOwned>(response: Response, fallback: &str) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)
        .map_err(|_| ClientError::Api(fallback.to_string()))?;

    if !envelope.ok {
        return Err(ClientError::Api(
            envelope.error.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::Api(fallback.to_string()))
}

/// Succeed on any 2xx; otherwise report the JSON `error`, the raw text body,
/// or `fallback`.
async fn expect_success(response: Response, fallback: &str) -> ClientResult<()> {
    if response.status().is_success() {
        return Ok(());
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let text = response.text().await?;

    let message = if is_json {
        serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
            .ok()
            .and_then(|envelope| envelope.error)
    } else {
        Some(text).filter(|t| !t.trim().is_empty())
    };

    Err(ClientError::Api(
        message.unwrap_or_else(|| fallback.to_string()),
    ))
}

#[async_trait]
impl ItemsApi for HttpItemsClient {
    async fn list_items(&self) -> ClientResult<Vec<Item>> {
        let response = self.client.get(self.items_url()).send().await?;
        envelope_data(response, "Failed to list items").await
    }

    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<Item> {
        let response = self
            .client
            .post(self.items_url())
            .json(draft)
            .send()
            .await?;
        envelope_data(response, "Failed to create item").await
    }

    async fn update_item(&self, id: &str, draft: &ItemDraft) -> ClientResult<Item> {
        let response = self.client.put(self.item_url(id)).json(draft).send().await?;
        envelope_data(response, "Failed to update item").await
    }

    async fn toggle_item(&self, id: &str) -> ClientResult<Item> {
        let url = format!("{}/toggle", self.item_url(id));
        let response = self.client.patch(url).send().await?;
        envelope_data(response, "Failed to toggle item").await
    }

    async fn delete_item(&self, id: &str) -> ClientResult<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        expect_success(response, "Failed to delete item").await
    }

    async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<HealthResponse>(&bytes) {
            Ok(health) if status.is_success() => Ok(health),
            _ => {
                let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&bytes)
                    .ok()
                    .and_then(|envelope| envelope.error)
                    .unwrap_or_else(|| format!("Health check failed ({})", status));
                Err(ClientError::Api(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_omits_unset_fields() {
        let draft = ItemDraft {
            name: Some("Milk".to_string()),
            unit: Some(ItemUnit::Liter),
            ..Default::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Milk", "unit": "liter" }));
    }

    #[test]
    fn test_urls() {
        let client = HttpItemsClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.items_url(), "http://localhost:3000/api/items");
        assert_eq!(client.item_url("a/b"), "http://localhost:3000/api/items/a%2Fb");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpItemsClient::new(format!("http://{}/api", addr)).unwrap();
        let result = client.list_items().await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
