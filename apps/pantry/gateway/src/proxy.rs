//! Pass-through routes for the Items Service
//!
//! Every handler maps its path onto `<base>/items...`, forwards the method and
//! JSON body, and relays status, content type and body unchanged.

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderValue, Method, header},
    response::Response,
    routing::{get, patch},
};
use serde_json::{Value, json};

use crate::error::GatewayError;

type ProxyResult = Result<Response, GatewayError>;

/// Shared HTTP client and upstream base URL
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyState {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request upstream and mirror the answer.
    #[tracing::instrument(skip(self, body), fields(upstream = %self.base_url))]
    async fn forward(&self, method: Method, path: &str, body: Option<Value>) -> ProxyResult {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let upstream = request.send().await?;
        let status = upstream.status();
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        let bytes = upstream.bytes().await?;

        tracing::debug!(%status, "Upstream responded");

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
        Ok(response)
    }
}

/// Client bodies are forwarded as JSON; a missing or unparsable body becomes `{}`.
fn json_or_empty(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| json!({}))
}

fn item_path(id: &str) -> String {
    format!("/items/{}", urlencoding::encode(id))
}

/// Routes mounted under `/api`
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/items/{id}/toggle", patch(toggle_item))
        .route("/health", get(health))
        .with_state(state)
}

async fn list_items(State(proxy): State<ProxyState>) -> ProxyResult {
    proxy.forward(Method::GET, "/items", None).await
}

async fn create_item(State(proxy): State<ProxyState>, body: Bytes) -> ProxyResult {
    proxy
        .forward(Method::POST, "/items", Some(json_or_empty(&body)))
        .await
}

async fn get_item(State(proxy): State<ProxyState>, Path(id): Path<String>) -> ProxyResult {
    proxy.forward(Method::GET, &item_path(&id), None).await
}

async fn update_item(
    State(proxy): State<ProxyState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ProxyResult {
    proxy
        .forward(Method::PUT, &item_path(&id), Some(json_or_empty(&body)))
        .await
}

async fn delete_item(State(proxy): State<ProxyState>, Path(id): Path<String>) -> ProxyResult {
    proxy.forward(Method::DELETE, &item_path(&id), None).await
}

async fn toggle_item(State(proxy): State<ProxyState>, Path(id): Path<String>) -> ProxyResult {
    let path = format!("{}/toggle", item_path(&id));
    proxy.forward(Method::PATCH, &path, None).await
}

/// Mirrors the service's liveness answer; unreachable service → 502
async fn health(State(proxy): State<ProxyState>) -> ProxyResult {
    proxy.forward(Method::GET, "/health", None).await
}
