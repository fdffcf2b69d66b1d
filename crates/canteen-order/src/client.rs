//! # Order Submission Client
//!
//! Sends a confirmed order to the order-recording endpoint.
//!
//! ## Request / Response
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST {endpoint}                                                        │
//! │  Content-Type: application/json                                         │
//! │  { "cart": [...], "address": {...}, "total": 500 }                      │
//! │        │                                                                │
//! │        ├── 2xx  { "orderId": "ORD123" } ──────────► Ok(OrderId)         │
//! │        │                                                                │
//! │        ├── 2xx  body without orderId ─────────────► InvalidResponse     │
//! │        │                                                                │
//! │        ├── !2xx { "message": "..." } ─────────────► Rejected(message)   │
//! │        │                                                                │
//! │        ├── !2xx empty / non-JSON body ────────────► Rejected(fallback)  │
//! │        │                                                                │
//! │        └── no response ───────────────────────────► Transport(reqwest)  │
//! │                                                                         │
//! │  One attempt per call. Every failure is logged, then returned.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use url::Url;

use canteen_core::{Order, OrderId, GENERIC_FAILURE_MESSAGE};

use crate::config::CheckoutConfig;
use crate::error::{SubmitError, SubmitResult};

// =============================================================================
// Gateway Trait
// =============================================================================

/// Something that can record an order and hand back its id.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits the order once.
    async fn submit(&self, order: &Order) -> SubmitResult<OrderId>;
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitOrderResponse {
    order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The `message` of a failure body, or the generic fallback.
fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

// =============================================================================
// HTTP Client
// =============================================================================

/// reqwest-backed [`OrderGateway`].
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    client: Client,
    endpoint: Url,
}

impl HttpOrderClient {
    /// Creates a client with reqwest defaults.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        HttpOrderClient { client, endpoint }
    }

    /// Creates a client from the checkout configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &CheckoutConfig) -> SubmitResult<Self> {
        let endpoint = config.endpoint_url()?;
        let client = Client::builder()
            .user_agent(config.endpoint.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// The order endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, order: &Order) -> SubmitResult<OrderId> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(order)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body_len = body.len(), "Order endpoint responded");

        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: failure_message(&body),
            });
        }

        let parsed: SubmitOrderResponse = serde_json::from_str(&body)?;
        match parsed.order_id {
            Some(id) if !id.trim().is_empty() => Ok(OrderId::new(id)),
            _ => Err(SubmitError::InvalidResponse(
                "response has no orderId".to_string(),
            )),
        }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderClient {
    #[instrument(skip(self, order), fields(endpoint = %self.endpoint, items = order.cart().len()))]
    async fn submit(&self, order: &Order) -> SubmitResult<OrderId> {
        info!(total = %order.total(), "Submitting order");

        match self.send(order).await {
            Ok(order_id) => {
                info!(%order_id, "Order recorded");
                Ok(order_id)
            }
            Err(err) => {
                error!(error = %err, status = ?err.status(), "Error submitting order");
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pizza_order, spawn_endpoint, unreachable_endpoint};
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;

    async fn record_and_accept(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *captured.lock().unwrap() = Some((headers, body));
        Json(json!({ "orderId": "ORD123" }))
    }

    #[test]
    fn test_failure_message_fallbacks() {
        assert_eq!(failure_message(r#"{"message":"Sheet quota exceeded"}"#), "Sheet quota exceeded");
        assert_eq!(failure_message(""), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message("{}"), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(r#"{"message":""}"#), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message("<html>502</html>"), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_submit_posts_json_and_returns_order_id() {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route("/api/google-sheets", post(record_and_accept))
            .with_state(captured.clone());
        let client = HttpOrderClient::new(spawn_endpoint(router).await);

        let order_id = client.submit(&pizza_order()).await.unwrap();

        assert_eq!(order_id.as_str(), "ORD123");
        let (headers, body) = captured.lock().unwrap().take().unwrap();
        assert_eq!(
            headers.get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            body,
            json!({
                "cart": [{ "id": 1, "name": "Pizza", "price": 250, "quantity": 2 }],
                "address": { "tower": "3", "floor": "5", "appartment": "002" },
                "total": 500
            })
        );
    }

    #[tokio::test]
    async fn test_rejection_carries_endpoint_message() {
        let router = Router::new().route(
            "/api/google-sheets",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Sheet quota exceeded" })),
                )
            }),
        );
        let client = HttpOrderClient::new(spawn_endpoint(router).await);

        let err = client.submit(&pizza_order()).await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Sheet quota exceeded");
    }

    #[tokio::test]
    async fn test_rejection_with_empty_body_uses_fallback() {
        let router = Router::new().route(
            "/api/google-sheets",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = HttpOrderClient::new(spawn_endpoint(router).await);

        let err = client.submit(&pizza_order()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to submit order.");
    }

    #[tokio::test]
    async fn test_rejection_with_plain_text_body_uses_fallback() {
        let router = Router::new().route(
            "/api/google-sheets",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
        );
        let client = HttpOrderClient::new(spawn_endpoint(router).await);

        let err = client.submit(&pizza_order()).await.unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "Failed to submit order.");
    }

    #[tokio::test]
    async fn test_success_without_order_id_is_invalid_response() {
        let router = Router::new().route(
            "/api/google-sheets",
            post(|| async { Json(json!({ "ok": true })) }),
        );
        let client = HttpOrderClient::new(spawn_endpoint(router).await);

        let err = client.submit(&pizza_order()).await.unwrap_err();

        assert!(matches!(err, SubmitError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = HttpOrderClient::new(unreachable_endpoint().await);

        let err = client.submit(&pizza_order()).await.unwrap_err();

        assert!(err.is_transport());
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let mut config = CheckoutConfig::default();
        config.endpoint.url = "mailto:orders@example.com".to_string();

        assert!(matches!(
            HttpOrderClient::from_config(&config),
            Err(SubmitError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let client = HttpOrderClient::from_config(&CheckoutConfig::default()).unwrap();
        assert_eq!(client.endpoint().path(), "/api/google-sheets");
    }
}
