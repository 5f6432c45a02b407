use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::application::ChatBackend;
use crate::connector::api::dto::{ChatRequest, ChatResponse};
use crate::domain::{GatewayError, Turn};

/// [`ChatBackend`] that talks to a running `farmabot serve` over HTTP.
///
/// Connection failures and unreadable replies become
/// [`GatewayError::Transport`]; a `400` keeps the server's validation message;
/// any other error status becomes [`GatewayError::Upstream`].
pub struct HttpGatewayClient {
    client: reqwest::Client,
    url: String,
}

impl HttpGatewayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }

    /// Use a preconfigured HTTP client (proxy, TLS, timeout settings).
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpGatewayClient {
    async fn send(&self, message: &str, history: &[Turn]) -> Result<String, GatewayError> {
        let request = ChatRequest {
            message: message.to_string(),
            history: history.iter().map(Turn::to_wire).collect(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("HttpGatewayClient: request to {} failed: {e}", self.url);
                GatewayError::Transport
            })?;

        let status = response.status();
        let body: ChatResponse = response.json().await.map_err(|e| {
            warn!("HttpGatewayClient: unreadable {status} reply: {e}");
            GatewayError::Transport
        })?;

        if status.is_success() {
            debug!("HttpGatewayClient: {} chars received", body.response.len());
            Ok(body.response)
        } else if status == StatusCode::BAD_REQUEST {
            Err(GatewayError::validation(body.response))
        } else {
            warn!("HttpGatewayClient: gateway returned {status}: {}", body.response);
            Err(GatewayError::Upstream)
        }
    }
}
