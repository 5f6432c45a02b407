use async_trait::async_trait;

use crate::domain::{GatewayError, Turn};

/// Whatever answers the chat widget: the in-process gateway or a remote
/// `/chat` endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `message` with the transcript that preceded it and return the raw
    /// reply text, unsegmented.
    async fn send(&self, message: &str, history: &[Turn]) -> Result<String, GatewayError>;
}
