use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::application::{ChatBackend, LanguageService, SessionConfig, DEFAULT_MAX_OUTPUT_TOKENS};
use crate::domain::{
    normalize, DomainError, GatewayError, Persona, Turn, EMPTY_MESSAGE_MESSAGE,
};

/// Runs one request/response exchange against the remote language service.
///
/// Every call opens a fresh session seeded with the whole normalized history,
/// so the gateway keeps no state between calls. Remote failures are logged
/// in full and surfaced only as [`GatewayError::Upstream`]; nothing is retried.
pub struct ChatSessionGateway {
    language_service: Arc<dyn LanguageService>,
    max_output_tokens: u32,
}

impl ChatSessionGateway {
    pub fn new(language_service: Arc<dyn LanguageService>) -> Self {
        Self {
            language_service,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens.max(1);
        self
    }

    /// Exchange `user_message` for the model's raw reply text.
    pub async fn exchange(
        &self,
        user_message: &str,
        raw_history: &[Turn],
        persona: &Persona,
    ) -> Result<String, GatewayError> {
        if user_message.trim().is_empty() {
            debug!("Rejecting empty chat message");
            return Err(GatewayError::validation(EMPTY_MESSAGE_MESSAGE));
        }

        let history = normalize(raw_history);
        info!(
            "Starting chat exchange (model={}, history={} of {} turns)",
            self.language_service.model_name(),
            history.len(),
            raw_history.len(),
        );

        let start_time = Instant::now();
        let config = SessionConfig {
            history,
            max_output_tokens: self.max_output_tokens,
            system_instruction: persona.as_str().to_string(),
        };

        match self.run_session(config, user_message).await {
            Ok(reply) => {
                info!(
                    "Chat exchange completed in {:?} ({} chars)",
                    start_time.elapsed(),
                    reply.len()
                );
                Ok(reply)
            }
            Err(e) => {
                error!("Chat exchange failed after {:?}: {}", start_time.elapsed(), e);
                Err(GatewayError::Upstream)
            }
        }
    }

    async fn run_session(&self, config: SessionConfig, message: &str) -> Result<String, DomainError> {
        let mut session = self.language_service.start_chat(config).await?;
        session.send_message(message).await
    }
}

/// Binds a gateway to one persona so it can answer the widget directly.
pub struct PersonaGateway {
    gateway: Arc<ChatSessionGateway>,
    persona: Persona,
}

impl PersonaGateway {
    pub fn new(gateway: Arc<ChatSessionGateway>, persona: Persona) -> Self {
        Self { gateway, persona }
    }
}

#[async_trait]
impl ChatBackend for PersonaGateway {
    async fn send(&self, message: &str, history: &[Turn]) -> Result<String, GatewayError> {
        self.gateway.exchange(message, history, &self.persona).await
    }
}
