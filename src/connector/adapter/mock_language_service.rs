use async_trait::async_trait;

use crate::application::{ChatSession, LanguageService, SessionConfig};
use crate::domain::DomainError;

/// Offline [`LanguageService`] that answers deterministically without any
/// network access. Used with `--mock` and in tests.
pub struct MockLanguageService;

impl MockLanguageService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockLanguageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageService for MockLanguageService {
    async fn start_chat(&self, config: SessionConfig) -> Result<Box<dyn ChatSession>, DomainError> {
        Ok(Box::new(MockChatSession {
            turns: config.history.len(),
        }))
    }

    fn model_name(&self) -> &str {
        "mock-language-service"
    }
}

struct MockChatSession {
    turns: usize,
}

#[async_trait]
impl ChatSession for MockChatSession {
    async fn send_message(&mut self, message: &str) -> Result<String, DomainError> {
        self.turns += 1;

        let mut reply = format!(
            "(modo sin conexión) Recibí tu mensaje #{}: {}",
            (self.turns + 1) / 2,
            message.trim()
        );
        if message.to_lowercase().contains("paracetamol") {
            reply.push_str(
                "\n💊 Paracetamol 500mg: $2.50. [Imagen: https://i.imgur.com/8X7w4sY.jpg]",
            );
        }
        self.turns += 1;

        Ok(reply)
    }
}
