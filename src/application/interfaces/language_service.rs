use async_trait::async_trait;

use crate::domain::{CanonicalHistoryEntry, DomainError};

/// Response-length cap applied when nothing else is configured.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Everything a new remote chat session is seeded with.
#[derive(Clone)]
pub struct SessionConfig {
    /// Prior conversation; never starts with a `model` entry.
    pub history: Vec<CanonicalHistoryEntry>,
    /// Upper bound on the size of each reply. Opaque across providers.
    pub max_output_tokens: u32,
    /// System-level instruction honored on every turn of the session.
    pub system_instruction: String,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("history_len", &self.history.len())
            .field("max_output_tokens", &self.max_output_tokens)
            .field("system_instruction_len", &self.system_instruction.len())
            .finish()
    }
}

/// A remote generative-language service that can open chat sessions.
///
/// Implementors hide transport, credentials, and the vendor wire format.
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// Open a fresh session. No session is shared between calls.
    async fn start_chat(&self, config: SessionConfig) -> Result<Box<dyn ChatSession>, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// A stateful conversation with the remote service.
#[async_trait]
pub trait ChatSession: Send {
    /// Submit the newest user turn and wait for the whole reply text.
    async fn send_message(&mut self, message: &str) -> Result<String, DomainError>;
}
