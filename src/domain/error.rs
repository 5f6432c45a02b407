use thiserror::Error;

/// User-safe message returned for every upstream or transport failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error: No pude procesar tu solicitud.";

/// Message returned when the submitted user message is empty.
pub const EMPTY_MESSAGE_MESSAGE: &str = "El mensaje no puede estar vacío.";

/// Detailed internal error. Never shown to chat clients; logged instead.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Client-visible outcome of a failed exchange.
///
/// Only [`GatewayError::Validation`] carries a specific message. Upstream and
/// transport failures display the same fixed text so provider internals,
/// credentials, and the persona never reach the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Upstream,

    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Transport,
}

impl GatewayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The text placed in the `{ "response": ... }` body.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
