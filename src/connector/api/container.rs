use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::{ChatBackend, ChatSessionGateway, LanguageService, PersonaGateway};
use crate::connector::adapter::{GeminiLanguageService, HttpGatewayClient, MockLanguageService};
use crate::domain::Persona;

use super::server::AppState;

pub struct ContainerConfig {
    /// Answer with the offline mock instead of calling Gemini.
    pub mock: bool,
    /// Replace the built-in persona with the contents of this file.
    pub persona_file: Option<PathBuf>,
    pub max_output_tokens: u32,
    /// Timeout for outbound HTTP calls (Gemini or a remote gateway).
    pub timeout_secs: u64,
}

pub struct Container {
    language_service: Arc<dyn LanguageService>,
    persona: Persona,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let persona = match &config.persona_file {
            Some(path) => {
                debug!("Loading persona from {}", path.display());
                Persona::from_file(path)
                    .with_context(|| format!("failed to load persona from {}", path.display()))?
            }
            None => Persona::default(),
        };

        let language_service: Arc<dyn LanguageService> = if config.mock {
            info!("Using mock language service");
            Arc::new(MockLanguageService::new())
        } else {
            let service = GeminiLanguageService::from_env(Duration::from_secs(config.timeout_secs))?;
            info!("Using Gemini model {}", service.model_name());
            Arc::new(service)
        };

        Ok(Self::with_language_service(language_service, persona, config))
    }

    /// Assemble from an already-built language service.
    pub fn with_language_service(
        language_service: Arc<dyn LanguageService>,
        persona: Persona,
        config: ContainerConfig,
    ) -> Self {
        Self {
            language_service,
            persona,
            config,
        }
    }

    pub fn gateway(&self) -> Arc<ChatSessionGateway> {
        Arc::new(
            ChatSessionGateway::new(self.language_service.clone())
                .with_max_output_tokens(self.config.max_output_tokens),
        )
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            gateway: self.gateway(),
            persona: Arc::new(self.persona.clone()),
        }
    }

    /// Backend for the in-process terminal widget.
    pub fn local_backend(&self) -> Arc<dyn ChatBackend> {
        Arc::new(PersonaGateway::new(self.gateway(), self.persona.clone()))
    }

    /// Backend for a terminal widget talking to a remote `/chat` endpoint.
    /// Needs no language service or credentials.
    pub fn remote_backend(url: impl Into<String>, timeout_secs: u64) -> Arc<dyn ChatBackend> {
        Arc::new(HttpGatewayClient::new(url, Duration::from_secs(timeout_secs)))
    }
}
