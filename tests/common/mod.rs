//! Shared test doubles for the language-service port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use farmabot::{
    AppState, ChatSession, ChatSessionGateway, DomainError, LanguageService, Persona,
    SessionConfig,
};

pub const SECRET_PERSONA: &str = "Eres FarmaBot. Clave interna: PERSONA-SECRET-7731.";
pub const SECRET_CREDENTIAL: &str = "AIzaSy-test-credential-0000";

/// What the stub answers with.
#[derive(Clone)]
pub enum StubReply {
    Text(String),
    Fail,
    FailToStart,
}

/// Records every session it opens and every message sent through them.
pub struct StubLanguageService {
    reply: StubReply,
    pub sessions: Arc<Mutex<Vec<SessionConfig>>>,
    pub messages: Arc<Mutex<Vec<String>>>,
}

impl StubLanguageService {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            sessions: Arc::new(Mutex::new(Vec::new())),
            messages: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(StubReply::Fail)
    }

    pub fn invocations(&self) -> usize {
        self.sessions.lock().unwrap().len() + self.messages.lock().unwrap().len()
    }

    pub fn last_session(&self) -> SessionConfig {
        self.sessions
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no session was opened")
    }
}

#[async_trait]
impl LanguageService for StubLanguageService {
    async fn start_chat(&self, config: SessionConfig) -> Result<Box<dyn ChatSession>, DomainError> {
        self.sessions.lock().unwrap().push(config);
        if matches!(self.reply, StubReply::FailToStart) {
            return Err(DomainError::transport(format!(
                "connect error with key {SECRET_CREDENTIAL}"
            )));
        }
        Ok(Box::new(StubSession {
            reply: self.reply.clone(),
            messages: self.messages.clone(),
        }))
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

struct StubSession {
    reply: StubReply,
    messages: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatSession for StubSession {
    async fn send_message(&mut self, message: &str) -> Result<String, DomainError> {
        self.messages.lock().unwrap().push(message.to_string());
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            _ => Err(DomainError::upstream(format!(
                "remote rejected request (key={SECRET_CREDENTIAL}, system={SECRET_PERSONA})"
            ))),
        }
    }
}

pub fn secret_persona() -> Persona {
    Persona::new(SECRET_PERSONA).unwrap()
}

pub fn app_state(service: Arc<StubLanguageService>) -> AppState {
    AppState {
        gateway: Arc::new(ChatSessionGateway::new(service)),
        persona: Arc::new(secret_persona()),
    }
}
