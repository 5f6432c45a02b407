use std::path::Path;

use crate::domain::DomainError;

const DEFAULT_PERSONA: &str = include_str!("../../../assets/persona.md");

/// System-level instruction the remote session must honor on every turn.
///
/// `Debug` reports only the length so the text never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Persona(String);

impl Persona {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::config("persona text is empty"));
        }
        Ok(Self(text))
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let text = std::fs::read_to_string(path)?;
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self(DEFAULT_PERSONA.to_string())
    }
}

impl std::fmt::Debug for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Persona({} bytes)", self.0.len())
    }
}
