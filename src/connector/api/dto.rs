//! JSON bodies exchanged over the `/chat` HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::domain::WireTurn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<WireTurn>,
}

/// Body of every `/chat` reply, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
