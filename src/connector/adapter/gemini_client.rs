use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ChatSession, LanguageService, SessionConfig};
use crate::domain::{CanonicalHistoryEntry, DomainError, Part, Role};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION_PATH: &str = "/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<&'a CanonicalHistoryEntry>,
    system_instruction: SystemInstruction<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

/// Subset of the `generateContent` response we read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// [`LanguageService`] backed by the Gemini `generateContent` REST API.
///
/// Configuration comes from the environment:
///
/// | Variable          | Default                                     |
/// |-------------------|---------------------------------------------|
/// | `GEMINI_API_KEY`  | falls back to `API_KEY`; required           |
/// | `GEMINI_MODEL`    | `gemini-1.5-flash`                          |
/// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
///
/// The key travels in the `x-goog-api-key` header, never in the URL, so
/// transport errors (which print the URL) cannot leak it.
pub struct GeminiLanguageService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL for `generateContent` on the configured model.
    url: String,
}

impl GeminiLanguageService {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_timeout(api_key, model, base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let model: String = model.into();
        let url = format!(
            "{}{API_VERSION_PATH}/{model}:generateContent",
            base.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model,
            url,
        }
    }

    pub fn from_env(timeout: Duration) -> Result<Self, DomainError> {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| DomainError::config("GEMINI_API_KEY (or API_KEY) is not set"))?;
        let base = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::with_timeout(key, model, base, timeout))
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LanguageService for GeminiLanguageService {
    async fn start_chat(&self, config: SessionConfig) -> Result<Box<dyn ChatSession>, DomainError> {
        Ok(Box::new(GeminiChatSession {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            url: self.url.clone(),
            config,
        }))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// One conversation; replays its accumulated history on every request.
pub struct GeminiChatSession {
    client: reqwest::Client,
    api_key: String,
    url: String,
    config: SessionConfig,
}

impl GeminiChatSession {
    fn build_request<'a>(&'a self, user_entry: &'a CanonicalHistoryEntry) -> GenerateContentRequest<'a> {
        let mut contents: Vec<&CanonicalHistoryEntry> = self.config.history.iter().collect();
        contents.push(user_entry);

        GenerateContentRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: [TextPart {
                    text: &self.config.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    async fn generate(&self, user_entry: &CanonicalHistoryEntry) -> Result<String, DomainError> {
        let request = self.build_request(user_entry);

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("GeminiChatSession: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiChatSession: API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "GeminiChatSession: API returned {status}"
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("GeminiChatSession: failed to parse response: {e}"))
        })?;

        extract_reply(api_response)
    }
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send_message(&mut self, message: &str) -> Result<String, DomainError> {
        let user_entry = CanonicalHistoryEntry::new(Role::User, message);
        let reply = self.generate(&user_entry).await?;
        debug!("GeminiChatSession reply: {} chars", reply.len());

        self.config.history.push(user_entry);
        self.config.history.push(CanonicalHistoryEntry {
            role: Role::Model,
            parts: vec![Part {
                text: reply.clone(),
            }],
        });

        Ok(reply)
    }
}

/// Text of the first candidate, or an error when the prompt was blocked or
/// the candidate carries no text.
fn extract_reply(response: GenerateContentResponse) -> Result<String, DomainError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(DomainError::upstream(format!(
            "GeminiChatSession: empty response ({reason})"
        )));
    };

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(DomainError::upstream(format!(
            "GeminiChatSession: candidate has no text (finish reason: {reason})"
        )));
    }

    Ok(texts.concat())
}
