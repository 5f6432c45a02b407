use std::sync::Arc;

use tracing::warn;

use crate::application::ChatBackend;
use crate::domain::{Transcript, TranscriptAction};

/// Drives the widget's transcript through one submit/answer cycle.
pub struct ConverseUseCase {
    backend: Arc<dyn ChatBackend>,
}

impl ConverseUseCase {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Submit `message` and return the transcript after the reply (or the
    /// connection-problem turn) has been appended.
    ///
    /// Blank messages and submissions while another exchange is in flight
    /// leave the transcript unchanged and never reach the backend.
    pub async fn submit(&self, transcript: &Transcript, message: &str) -> Transcript {
        if transcript.is_in_flight() {
            return transcript.clone();
        }

        let submitted = transcript.apply(TranscriptAction::Submit(message.to_string()));
        let Some(pending) = submitted.pending_request() else {
            return submitted;
        };

        match self.backend.send(&pending.message, &pending.history).await {
            Ok(reply) => submitted.apply(TranscriptAction::ResponseReceived(reply)),
            Err(e) => {
                warn!("Chat backend failed: {}", e);
                submitted.apply(TranscriptAction::ExchangeFailed)
            }
        }
    }

    pub fn reset(&self, transcript: &Transcript) -> Transcript {
        transcript.apply(TranscriptAction::Reset)
    }
}
