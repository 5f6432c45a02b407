use crate::domain::services::segment;

use super::Turn;

pub const WELCOME_MESSAGE: &str = "¡Hola! 👋 Soy FarmaBot, tu asistente de confianza en la **Farmacia Bienestar**. ¿En qué te puedo ayudar hoy?";

pub const CONNECTION_ERROR_MESSAGE: &str =
    "⚠️ Lo siento, tuve un problema de conexión. Por favor, intenta de nuevo.";

pub const SUGGESTIONS: [&str; 3] = [
    "¿Qué productos tienen?",
    "¿Cuál es su horario?",
    "Dime sus servicios",
];

pub const DISCLAIMER: &str =
    "⚠️ FarmaBot es una IA experimental. No sustituye el consejo médico profesional.";

/// Something that happened in the chat widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptAction {
    /// The user submitted a message.
    Submit(String),
    /// The gateway answered with raw (unsegmented) text.
    ResponseReceived(String),
    /// The exchange failed; shown to the user as a connection problem.
    ExchangeFailed,
    /// Start over from the welcome message.
    Reset,
}

/// The message and prior history to send for the exchange in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub message: String,
    pub history: Vec<Turn>,
}

/// Conversation held by the widget for one session.
///
/// Values are never mutated: [`Transcript::apply`] returns the next state.
/// At most one exchange is in flight; submissions made while waiting are
/// ignored, as are responses that arrive after a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
    in_flight: bool,
}

impl Transcript {
    /// A fresh transcript holding only the welcome turn.
    pub fn seeded() -> Self {
        Self {
            turns: vec![Turn::model_text(WELCOME_MESSAGE)],
            in_flight: false,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn apply(&self, action: TranscriptAction) -> Transcript {
        match action {
            TranscriptAction::Submit(message) => {
                if self.in_flight || message.trim().is_empty() {
                    return self.clone();
                }
                self.appended(Turn::user(message), true)
            }
            TranscriptAction::ResponseReceived(raw) => {
                if !self.in_flight {
                    return self.clone();
                }
                self.appended(Turn::model(segment(&raw)), false)
            }
            TranscriptAction::ExchangeFailed => {
                if !self.in_flight {
                    return self.clone();
                }
                self.appended(Turn::model_text(CONNECTION_ERROR_MESSAGE), false)
            }
            TranscriptAction::Reset => Self::seeded(),
        }
    }

    /// The request for the exchange in flight: the newest user message and
    /// every turn before it.
    pub fn pending_request(&self) -> Option<PendingRequest> {
        if !self.in_flight {
            return None;
        }
        let (last, history) = self.turns.split_last()?;
        Some(PendingRequest {
            message: last.flatten(),
            history: history.to_vec(),
        })
    }

    fn appended(&self, turn: Turn, in_flight: bool) -> Transcript {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend_from_slice(&self.turns);
        turns.push(turn);
        Transcript { turns, in_flight }
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, Segment};

    #[test]
    fn test_seeded_has_welcome_only() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].role(), Role::Model);
        assert!(!transcript.is_in_flight());
        assert!(transcript.pending_request().is_none());
    }

    #[test]
    fn test_submit_marks_in_flight_and_exposes_prior_history() {
        let transcript = Transcript::seeded().apply(TranscriptAction::Submit("Hola".into()));

        assert!(transcript.is_in_flight());
        let pending = transcript.pending_request().unwrap();
        assert_eq!(pending.message, "Hola");
        assert_eq!(pending.history, vec![Turn::model_text(WELCOME_MESSAGE)]);
    }

    #[test]
    fn test_apply_leaves_previous_value_untouched() {
        let before = Transcript::seeded();
        let after = before.apply(TranscriptAction::Submit("Hola".into()));
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let transcript = Transcript::seeded().apply(TranscriptAction::Submit("   ".into()));
        assert_eq!(transcript, Transcript::seeded());
    }

    #[test]
    fn test_submit_while_in_flight_is_ignored() {
        let first = Transcript::seeded().apply(TranscriptAction::Submit("uno".into()));
        let second = first.apply(TranscriptAction::Submit("dos".into()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_response_is_segmented() {
        let transcript = Transcript::seeded()
            .apply(TranscriptAction::Submit("foto".into()))
            .apply(TranscriptAction::ResponseReceived(
                "Mira: [Imagen: https://x/y.jpg]".into(),
            ));

        assert!(!transcript.is_in_flight());
        let last = transcript.last().unwrap();
        assert_eq!(last.role(), Role::Model);
        assert_eq!(
            last.content(),
            &[Segment::text("Mira: "), Segment::media("https://x/y.jpg")]
        );
    }

    #[test]
    fn test_failure_appends_connection_message() {
        let transcript = Transcript::seeded()
            .apply(TranscriptAction::Submit("hola".into()))
            .apply(TranscriptAction::ExchangeFailed);

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last(), Some(&Turn::model_text(CONNECTION_ERROR_MESSAGE)));
        assert!(!transcript.is_in_flight());
    }

    #[test]
    fn test_late_response_after_reset_is_discarded() {
        let transcript = Transcript::seeded()
            .apply(TranscriptAction::Submit("hola".into()))
            .apply(TranscriptAction::Reset)
            .apply(TranscriptAction::ResponseReceived("tarde".into()));

        assert_eq!(transcript, Transcript::seeded());
    }
}
