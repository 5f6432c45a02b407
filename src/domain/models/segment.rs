use serde::{Deserialize, Serialize};

/// Token that stands in for a media segment when a turn is flattened to text.
///
/// Deliberately different from the `[Imagen: <url>]` marker so a flattened
/// turn is never re-parsed as carrying a URL.
pub const MEDIA_PLACEHOLDER: &str = "[Imagen]";

/// A renderable fragment of a turn: prose or a media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Text { value: String },
    Media { url: String },
}

impl Segment {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn media(url: impl Into<String>) -> Self {
        Self::Media { url: url.into() }
    }

    /// Text this segment contributes to a flattened turn.
    pub fn flattened(&self) -> &str {
        match self {
            Self::Text { value } => value,
            Self::Media { .. } => MEDIA_PLACEHOLDER,
        }
    }
}
