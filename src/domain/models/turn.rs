use serde::{Deserialize, Serialize};

use super::{Role, Segment};

/// One role-tagged contribution to a transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: Vec<Segment>,
}

impl Turn {
    pub fn new(role: Role, content: Vec<Segment>) -> Self {
        Self { role, content }
    }

    /// A user turn always holds its input as a single text segment.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Segment::text(text)])
    }

    pub fn model(content: Vec<Segment>) -> Self {
        Self::new(Role::Model, content)
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self::model(vec![Segment::text(text)])
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &[Segment] {
        &self.content
    }

    /// Concatenate all segments, replacing media with the placeholder token.
    pub fn flatten(&self) -> String {
        self.content.iter().map(Segment::flattened).collect()
    }

    /// The HTTP boundary shape of this turn.
    pub fn to_wire(&self) -> WireTurn {
        WireTurn {
            role: self.role,
            parts: self.flatten(),
        }
    }
}

impl From<WireTurn> for Turn {
    fn from(wire: WireTurn) -> Self {
        Self::new(wire.role, vec![Segment::text(wire.parts)])
    }
}

/// A turn as it travels in a `/chat` request: `parts` is one flat string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTurn {
    pub role: Role,
    pub parts: String,
}

impl WireTurn {
    pub fn new(role: Role, parts: impl Into<String>) -> Self {
        Self {
            role,
            parts: parts.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wire_flattens_media() {
        let turn = Turn::model(vec![
            Segment::text("Paracetamol $2.50 "),
            Segment::media("https://i.imgur.com/8X7w4sY.jpg"),
            Segment::text(" ¿algo más?"),
        ]);

        let wire = turn.to_wire();
        assert_eq!(wire.role, Role::Model);
        assert_eq!(wire.parts, "Paracetamol $2.50 [Imagen] ¿algo más?");
    }

    #[test]
    fn test_from_wire_keeps_text_verbatim() {
        let turn = Turn::from(WireTurn::new(Role::User, "[Imagen: https://a/b.png]"));
        assert_eq!(turn.role(), Role::User);
        assert_eq!(
            turn.content(),
            &[Segment::text("[Imagen: https://a/b.png]")]
        );
    }

    #[test]
    fn test_wire_turn_json_shape() {
        let wire: WireTurn =
            serde_json::from_str(r#"{"role":"user","parts":"Hola"}"#).unwrap();
        assert_eq!(wire, WireTurn::new(Role::User, "Hola"));
    }
}
