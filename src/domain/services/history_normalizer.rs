use crate::domain::{CanonicalHistoryEntry, Turn};

/// Convert a client transcript into the history a remote chat session accepts.
///
/// Leading `model` turns (such as the seeded welcome message) are dropped
/// because a remote conversation must open with user input. Each surviving
/// turn is flattened to one text part, with media replaced by the
/// placeholder token. Relative order is preserved.
pub fn normalize(turns: &[Turn]) -> Vec<CanonicalHistoryEntry> {
    turns
        .iter()
        .skip_while(|turn| turn.role().is_model())
        .map(|turn| CanonicalHistoryEntry::new(turn.role(), turn.flatten()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, Segment};

    #[test]
    fn test_welcome_is_dropped() {
        let history = vec![Turn::model_text("Welcome"), Turn::user("Hi")];
        assert_eq!(
            normalize(&history),
            vec![CanonicalHistoryEntry::new(Role::User, "Hi")]
        );
    }

    #[test]
    fn test_all_model_turns_yield_empty() {
        let history = vec![Turn::model_text("uno"), Turn::model_text("dos")];
        assert!(normalize(&history).is_empty());
    }

    #[test]
    fn test_empty_history() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_only_leading_model_turns_are_dropped() {
        let history = vec![
            Turn::model_text("w1"),
            Turn::model_text("w2"),
            Turn::user("q1"),
            Turn::model_text("a1"),
            Turn::user("q2"),
        ];

        let roles_and_text: Vec<(Role, String)> = normalize(&history)
            .iter()
            .map(|e| (e.role, e.text()))
            .collect();

        assert_eq!(
            roles_and_text,
            vec![
                (Role::User, "q1".to_string()),
                (Role::Model, "a1".to_string()),
                (Role::User, "q2".to_string()),
            ]
        );
    }

    #[test]
    fn test_media_becomes_placeholder() {
        let history = vec![
            Turn::user("dime del paracetamol"),
            Turn::model(vec![
                Segment::text("Aquí está: "),
                Segment::media("https://i.imgur.com/8X7w4sY.jpg"),
            ]),
        ];

        let normalized = normalize(&history);
        assert_eq!(normalized[1].parts.len(), 1);
        assert_eq!(normalized[1].parts[0].text, "Aquí está: [Imagen]");
    }

    #[test]
    fn test_wire_history_normalizes_like_turns() {
        let turns = vec![
            Turn::model_text("Welcome"),
            Turn::user("Hi"),
            Turn::model(vec![Segment::text("Foto "), Segment::media("https://x/y.jpg")]),
        ];
        let lifted: Vec<Turn> = turns
            .iter()
            .map(Turn::to_wire)
            .map(Turn::from)
            .collect();
        assert_eq!(normalize(&lifted), normalize(&turns));
    }

    #[test]
    fn test_first_entry_is_never_model() {
        let history = vec![Turn::model_text("a"), Turn::user(""), Turn::model_text("b")];
        let normalized = normalize(&history);
        assert_eq!(normalized.first().map(|e| e.role), Some(Role::User));
    }
}
