use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Segment;

/// Media reference embedded in model output: `[Imagen: <url>]`, where the URL
/// is a run of non-whitespace characters.
const MEDIA_MARKER_PATTERN: &str = r"\[Imagen: (\S+)\]";

fn media_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(MEDIA_MARKER_PATTERN).expect("media marker pattern is valid"))
}

/// Split a raw model response into text and media segments, in order.
///
/// Empty text between or around markers is omitted. A response without any
/// marker (including the empty string) yields exactly one text segment.
///
/// Call this once on the raw response: flattened turns use a placeholder that
/// no longer matches the marker, so segmentation is not idempotent.
pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for captures in media_marker().captures_iter(text) {
        let (Some(whole), Some(url)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if whole.start() > last_end {
            segments.push(Segment::text(&text[last_end..whole.start()]));
        }
        segments.push(Segment::media(url.as_str()));
        last_end = whole.end();
    }

    if segments.is_empty() {
        return vec![Segment::text(text)];
    }

    if last_end < text.len() {
        segments.push(Segment::text(&text[last_end..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_single_segment() {
        let text = "Nuestro horario es de 8:00 AM a 9:00 PM.";
        assert_eq!(segment(text), vec![Segment::text(text)]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_text() {
        assert_eq!(segment(""), vec![Segment::text("")]);
    }

    #[test]
    fn test_marker_between_prose() {
        let segments = segment("Price is $5. [Imagen: https://x/y.jpg] Enjoy!");
        assert_eq!(
            segments,
            vec![
                Segment::text("Price is $5. "),
                Segment::media("https://x/y.jpg"),
                Segment::text(" Enjoy!"),
            ]
        );
    }

    #[test]
    fn test_lone_marker_has_no_empty_text() {
        assert_eq!(
            segment("[Imagen: https://i.imgur.com/8X7w4sY.jpg]"),
            vec![Segment::media("https://i.imgur.com/8X7w4sY.jpg")]
        );
    }

    #[test]
    fn test_adjacent_markers() {
        let segments = segment("[Imagen: a.jpg][Imagen: b.jpg]\n");
        assert_eq!(
            segments,
            vec![
                Segment::media("a.jpg"),
                Segment::media("b.jpg"),
                Segment::text("\n"),
            ]
        );
    }

    #[test]
    fn test_marker_with_whitespace_in_url_is_text() {
        let text = "[Imagen: not a url]";
        assert_eq!(segment(text), vec![Segment::text(text)]);
    }

    #[test]
    fn test_placeholder_is_not_reparsed() {
        let text = "Foto: [Imagen]";
        assert_eq!(segment(text), vec![Segment::text(text)]);
    }

    #[test]
    fn test_multibyte_text_boundaries() {
        let segments = segment("💊 Paracetamol [Imagen: https://i.imgur.com/8X7w4sY.jpg] ¡Listo!");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::text("💊 Paracetamol "));
        assert_eq!(segments[2], Segment::text(" ¡Listo!"));
    }

    #[test]
    fn test_segments_reconstruct_in_order() {
        let text = "A [Imagen: u1] B [Imagen: u2] C";
        let rebuilt: String = segment(text)
            .iter()
            .map(|s| match s {
                Segment::Text { value } => value.clone(),
                Segment::Media { url } => format!("[Imagen: {url}]"),
            })
            .collect();
        assert_eq!(rebuilt, text);
    }
}
