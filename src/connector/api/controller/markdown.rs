use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Render model Markdown as plain terminal text.
///
/// Emphasis markers are dropped, list items become `•` (or numbered) lines
/// indented by nesting depth, and block elements end on their own line.
pub fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    // Next number for each open list; `None` for bulleted lists.
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::List(start)) => {
                ensure_line_break(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                ensure_line_break(&mut out);
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{n}. "));
                        *n += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::Start(Tag::Paragraph)
            | Event::Start(Tag::Heading { .. })
            | Event::Start(Tag::CodeBlock(_)) => {
                if lists.is_empty() {
                    ensure_line_break(&mut out);
                }
            }
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => ensure_line_break(&mut out),
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => {
                out.push_str(&t)
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => {
                ensure_line_break(&mut out);
                out.push_str("---\n");
            }
            _ => {}
        }
    }

    out
}

fn ensure_line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
