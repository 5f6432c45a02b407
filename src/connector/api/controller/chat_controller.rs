use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::application::{ChatBackend, ConverseUseCase};
use crate::domain::{Role, Segment, Transcript, Turn, DISCLAIMER, SUGGESTIONS};

use super::markdown::render_markdown;

const RESET_COMMAND: &str = "/borrar";
const QUIT_COMMAND: &str = "/salir";

/// Terminal rendition of the chat widget.
pub struct ChatController {
    use_case: ConverseUseCase,
}

impl ChatController {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            use_case: ConverseUseCase::new(backend),
        }
    }

    /// Read lines from `input` until EOF or `/salir`, printing the
    /// conversation to `output`. Returns the final transcript.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<Transcript>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut transcript = Transcript::seeded();
        output.write_all(render_header().as_bytes()).await?;
        output.write_all(render_turn(&transcript.turns()[0]).as_bytes()).await?;
        output.write_all(render_prompt().as_bytes()).await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();

            match line {
                QUIT_COMMAND => break,
                RESET_COMMAND => {
                    debug!("Transcript reset");
                    transcript = self.use_case.reset(&transcript);
                    output.write_all("\n--- Conversación reiniciada ---\n".as_bytes()).await?;
                    output.write_all(render_turn(&transcript.turns()[0]).as_bytes()).await?;
                }
                "" => {}
                _ => {
                    let message = resolve_suggestion(line).unwrap_or(line);
                    output.write_all("FarmaBot está escribiendo... 💬\n".as_bytes()).await?;
                    output.flush().await?;

                    let before = transcript.len();
                    transcript = self.use_case.submit(&transcript, message).await;
                    for turn in &transcript.turns()[before..] {
                        if turn.role() == Role::Model {
                            output.write_all(render_turn(turn).as_bytes()).await?;
                        }
                    }
                }
            }

            output.write_all(render_prompt().as_bytes()).await?;
            output.flush().await?;
        }

        output.write_all(format!("\n{DISCLAIMER}\n").as_bytes()).await?;
        output.flush().await?;
        Ok(transcript)
    }
}

/// A bare number selects one of the quick suggestions.
fn resolve_suggestion(line: &str) -> Option<&'static str> {
    let index: usize = line.parse().ok()?;
    SUGGESTIONS.get(index.checked_sub(1)?).copied()
}

fn render_header() -> String {
    let mut out = String::from("Chatbot Farmacia 🤖\n");
    out.push_str(&format!(
        "Escribe tu consulta ({RESET_COMMAND} reinicia, {QUIT_COMMAND} termina). Sugerencias:\n"
    ));
    for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, suggestion));
    }
    out
}

fn render_prompt() -> &'static str {
    "\n> "
}

/// Speaker line, then Markdown text and media links in order.
pub fn render_turn(turn: &Turn) -> String {
    let speaker = match turn.role() {
        Role::User => "Tú",
        Role::Model => "FarmaBot",
    };

    let mut out = format!("\n{speaker}:\n");
    for segment in turn.content() {
        match segment {
            Segment::Text { value } => out.push_str(&render_markdown(value)),
            Segment::Media { url } => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&format!("🖼  {url}\n"));
            }
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
