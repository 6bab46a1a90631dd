//! Interactive interview on a terminal.
//!
//! Every non-empty line is submitted as a memory. Lines starting with `/` are
//! commands: `/story` writes the story, `/transcript` prints the conversation
//! and `/quit` leaves.

use keeper::{GenerationResult, Role, Session};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Story,
    Transcript,
    Quit,
    Unknown(&'a str),
    Memory(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    match line.trim() {
        "/story" => Command::Story,
        "/transcript" => Command::Transcript,
        "/quit" | "/exit" => Command::Quit,
        cmd if cmd.starts_with('/') => Command::Unknown(cmd),
        _ => Command::Memory(line),
    }
}

fn render(speaker: Role, text: &str) -> String {
    format!("{}: {}\n", speaker.label(), text)
}

/// Run the interview until `/quit` or end of input.
pub async fn run_chat<R, W>(session: &Session, input: R, mut output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for turn in session.transcript() {
        output
            .write_all(render(turn.speaker, &turn.text).as_bytes())
            .await?;
    }
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match parse(&line) {
            Command::Quit => break,
            Command::Story => {
                output.write_all(b"Generating...\n").await?;
                output.flush().await?;
                match session.generate().await {
                    Ok(GenerationResult::Success { text }) => format!("\n{text}\n\n"),
                    Ok(GenerationResult::Failure { message }) => format!("Error: {message}\n"),
                    Ok(other) => format!("Unexpected result: {other:?}\n"),
                    Err(e) => format!("Error: {e}\n"),
                }
            }
            Command::Transcript => session
                .transcript()
                .iter()
                .map(|t| render(t.speaker, &t.text))
                .collect(),
            Command::Unknown(cmd) => {
                format!("Unknown command {cmd}. Try /story, /transcript or /quit.\n")
            }
            Command::Memory(text) => {
                let before = session.transcript().len();
                session.submit(text);
                match session.transcript().get(before + 1) {
                    Some(follow_up) => render(follow_up.speaker, &follow_up.text),
                    None => {
                        debug!("ignored blank line");
                        String::new()
                    }
                }
            }
        };
        output.write_all(reply.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
