//! Interactive query loop.

use std::collections::VecDeque;
use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, error};

use crate::error::BridgeError;
use crate::orchestrator::Orchestrator;
use crate::provider::ChatModel;
use crate::tools::ToolServer;

pub const PROMPT: &str = "Query: ";
pub const QUIT_COMMAND: &str = "quit";

/// Where the loop reads queries from.
pub trait LineSource {
    /// Next line of input, or `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, BridgeError>;
}

/// Line editor backed by rustyline, with in-memory history.
pub struct ReadlineSource {
    editor: DefaultEditor,
}

impl ReadlineSource {
    pub fn new() -> Result<Self, BridgeError> {
        let editor = DefaultEditor::new()
            .map_err(|e| BridgeError::InvalidState(format!("cannot open line editor: {e}")))?;
        Ok(Self { editor })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, BridgeError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(BridgeError::Io(e)),
            Err(e) => Err(BridgeError::InvalidState(format!("line editor failed: {e}"))),
        }
    }
}

/// Fixed list of input lines, for non-interactive use.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.lines.pop_front())
    }
}

/// Read queries until `quit` or end of input, writing each answer to `out`.
///
/// A failed query is reported as `Error: ...` and the loop keeps going.
/// Returns the number of queries answered successfully.
pub async fn run_repl<M, T, S, W>(
    orchestrator: &Orchestrator<M, T>,
    source: &mut S,
    out: &mut W,
) -> Result<usize, BridgeError>
where
    M: ChatModel,
    T: ToolServer,
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "\nMCP Client Started!")?;
    writeln!(out, "Type your queries or '{QUIT_COMMAND}' to exit.")?;

    let mut answered = 0;
    while let Some(line) = source.read_line(PROMPT)? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case(QUIT_COMMAND) {
            debug!("quit requested");
            break;
        }

        match orchestrator.answer(query).await {
            Ok(answer) => {
                writeln!(out, "\n{answer}")?;
                answered += 1;
            }
            Err(err) => {
                error!(category = ?err.category(), "query failed: {err}");
                writeln!(out, "\nError: {err}")?;
            }
        }
        out.flush()?;
    }

    Ok(answered)
}
