use std::io::{self, BufRead, Write};

use rustyline::{Config, DefaultEditor, EditMode, error::ReadlineError};

/// Where the console's lines come from.
pub trait LineSource {
    /// Reads one line after showing `prompt`. `None` once input is exhausted.
    /// A cancelled line (Ctrl-C) is reported as `ErrorKind::Interrupted`.
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> io::Result<Option<String>>;

    /// Records a submitted command so it can be recalled later.
    fn remember(&mut self, _line: &str) {}
}

/// Reads from any buffered reader and echoes prompts to the console output.
/// Used for piped input and scripted sessions.
pub struct ScriptedLines<R> {
    reader: R,
}

impl<R: BufRead> ScriptedLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ScriptedLines<R> {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> io::Result<Option<String>> {
        write!(output, "{prompt}")?;
        output.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Line editor for an interactive terminal, with in-session history.
pub struct TerminalLines {
    editor: DefaultEditor,
}

impl TerminalLines {
    pub fn new() -> io::Result<Self> {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .auto_add_history(false)
            .build();
        let editor = DefaultEditor::with_config(config).map_err(readline_error)?;
        Ok(Self { editor })
    }
}

impl LineSource for TerminalLines {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> io::Result<Option<String>> {
        output.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(readline_error(err)),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %err, "could not record history entry");
        }
    }
}

fn readline_error(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        ReadlineError::Interrupted => io::Error::new(io::ErrorKind::Interrupted, "input cancelled"),
        other => io::Error::other(other.to_string()),
    }
}

pub fn is_cancelled(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::Interrupted
}
