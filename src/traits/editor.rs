//! External editor trait abstraction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor command is empty")]
    EmptyCommand,

    #[error("failed to launch '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("editor exited with status {}", exit_label(.code))]
    NonZeroExit { code: Option<i32> },

    #[error("temp file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {message}")]
    Terminal { message: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

/// Opens text in an editor and returns the edited text.
///
/// `suffix` is the temp-file extension (e.g. ".json") so the editor can pick
/// a syntax mode.
pub trait ExternalEditor: Send {
    fn edit(&mut self, initial: &str, suffix: &str) -> Result<String, EditorError>;
}
