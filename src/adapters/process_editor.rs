//! External editor adapter that spawns `$VISUAL`/`$EDITOR` on a temp file.

use std::fs;
use std::io::{self, Write};
use std::process::Command;

use tracing::{debug, warn};

use crate::terminal::{resume_tui, suspend_tui};
use crate::traits::{EditorError, ExternalEditor};

/// Used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "vi";

/// Pick the editor command: explicit config, then `$VISUAL`, then `$EDITOR`,
/// then `vi`. Blank values are skipped. The result is split on whitespace
/// into program and arguments.
pub fn resolve_editor_command<F>(configured: Option<&str>, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let chosen = configured
        .map(str::to_string)
        .filter(|c| !c.trim().is_empty())
        .or_else(|| lookup("VISUAL").filter(|c| !c.trim().is_empty()))
        .or_else(|| lookup("EDITOR").filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());

    chosen.split_whitespace().map(str::to_string).collect()
}

/// Runs a real editor process.
///
/// With `manage_terminal` set, the TUI is suspended for the duration of the
/// child and resumed afterwards, even when the child fails.
#[derive(Debug, Clone)]
pub struct ProcessEditor {
    configured: Option<String>,
    manage_terminal: bool,
}

impl ProcessEditor {
    pub fn new(configured: Option<String>) -> Self {
        Self {
            configured,
            manage_terminal: true,
        }
    }

    /// Leave the terminal alone (for running outside the TUI).
    pub fn without_terminal(mut self) -> Self {
        self.manage_terminal = false;
        self
    }

    fn command(&self) -> Vec<String> {
        resolve_editor_command(self.configured.as_deref(), |key| std::env::var(key).ok())
    }

    fn run(&self, argv: &[String], file: &std::path::Path) -> Result<(), EditorError> {
        let (program, args) = argv.split_first().ok_or(EditorError::EmptyCommand)?;
        debug!("Launching editor {} on {}", program, file.display());

        let status = Command::new(program)
            .args(args)
            .arg(file)
            .status()
            .map_err(|e| EditorError::Spawn {
                command: argv.join(" "),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::NonZeroExit {
                code: status.code(),
            })
        }
    }
}

impl ExternalEditor for ProcessEditor {
    fn edit(&mut self, initial: &str, suffix: &str) -> Result<String, EditorError> {
        let mut file = tempfile::Builder::new()
            .prefix("tuiman-edit-")
            .suffix(suffix)
            .rand_bytes(6)
            .tempfile()?;
        file.write_all(initial.as_bytes())?;
        file.flush()?;
        // Close our handle; the path is removed when `path` drops.
        let path = file.into_temp_path();

        let argv = self.command();
        let outcome = if self.manage_terminal {
            let mut stdout = io::stdout();
            suspend_tui(&mut stdout);
            let outcome = self.run(&argv, &path);
            if let Err(e) = resume_tui(&mut stdout) {
                warn!("Failed to restore terminal after editor: {}", e);
                return Err(EditorError::Terminal {
                    message: e.to_string(),
                });
            }
            outcome
        } else {
            self.run(&argv, &path)
        };
        outcome?;

        let bytes = fs::read(&path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
