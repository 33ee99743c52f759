//! Type definitions for the application state.
//!
//! - [`Screen`] - Which screen is currently displayed
//! - [`MainMode`] - Sub-mode of the main screen
//! - [`DragMode`] - Divider being dragged with the mouse
//! - [`PendingEdit`] - External editor run queued by a key handler
//! - [`Status`] - Status line text and its error flag

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    Editor,
    History,
    Help,
}

/// Sub-mode of the main screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MainMode {
    #[default]
    Normal,
    /// Action menu for the selected request (y/e/a/n)
    Action,
    /// `/` prompt
    Search,
    /// `?` prompt
    ReverseSearch,
    /// `:` prompt
    Command,
    /// Waiting for y/n. Carries a snapshot of what will be deleted.
    DeleteConfirm { id: String, name: String },
}

impl MainMode {
    /// True for the modes that edit the shared prompt line.
    pub fn is_prompt(&self) -> bool {
        matches!(
            self,
            MainMode::Search | MainMode::ReverseSearch | MainMode::Command
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Vertical,
    Horizontal,
}

/// Body edit waiting for the event loop to release the terminal.
///
/// Key handlers only queue the edit; the loop runs it between events so
/// the editor owns stdin while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingEdit {
    /// Body of a saved request, from the main screen's action menu.
    RequestBody { id: String },
    /// Body of the draft open in the editor screen.
    DraftBody,
}

impl PendingEdit {
    /// Temp-file suffix handed to the editor.
    pub fn suffix(&self) -> &'static str {
        match self {
            PendingEdit::RequestBody { .. } => ".txt",
            PendingEdit::DraftBody => ".json",
        }
    }
}

/// Status line contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub text: String,
    /// Rendered red when set
    pub is_error: bool,
}

impl Status {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
