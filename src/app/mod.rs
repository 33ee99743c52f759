//! Application state and event handling.
//!
//! [`App`] owns every piece of UI state plus the [`Services`] it talks to.
//! Events come in through [`App::handle_event`] and are dispatched to the
//! handler of the active [`Screen`]:
//!
//! - [`main_screen`] - Request list, filter/command prompt, send and delete
//! - [`editor_screen`] - Field-by-field draft editing and save
//! - [`history_screen`] - Recorded runs and replay
//! - [`help`] - Static help page
//! - [`mouse`] - Divider drag gestures on every screen

pub mod editor_screen;
mod help;
mod history_screen;
mod main_screen;
mod mouse;
mod types;

pub use editor_screen::{DraftField, EditorMode, EditorState};
pub use main_screen::DEFAULT_MAIN_STATUS;
pub use types::{DragMode, MainMode, PendingEdit, Screen, Status};

use std::sync::Arc;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::domain::FilterIndex;
use crate::error::{ErrorCategory, ErrorContext, ResultExt, TuimanError};
use crate::input::{
    ChordState, Command, KeyCombo, KeyContext, KeybindingConfig, LineBuffer, Nudge, ScrollTarget,
};
use crate::models::{LastResponse, Request, Run};
use crate::storage::{HistoryLog, RequestStore};
use crate::traits::{ExternalEditor, SecretStore, Transport};
use crate::ui::layout::{main_layout, PaneRatios, NUDGE_STEP};

/// Collaborators the screens call into.
pub struct Services {
    pub requests: RequestStore,
    pub history: HistoryLog,
    pub transport: Arc<dyn Transport>,
    pub secrets: Arc<dyn SecretStore>,
    pub editor: Box<dyn ExternalEditor>,
    /// Maximum runs loaded into the history screen
    pub history_limit: usize,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("requests", &self.requests)
            .field("history", &self.history)
            .field("secrets", &self.secrets.backend_name())
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    pub services: Services,
    pub keybindings: KeybindingConfig,

    /// Saved requests, sorted by name
    pub requests: Vec<Request>,
    /// Visible subset of `requests` plus selection
    pub filter_index: FilterIndex,
    /// Committed filter text
    pub filter: String,

    pub screen: Screen,
    pub main_mode: MainMode,
    pub chord: ChordState,
    /// Shared prompt for `/`, `?` and `:` on the main screen
    pub prompt: LineBuffer,
    /// Draft open in the editor screen
    pub editor: Option<EditorState>,

    /// Runs shown in the history screen, newest first
    pub runs: Vec<Run>,
    pub history_selected: usize,
    pub history_scroll: usize,
    pub history_detail_scroll: usize,

    pub request_body_scroll: usize,
    pub response_body_scroll: usize,
    pub last_response: Option<LastResponse>,

    pub ratios: PaneRatios,
    pub drag: DragMode,
    pub status: Status,

    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,

    /// Cleared to stop the event loop
    pub running: bool,
    /// Set when state changed since the last frame
    pub dirty: bool,
    /// Editor run queued for the event loop
    pub pending_edit: Option<PendingEdit>,
}

impl App {
    /// Create the app and load the request collection.
    pub fn new(services: Services) -> Self {
        let mut app = Self {
            services,
            keybindings: KeybindingConfig::new(),
            requests: Vec::new(),
            filter_index: FilterIndex::new(),
            filter: String::new(),
            screen: Screen::Main,
            main_mode: MainMode::Normal,
            chord: ChordState::new(),
            prompt: LineBuffer::new(),
            editor: None,
            runs: Vec::new(),
            history_selected: 0,
            history_scroll: 0,
            history_detail_scroll: 0,
            request_body_scroll: 0,
            response_body_scroll: 0,
            last_response: None,
            ratios: PaneRatios::default(),
            drag: DragMode::None,
            status: Status::default(),
            width: 80,
            height: 24,
            running: true,
            dirty: true,
            pending_edit: None,
        };
        app.set_default_main_status();
        app.load_requests(None);
        app
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn quit(&mut self) {
        debug!("Quit requested");
        self.running = false;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.mark_dirty();
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Status {
            text: text.into(),
            is_error: false,
        };
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Status {
            text: text.into(),
            is_error: true,
        };
    }

    pub fn clear_status(&mut self) {
        self.status = Status::default();
    }

    /// Show an error's own user message in red.
    pub fn report_error(&mut self, err: impl Into<TuimanError>) {
        let err = err.into();
        let text = err.user_message();
        self.report_failure(err, text);
    }

    /// Log a recoverable failure and show `status` in red.
    ///
    /// Input mistakes only reach the debug log; everything else is a
    /// warning carrying its category, code and context.
    pub fn report_failure(&mut self, err: impl Into<TuimanError>, status: impl Into<String>) {
        let err = err.into();
        let category = err.category();
        let context = err
            .context()
            .map(ErrorContext::to_log_string)
            .unwrap_or_default();
        if category == ErrorCategory::User {
            debug!(category = %category, code = err.error_code(), "{} {}", err, context);
        } else {
            warn!(category = %category, code = err.error_code(), "{} {}", err, context);
        }
        self.set_error(status);
    }

    pub fn set_default_main_status(&mut self) {
        self.set_status(DEFAULT_MAIN_STATUS);
    }

    /// Resize status for the current main layout. No-op when the terminal
    /// is too small to lay out.
    pub(crate) fn refresh_resize_status(&mut self) {
        if let Some(layout) = main_layout(self.width, self.height, self.ratios) {
            let text = self.ratios.resize_status(layout.response_rows());
            self.set_status(text);
        }
    }

    /// Move a pane's scroll offset by one line. Renderers clamp the upper end.
    pub(crate) fn scroll_by(&mut self, target: ScrollTarget, down: bool) {
        let offset = match target {
            ScrollTarget::RequestBody => &mut self.request_body_scroll,
            ScrollTarget::ResponseBody => &mut self.response_body_scroll,
            ScrollTarget::HistoryDetail => &mut self.history_detail_scroll,
            ScrollTarget::DraftBody => match self.editor.as_mut() {
                Some(editor) => &mut editor.body_scroll,
                None => return,
            },
        };
        *offset = if down {
            offset.saturating_add(1)
        } else {
            offset.saturating_sub(1)
        };
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Reload requests from disk and re-apply the filter, selecting
    /// `select_id` when it is visible.
    pub fn load_requests(&mut self, select_id: Option<&str>) {
        let listed = self
            .services
            .requests
            .list()
            .context(ErrorContext::new("load requests").with_component("request_store"));
        match listed {
            Ok(requests) => self.requests = requests,
            Err(e) => {
                self.requests.clear();
                self.report_failure(e, "Failed to load requests");
            }
        }
        self.apply_filter(select_id);
    }

    pub(crate) fn apply_filter(&mut self, select_id: Option<&str>) {
        self.filter_index
            .apply(&self.requests, &self.filter, select_id);
        self.request_body_scroll = 0;
    }

    pub fn selected_request(&self) -> Option<&Request> {
        self.filter_index.selected_request(&self.requests)
    }

    /// Load the most recent runs into the history screen and reset its view.
    pub fn load_history(&mut self) {
        let listed = self
            .services
            .history
            .list(self.services.history_limit)
            .context(ErrorContext::new("load history").with_component("history_log"));
        match listed {
            Ok(runs) => self.runs = runs,
            Err(e) => {
                self.runs.clear();
                self.report_failure(e, "Failed to load history");
            }
        }
        self.history_selected = 0;
        self.history_scroll = 0;
        self.history_detail_scroll = 0;
        self.drag = DragMode::None;
    }

    pub fn selected_run(&self) -> Option<&Run> {
        self.runs.get(self.history_selected)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle one terminal event.
    pub async fn handle_event(&mut self, event: Event) {
        self.mark_dirty();
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if self.keybindings.global.get(&KeyCombo::from_event(&key)) == Some(&Command::Quit) {
            self.quit();
            return;
        }

        self.drag = DragMode::None;

        match self.screen {
            Screen::Main => self.handle_main_key(key).await,
            Screen::Editor => self.handle_editor_key(key),
            Screen::History => self.handle_history_key(key).await,
            Screen::Help => self.handle_help_key(key),
        }
    }

    /// Pasted text goes wherever typed text would.
    fn handle_paste(&mut self, text: &str) {
        match self.screen {
            Screen::Main if self.main_mode.is_prompt() => {
                for c in text.chars() {
                    self.prompt.push(c);
                }
            }
            Screen::Editor => self.paste_into_editor(text),
            _ => {}
        }
    }

    /// Binding context for the current screen and mode.
    pub fn key_context(&self) -> KeyContext {
        match self.screen {
            Screen::Main => match self.main_mode {
                MainMode::Normal => KeyContext::MainNormal,
                MainMode::Action => KeyContext::MainAction,
                MainMode::DeleteConfirm { .. } => KeyContext::MainDeleteConfirm,
                MainMode::Search | MainMode::ReverseSearch | MainMode::Command => {
                    KeyContext::LineEditing
                }
            },
            Screen::Editor => match self.editor.as_ref().map(|e| e.mode) {
                Some(EditorMode::Insert) | Some(EditorMode::Command) => KeyContext::LineEditing,
                _ => KeyContext::EditorNormal,
            },
            Screen::History => KeyContext::History,
            Screen::Help => KeyContext::Help,
        }
    }

    /// Run the queued external edit, if any.
    ///
    /// Called by the event loop once it has stopped reading terminal input.
    pub fn run_pending_edit(&mut self) {
        let Some(edit) = self.pending_edit.take() else {
            return;
        };
        debug!("Running external edit: {:?}", edit);
        let suffix = edit.suffix();
        match edit {
            PendingEdit::RequestBody { id } => self.edit_request_body(&id, suffix),
            PendingEdit::DraftBody => self.edit_draft_body(suffix),
        }
        self.mark_dirty();
    }
}

/// Ratio change for one H/L/K/J press.
pub(crate) fn nudge_delta(nudge: Nudge) -> f64 {
    match nudge {
        Nudge::Shrink => -NUDGE_STEP,
        Nudge::Grow => NUDGE_STEP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySecretStore, MockEditor, MockTransport};
    use crate::error::{StorageError, ValidationError};
    use tempfile::TempDir;

    fn app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let services = Services {
            requests: RequestStore::new(dir.path().join("requests")),
            history: HistoryLog::open_in_memory().unwrap(),
            transport: Arc::new(MockTransport::new()),
            secrets: Arc::new(InMemorySecretStore::new()),
            editor: Box::new(MockEditor::new()),
            history_limit: 10,
        };
        (dir, App::new(services))
    }

    #[test]
    fn test_report_error_uses_user_message() {
        let (_dir, mut app) = app();
        app.report_error(ValidationError::EmptyUrl);
        assert_eq!(app.status.text, "URL cannot be empty");
        assert!(app.status.is_error);
    }

    #[test]
    fn test_report_failure_keeps_fixed_status() {
        let (_dir, mut app) = app();
        let err = TuimanError::from(StorageError::RequestNotFound { id: "r1".into() })
            .with_context(ErrorContext::new("replay").with_request_id("r1"));
        app.report_failure(err, "Could not load request for replay");
        assert_eq!(app.status.text, "Could not load request for replay");
        assert!(app.status.is_error);
    }
}
