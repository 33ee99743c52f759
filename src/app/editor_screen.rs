//! Editor screen: a draft request edited one field at a time.
//!
//! The draft is a working copy. It is written back only by a successful
//! save (`Ctrl+S`, `:w`, `:wq`) and dropped on `Esc`/`:q`.

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use super::{App, PendingEdit, Screen};
use crate::domain::apply_body_edit;
use crate::error::{ErrorContext, ResultExt, ValidationError};
use crate::input::{typed_char, Command, KeyContext, LineBuffer};
use crate::models::{guess_name, Method, Request};

const SECRET_USAGE: &str = ":secret VALUE";

/// Editable fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Method,
    Url,
    HeaderKey,
    HeaderValue,
    AuthType,
    SecretRef,
    AuthKeyName,
    AuthLocation,
    AuthUsername,
}

impl DraftField {
    pub const ALL: [DraftField; 10] = [
        DraftField::Name,
        DraftField::Method,
        DraftField::Url,
        DraftField::HeaderKey,
        DraftField::HeaderValue,
        DraftField::AuthType,
        DraftField::SecretRef,
        DraftField::AuthKeyName,
        DraftField::AuthLocation,
        DraftField::AuthUsername,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Method => "Method",
            DraftField::Url => "URL",
            DraftField::HeaderKey => "Header Key",
            DraftField::HeaderValue => "Header Value",
            DraftField::AuthType => "Auth Type",
            DraftField::SecretRef => "Secret Ref",
            DraftField::AuthKeyName => "Auth Key Name",
            DraftField::AuthLocation => "Auth Location",
            DraftField::AuthUsername => "Auth Username",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Next field down, stopping at the last.
    pub fn next(&self) -> DraftField {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(*self)
    }

    /// Next field up, stopping at the first.
    pub fn prev(&self) -> DraftField {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(*self)
    }

    pub fn value<'a>(&self, request: &'a Request) -> &'a str {
        match self {
            DraftField::Name => &request.name,
            DraftField::Method => &request.method,
            DraftField::Url => &request.url,
            DraftField::HeaderKey => &request.header_key,
            DraftField::HeaderValue => &request.header_value,
            DraftField::AuthType => &request.auth_type,
            DraftField::SecretRef => &request.auth_secret_ref,
            DraftField::AuthKeyName => &request.auth_key_name,
            DraftField::AuthLocation => &request.auth_location,
            DraftField::AuthUsername => &request.auth_username,
        }
    }

    /// Write `value` into the field. Method input is upper-cased.
    pub fn set(&self, request: &mut Request, value: &str) {
        let slot = match self {
            DraftField::Method => {
                request.method = value.to_uppercase();
                return;
            }
            DraftField::Name => &mut request.name,
            DraftField::Url => &mut request.url,
            DraftField::HeaderKey => &mut request.header_key,
            DraftField::HeaderValue => &mut request.header_value,
            DraftField::AuthType => &mut request.auth_type,
            DraftField::SecretRef => &mut request.auth_secret_ref,
            DraftField::AuthKeyName => &mut request.auth_key_name,
            DraftField::AuthLocation => &mut request.auth_location,
            DraftField::AuthUsername => &mut request.auth_username,
        };
        slot.clear();
        slot.push_str(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Normal,
    Insert,
    Command,
}

/// State of the editor screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub draft: Request,
    /// True when the draft was loaded from a saved request
    pub existing: bool,
    pub field: DraftField,
    pub mode: EditorMode,
    /// Insert-mode buffer for the focused field
    pub input: LineBuffer,
    /// `:` command-line buffer
    pub command: LineBuffer,
    pub body_scroll: usize,
}

impl EditorState {
    pub fn new(draft: Request, field: DraftField, existing: bool) -> Self {
        Self {
            draft,
            existing,
            field,
            mode: EditorMode::Normal,
            input: LineBuffer::new(),
            command: LineBuffer::new(),
            body_scroll: 0,
        }
    }

    /// Copy the insert buffer into the focused field.
    fn echo_input(&mut self) {
        self.field.set(&mut self.draft, self.input.as_str());
    }
}

impl App {
    /// Open the editor on `draft`, focusing `field`.
    pub fn enter_editor(&mut self, draft: Request, field: DraftField, existing: bool) {
        debug!("Editor opened on {} (existing={})", draft.id, existing);
        self.editor = Some(EditorState::new(draft, field, existing));
        self.drag = super::DragMode::None;
        self.clear_status();
        self.screen = Screen::Editor;
    }

    fn leave_editor(&mut self) {
        self.editor = None;
        self.screen = Screen::Main;
    }

    pub(super) fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(mode) = self.editor.as_ref().map(|e| e.mode) else {
            self.screen = Screen::Main;
            return;
        };
        match mode {
            EditorMode::Normal => self.handle_editor_normal_key(key),
            EditorMode::Insert => self.handle_insert_key(key),
            EditorMode::Command => self.handle_editor_command_key(key),
        }
    }

    fn handle_editor_normal_key(&mut self, key: KeyEvent) {
        let Some(command) = self.keybindings.resolve(KeyContext::EditorNormal, &key) else {
            return;
        };
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match command {
            Command::NextField => editor.field = editor.field.next(),
            Command::PrevField => editor.field = editor.field.prev(),
            Command::CycleMethodBack | Command::CycleMethodForward => {
                if editor.field == DraftField::Method {
                    let delta = if command == Command::CycleMethodBack { -1 } else { 1 };
                    editor.draft.method = Method::cycle(&editor.draft.method, delta)
                        .as_str()
                        .to_string();
                }
            }
            Command::StartInsert => {
                if editor.field == DraftField::Method {
                    self.set_status("Method uses h/l cycle");
                } else {
                    editor.input = LineBuffer::from_text(editor.field.value(&editor.draft));
                    editor.mode = EditorMode::Insert;
                }
            }
            Command::ScrollUp(target) => self.scroll_by(target, false),
            Command::ScrollDown(target) => self.scroll_by(target, true),
            Command::EditDraftBody => self.pending_edit = Some(PendingEdit::DraftBody),
            Command::OpenCommandLine => {
                editor.command.clear();
                editor.mode = EditorMode::Command;
            }
            Command::SaveDraft => self.save_draft(),
            Command::Cancel => {
                self.leave_editor();
                self.set_status("Draft cancelled");
            }
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        let command = self.keybindings.resolve(KeyContext::LineEditing, &key);
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match command {
            Some(Command::Submit) | Some(Command::Cancel) => {
                editor.echo_input();
                editor.mode = EditorMode::Normal;
                return;
            }
            Some(Command::DeleteChar) => editor.input.backspace(),
            Some(Command::DeleteWord) => editor.input.delete_word(),
            _ => match typed_char(&key) {
                Some(c) => {
                    editor.input.push(c);
                }
                None => return,
            },
        }
        editor.echo_input();
        let url_edited = editor.field == DraftField::Url;
        if url_edited {
            self.clear_missing_url_error();
        }
    }

    fn handle_editor_command_key(&mut self, key: KeyEvent) {
        let command = self.keybindings.resolve(KeyContext::LineEditing, &key);
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match command {
            Some(Command::Cancel) => {
                editor.command.clear();
                editor.mode = EditorMode::Normal;
            }
            Some(Command::DeleteChar) => editor.command.backspace(),
            Some(Command::DeleteWord) => editor.command.delete_word(),
            Some(Command::Submit) => {
                let line = editor.command.take();
                editor.mode = EditorMode::Normal;
                self.execute_editor_command(&line);
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    editor.command.push(c);
                }
            }
        }
    }

    pub(super) fn paste_into_editor(&mut self, text: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.mode {
            EditorMode::Insert => {
                for c in text.chars() {
                    editor.input.push(c);
                }
                editor.echo_input();
                if editor.field == DraftField::Url {
                    self.clear_missing_url_error();
                }
            }
            EditorMode::Command => {
                for c in text.chars() {
                    editor.command.push(c);
                }
            }
            EditorMode::Normal => {}
        }
    }

    fn clear_missing_url_error(&mut self) {
        if self.status.text == ValidationError::EmptyUrl.to_string() {
            self.clear_status();
        }
    }

    /// Run an editor `:` command line.
    pub fn execute_editor_command(&mut self, line: &str) {
        match line {
            "w" | "wq" => self.save_draft(),
            "q" => {
                self.leave_editor();
                self.set_default_main_status();
            }
            _ if line == "secret" || line.starts_with("secret ") => {
                let value = line["secret".len()..].trim_start_matches(' ');
                self.store_draft_secret(value);
            }
            _ => self.set_error("Unknown editor command"),
        }
    }

    /// Store `value` under the draft's secret reference. The value itself is
    /// never copied into the draft.
    fn store_draft_secret(&mut self, value: &str) {
        let reference = self
            .editor
            .as_ref()
            .map(|e| e.draft.auth_secret_ref.clone())
            .unwrap_or_default();
        if reference.is_empty() {
            self.report_error(ValidationError::MissingSecretRef);
            return;
        }
        if value.is_empty() {
            self.report_error(ValidationError::Usage { usage: SECRET_USAGE });
            return;
        }

        let backend = self.services.secrets.backend_name();
        match self.services.secrets.set(&reference, value) {
            Ok(()) => {
                info!("Stored secret for ref {} in {}", reference, backend);
                self.set_status(format!("Secret stored in {}", backend));
            }
            Err(e) => {
                let status = format!("Failed to store secret in {}", backend);
                self.report_failure(e, status);
            }
        }
    }

    /// Validate and persist the draft, then return to the main screen with
    /// the saved request selected.
    pub fn save_draft(&mut self) {
        let mut request = match self.editor.as_mut() {
            Some(editor) => {
                let draft = &mut editor.draft;
                if draft.method.is_empty() {
                    draft.method = Method::Get.as_str().to_string();
                }
                if draft.name.is_empty() {
                    draft.name = guess_name(&draft.method, &draft.url);
                }
                draft.clone()
            }
            None => return,
        };

        if request.url.is_empty() {
            self.report_error(ValidationError::EmptyUrl);
            return;
        }

        let saved = self.services.requests.save(&mut request).context(
            ErrorContext::new("save draft")
                .with_request_id(&request.id)
                .with_component("request_store"),
        );
        if let Err(e) = saved {
            self.report_failure(e, "Failed to save request");
            return;
        }

        info!("Saved request {} ({})", request.id, request.name);
        self.leave_editor();
        self.main_mode = super::MainMode::Normal;
        self.load_requests(Some(&request.id));
        self.set_status("Request saved");
    }

    /// External edit of the draft body.
    pub(super) fn edit_draft_body(&mut self, suffix: &str) {
        let Some(initial) = self.editor.as_ref().map(|e| e.draft.body.clone()) else {
            return;
        };

        let edited = match self.services.editor.edit(&initial, suffix) {
            Ok(text) => text,
            Err(e) => {
                self.report_failure(e, "Body edit cancelled or failed");
                return;
            }
        };

        match apply_body_edit(&edited) {
            Ok(edit) => {
                let status = if edit.is_json() {
                    "Draft body updated (JSON formatted)"
                } else {
                    "Draft body updated"
                };
                if let Some(editor) = self.editor.as_mut() {
                    editor.draft.body = edit.into_text();
                    editor.body_scroll = 0;
                }
                self.set_status(status);
            }
            Err(e) => self.report_error(e),
        }
    }
}
