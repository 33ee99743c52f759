//! Main screen: request list, prompts, action menu and delete confirmation.

use std::path::Path;

use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use super::{nudge_delta, App, DraftField, MainMode, PendingEdit, Screen};
use crate::domain::apply_body_edit;
use crate::error::{ErrorContext, ResultExt, TuimanError, ValidationError};
use crate::input::{typed_char, ChordStep, Command, KeyContext};
use crate::models::{guess_name, utc_timestamp, LastResponse, NewRun, Request};
use crate::storage::{export_requests, import_requests};

pub const DEFAULT_MAIN_STATUS: &str = "j/k move | / search | : command | Enter actions | E edit | d delete | ZZ/ZQ quit | { } req body | [ ] resp body | drag";

const IMPORT_USAGE: &str = ":import /path/to/export-dir";

impl App {
    pub(super) async fn handle_main_key(&mut self, key: KeyEvent) {
        if self.main_mode.is_prompt() {
            self.chord.reset();
            self.handle_prompt_key(key);
            return;
        }

        match self.main_mode.clone() {
            MainMode::Action => {
                self.chord.reset();
                self.handle_action_key(key).await;
            }
            MainMode::DeleteConfirm { id, name } => {
                self.chord.reset();
                self.handle_delete_confirm_key(key, &id, &name);
            }
            _ => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match self.chord.feed(typed_char(&key)) {
            ChordStep::Pending => return,
            ChordStep::Fired(command) => {
                self.run_main_command(command);
                return;
            }
            ChordStep::Passthrough => {}
        }

        if let Some(command) = self.keybindings.resolve(KeyContext::MainNormal, &key) {
            self.run_main_command(command);
        }
    }

    fn run_main_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.quit(),
            Command::SelectNext => {
                if self.filter_index.next() {
                    self.request_body_scroll = 0;
                }
            }
            Command::SelectPrev => {
                if self.filter_index.prev() {
                    self.request_body_scroll = 0;
                }
            }
            Command::SelectFirst => {
                self.filter_index.first();
                self.request_body_scroll = 0;
            }
            Command::SelectLast => {
                if !self.filter_index.is_empty() {
                    self.filter_index.last();
                    self.request_body_scroll = 0;
                }
            }
            Command::ScrollUp(target) => self.scroll_by(target, false),
            Command::ScrollDown(target) => self.scroll_by(target, true),
            Command::NudgeSplit(nudge) => {
                self.ratios.nudge_split(nudge_delta(nudge));
                self.refresh_resize_status();
            }
            Command::NudgeResponse(nudge) => {
                self.ratios.nudge_response(nudge_delta(nudge));
                self.refresh_resize_status();
            }
            Command::ConfirmDeleteSelected => {
                if let Some((id, name)) = self
                    .selected_request()
                    .map(|r| (r.id.clone(), r.name.clone()))
                {
                    self.main_mode = MainMode::DeleteConfirm { id, name };
                }
            }
            Command::EditSelected => {
                if let Some(request) = self.selected_request().cloned() {
                    self.enter_editor(request, DraftField::Name, true);
                }
            }
            Command::OpenSearch => self.open_prompt(MainMode::Search),
            Command::OpenReverseSearch => self.open_prompt(MainMode::ReverseSearch),
            Command::OpenCommandLine => self.open_prompt(MainMode::Command),
            Command::OpenActions => {
                if self.selected_request().is_some() {
                    self.main_mode = MainMode::Action;
                }
            }
            Command::ClearFilter => {
                if !self.filter.is_empty() {
                    self.filter.clear();
                    self.apply_filter(None);
                }
                self.set_default_main_status();
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self, mode: MainMode) {
        debug!("Main mode -> {:?}", mode);
        self.prompt.clear();
        self.main_mode = mode;
    }

    // =========================================================================
    // Prompt line (/, ?, :)
    // =========================================================================

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match self.keybindings.resolve(KeyContext::LineEditing, &key) {
            Some(Command::Cancel) => {
                self.main_mode = MainMode::Normal;
                self.prompt.clear();
                self.set_default_main_status();
            }
            Some(Command::DeleteChar) => self.prompt.backspace(),
            Some(Command::DeleteWord) => self.prompt.delete_word(),
            Some(Command::Submit) => {
                let line = self.prompt.take();
                let mode = std::mem::take(&mut self.main_mode);
                match mode {
                    MainMode::Search | MainMode::ReverseSearch => self.commit_filter(line),
                    MainMode::Command => self.execute_main_command(&line),
                    _ => {}
                }
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.prompt.push(c);
                }
            }
        }
    }

    fn commit_filter(&mut self, filter: String) {
        self.filter = filter;
        self.apply_filter(None);
        if self.filter.is_empty() {
            self.set_default_main_status();
        } else {
            self.set_status(format!(
                "FILTER: {} ({} results)",
                self.filter,
                self.filter_index.len()
            ));
        }
    }

    /// Run a `:` command line.
    pub fn execute_main_command(&mut self, line: &str) {
        let line = line.trim_start_matches(' ');
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim_start_matches(' ');
        if verb.is_empty() {
            return;
        }
        debug!("Main command: {}", verb);

        match verb {
            "q" | "quit" | "exit" => self.quit(),
            "help" => self.screen = Screen::Help,
            "new" => {
                let (method, url) = rest.split_once(' ').unwrap_or((rest, ""));
                let mut draft = Request::new();
                if !method.is_empty() {
                    draft.method = method.to_uppercase();
                }
                draft.url = url.trim().to_string();
                draft.name = guess_name(&draft.method, &draft.url);
                self.enter_editor(draft, DraftField::Name, false);
            }
            "edit" => match self.selected_request().cloned() {
                Some(request) => self.enter_editor(request, DraftField::Name, true),
                None => self.set_error("No request selected"),
            },
            "history" => {
                self.set_default_main_status();
                self.load_history();
                self.screen = Screen::History;
            }
            "export" => self.export_collection(rest.trim()),
            "import" => self.import_collection(rest.trim()),
            _ => self.set_error("Unknown command"),
        }
    }

    fn export_collection(&mut self, dest: &str) {
        let dest = if dest.is_empty() {
            chrono::Local::now()
                .format("./tuiman-export-%Y%m%d-%H%M%S")
                .to_string()
        } else {
            dest.to_string()
        };

        let exported = export_requests(&self.requests, Path::new(&dest))
            .context(ErrorContext::new("export").with_component("transfer"));
        match exported {
            Ok(report) => self.set_status(format!(
                "Exported {} requests to {} (scrubbed {} secret refs)",
                report.request_count, dest, report.scrubbed_secret_refs
            )),
            Err(e) => self.report_failure(e, "Export failed"),
        }
    }

    fn import_collection(&mut self, src: &str) {
        if src.is_empty() {
            self.report_error(ValidationError::Usage { usage: IMPORT_USAGE });
            return;
        }

        let imported = import_requests(&self.services.requests, Path::new(src))
            .context(ErrorContext::new("import").with_component("transfer"));
        match imported {
            Ok(count) => {
                self.load_requests(None);
                self.set_status(format!("Imported {} requests", count));
            }
            Err(e) => self.report_failure(e, "Import failed"),
        }
    }

    // =========================================================================
    // Action menu
    // =========================================================================

    async fn handle_action_key(&mut self, key: KeyEvent) {
        let Some(command) = self.keybindings.resolve(KeyContext::MainAction, &key) else {
            return;
        };
        let selected = self.selected_request().cloned();

        match (command, selected) {
            (Command::SendSelected, Some(request)) => {
                self.main_mode = MainMode::Normal;
                self.send_and_record(&request).await;
            }
            (Command::EditSelectedBody, Some(request)) => {
                self.main_mode = MainMode::Normal;
                self.pending_edit = Some(PendingEdit::RequestBody { id: request.id });
            }
            (Command::EditSelectedAuth, Some(request)) => {
                self.main_mode = MainMode::Normal;
                self.enter_editor(request, DraftField::AuthType, true);
            }
            (Command::Cancel, _) => {
                self.main_mode = MainMode::Normal;
                self.set_default_main_status();
            }
            _ => {}
        }
    }

    /// Send a request, show the outcome in the response pane and append a run.
    ///
    /// The run is recorded whether or not the send succeeded. A history
    /// write failure is logged and otherwise ignored.
    pub async fn send_and_record(&mut self, request: &Request) {
        info!("Sending {} {}", request.method, request.url);
        let exchange = self.services.transport.send(request).await;
        let at = utc_timestamp();
        let error = exchange.error_text();

        self.last_response = Some(LastResponse {
            request_id: request.id.clone(),
            request_name: request.name.clone(),
            method: request.method.clone(),
            url: request.url.clone(),
            at: at.clone(),
            status_code: exchange.status_code,
            duration_ms: exchange.duration_ms,
            error: error.clone(),
            body: exchange.body.clone(),
        });
        self.response_body_scroll = 0;

        let run = NewRun {
            status_code: exchange.status_code,
            duration_ms: exchange.duration_ms,
            error: error.clone(),
            response_body: exchange.body,
            ..NewRun::from_request(request, at)
        };
        if let Err(e) = self.services.history.append(&run) {
            warn!("Failed to record run for {}: {}", request.id, e);
        }

        match exchange.error {
            None => self.set_status("Request sent"),
            Some(err) => {
                let status = format!("Request failed: {}", error);
                let ctx = ErrorContext::new("send")
                    .with_request_id(&request.id)
                    .with_component("transport");
                self.report_failure(TuimanError::from(err).with_context(ctx), status);
            }
        }
    }

    /// External edit of a saved request's body, then save and reload.
    pub(super) fn edit_request_body(&mut self, id: &str, suffix: &str) {
        let Some(mut request) = self.requests.iter().find(|r| r.id == id).cloned() else {
            self.set_error("No request selected");
            return;
        };

        let edited = match self.services.editor.edit(&request.body, suffix) {
            Ok(text) => text,
            Err(e) => {
                self.report_failure(e, "Body edit cancelled or failed");
                return;
            }
        };

        let edit = match apply_body_edit(&edited) {
            Ok(edit) => edit,
            Err(e) => {
                self.report_error(e);
                return;
            }
        };
        let status = if edit.is_json() {
            "Body updated (JSON formatted)"
        } else {
            "Body updated"
        };
        request.body = edit.into_text();

        let saved = self.services.requests.save(&mut request).context(
            ErrorContext::new("save body")
                .with_request_id(&request.id)
                .with_component("request_store"),
        );
        match saved {
            Ok(()) => {
                info!("Updated body of request {}", request.id);
                self.load_requests(Some(&request.id));
                self.set_status(status);
            }
            Err(e) => self.report_failure(e, "Failed to save request"),
        }
    }

    // =========================================================================
    // Delete confirmation
    // =========================================================================

    fn handle_delete_confirm_key(&mut self, key: KeyEvent, id: &str, name: &str) {
        match self
            .keybindings
            .resolve(KeyContext::MainDeleteConfirm, &key)
        {
            Some(Command::Confirm) => {
                self.main_mode = MainMode::Normal;
                self.delete_request(id, name);
            }
            Some(Command::Cancel) => {
                self.main_mode = MainMode::Normal;
                self.set_default_main_status();
            }
            _ => {}
        }
    }

    fn delete_request(&mut self, id: &str, name: &str) {
        let successor = self.filter_index.successor_after_delete(&self.requests);
        let deleted = self.services.requests.delete(id).context(
            ErrorContext::new("delete")
                .with_request_id(id)
                .with_component("request_store"),
        );
        match deleted {
            Ok(()) => {
                info!("Deleted request {}", id);
                self.load_requests(successor.as_deref());
                self.set_status(format!("Deleted request: {}", name));
            }
            Err(e) => self.report_failure(e, "Failed to delete request"),
        }
    }
}
