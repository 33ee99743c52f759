//! History screen: recorded runs, newest first, with replay.

use crossterm::event::KeyEvent;
use super::{nudge_delta, App, Screen};
use crate::error::{ErrorContext, ResultExt};
use crate::input::{Command, KeyContext};

impl App {
    pub(super) async fn handle_history_key(&mut self, key: KeyEvent) {
        let Some(command) = self.keybindings.resolve(KeyContext::History, &key) else {
            return;
        };

        match command {
            Command::SelectNext => {
                if self.history_selected + 1 < self.runs.len() {
                    self.history_selected += 1;
                    self.history_detail_scroll = 0;
                }
            }
            Command::SelectPrev => {
                if self.history_selected > 0 {
                    self.history_selected -= 1;
                    self.history_detail_scroll = 0;
                }
            }
            Command::ScrollUp(target) => self.scroll_by(target, false),
            Command::ScrollDown(target) => self.scroll_by(target, true),
            Command::NudgeSplit(nudge) => self.ratios.nudge_split(nudge_delta(nudge)),
            Command::ReplaySelected => self.replay_selected().await,
            Command::Cancel => self.screen = Screen::Main,
            _ => {}
        }
    }

    /// Send the current stored version of the selected run's request and
    /// return to the main screen with it selected.
    async fn replay_selected(&mut self) {
        let Some(request_id) = self.selected_run().map(|run| run.request_id.clone()) else {
            return;
        };

        let loaded = self.services.requests.load(&request_id).context(
            ErrorContext::new("replay")
                .with_request_id(&request_id)
                .with_component("history"),
        );
        match loaded {
            Ok(request) => {
                self.send_and_record(&request).await;
                self.screen = Screen::Main;
                self.load_requests(Some(&request.id));
            }
            Err(e) => self.report_failure(e, "Could not load request for replay"),
        }
    }

    /// Keep the history selection inside a list window of `rows`.
    pub(crate) fn scroll_history_into_view(&mut self, rows: usize) {
        let rows = rows.max(1);
        if self.history_selected < self.history_scroll {
            self.history_scroll = self.history_selected;
        }
        if self.history_selected >= self.history_scroll + rows {
            self.history_scroll = self.history_selected + 1 - rows;
        }
    }
}
