//! Help screen input. The page itself is drawn by `ui::help_view`.

use crossterm::event::KeyEvent;

use super::{App, Screen};
use crate::input::{Command, KeyContext};

impl App {
    pub(super) fn handle_help_key(&mut self, key: KeyEvent) {
        if self.keybindings.resolve(KeyContext::Help, &key) == Some(Command::Cancel) {
            self.screen = Screen::Main;
        }
    }
}
