//! Default key bindings.
//!
//! Bindings are grouped by [`KeyContext`]. Lookups strip SHIFT from character
//! keys, so `G` is bound as `Char('G')` regardless of how the terminal
//! reports the modifier.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use super::command::{Command, Nudge, ScrollTarget};

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub const fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Normalized combo for a key event.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers = key.modifiers;
        if matches!(key.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self::new(key.code, modifiers)
    }
}

/// Where a key press is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    MainNormal,
    MainAction,
    MainDeleteConfirm,
    EditorNormal,
    History,
    Help,
    /// Any single-line prompt: search, command line, editor insert.
    LineEditing,
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    /// Active everywhere, checked first
    pub global: HashMap<KeyCombo, Command>,
    pub contexts: HashMap<KeyContext, HashMap<KeyCombo, Command>>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingConfig {
    pub fn new() -> Self {
        let mut config = Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        };

        config
            .global
            .insert(KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit);

        config.setup_main_bindings();
        config.setup_editor_bindings();
        config.setup_history_bindings();
        config.setup_line_editing_bindings();

        config
    }

    fn bind(&mut self, context: KeyContext, combo: KeyCombo, command: Command) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(combo, command);
    }

    fn setup_main_bindings(&mut self) {
        use KeyContext::*;

        for c in ['j', 'n'] {
            self.bind(MainNormal, KeyCombo::char(c), Command::SelectNext);
        }
        for c in ['k', 'N'] {
            self.bind(MainNormal, KeyCombo::char(c), Command::SelectPrev);
        }
        self.bind(MainNormal, KeyCombo::char('G'), Command::SelectLast);
        self.bind(
            MainNormal,
            KeyCombo::char('{'),
            Command::ScrollUp(ScrollTarget::RequestBody),
        );
        self.bind(
            MainNormal,
            KeyCombo::char('}'),
            Command::ScrollDown(ScrollTarget::RequestBody),
        );
        self.bind(
            MainNormal,
            KeyCombo::char('['),
            Command::ScrollUp(ScrollTarget::ResponseBody),
        );
        self.bind(
            MainNormal,
            KeyCombo::char(']'),
            Command::ScrollDown(ScrollTarget::ResponseBody),
        );
        self.bind(MainNormal, KeyCombo::char('H'), Command::NudgeSplit(Nudge::Shrink));
        self.bind(MainNormal, KeyCombo::char('L'), Command::NudgeSplit(Nudge::Grow));
        self.bind(MainNormal, KeyCombo::char('K'), Command::NudgeResponse(Nudge::Shrink));
        self.bind(MainNormal, KeyCombo::char('J'), Command::NudgeResponse(Nudge::Grow));
        self.bind(MainNormal, KeyCombo::char('d'), Command::ConfirmDeleteSelected);
        self.bind(MainNormal, KeyCombo::char('E'), Command::EditSelected);
        self.bind(MainNormal, KeyCombo::char('/'), Command::OpenSearch);
        self.bind(MainNormal, KeyCombo::char('?'), Command::OpenReverseSearch);
        self.bind(MainNormal, KeyCombo::char(':'), Command::OpenCommandLine);
        self.bind(MainNormal, KeyCombo::plain(KeyCode::Enter), Command::OpenActions);
        self.bind(MainNormal, KeyCombo::plain(KeyCode::Esc), Command::ClearFilter);

        self.bind(MainAction, KeyCombo::char('y'), Command::SendSelected);
        self.bind(MainAction, KeyCombo::char('e'), Command::EditSelectedBody);
        self.bind(MainAction, KeyCombo::char('a'), Command::EditSelectedAuth);
        self.bind(MainAction, KeyCombo::char('n'), Command::Cancel);
        self.bind(MainAction, KeyCombo::plain(KeyCode::Esc), Command::Cancel);

        self.bind(MainDeleteConfirm, KeyCombo::char('y'), Command::Confirm);
        self.bind(MainDeleteConfirm, KeyCombo::char('n'), Command::Cancel);
        self.bind(MainDeleteConfirm, KeyCombo::plain(KeyCode::Esc), Command::Cancel);
    }

    fn setup_editor_bindings(&mut self) {
        use KeyContext::EditorNormal;

        self.bind(EditorNormal, KeyCombo::char('j'), Command::NextField);
        self.bind(EditorNormal, KeyCombo::char('k'), Command::PrevField);
        self.bind(EditorNormal, KeyCombo::char('h'), Command::CycleMethodBack);
        self.bind(EditorNormal, KeyCombo::char('l'), Command::CycleMethodForward);
        self.bind(EditorNormal, KeyCombo::char('i'), Command::StartInsert);
        self.bind(EditorNormal, KeyCombo::plain(KeyCode::Enter), Command::StartInsert);
        self.bind(EditorNormal, KeyCombo::char('e'), Command::EditDraftBody);
        self.bind(EditorNormal, KeyCombo::char(':'), Command::OpenCommandLine);
        self.bind(EditorNormal, KeyCombo::ctrl(KeyCode::Char('s')), Command::SaveDraft);
        self.bind(
            EditorNormal,
            KeyCombo::char('{'),
            Command::ScrollUp(ScrollTarget::DraftBody),
        );
        self.bind(
            EditorNormal,
            KeyCombo::char('}'),
            Command::ScrollDown(ScrollTarget::DraftBody),
        );
        self.bind(EditorNormal, KeyCombo::plain(KeyCode::Esc), Command::Cancel);
    }

    fn setup_history_bindings(&mut self) {
        use KeyContext::{Help, History};

        self.bind(History, KeyCombo::char('j'), Command::SelectNext);
        self.bind(History, KeyCombo::char('k'), Command::SelectPrev);
        self.bind(History, KeyCombo::char('r'), Command::ReplaySelected);
        self.bind(History, KeyCombo::char('H'), Command::NudgeSplit(Nudge::Shrink));
        self.bind(History, KeyCombo::char('L'), Command::NudgeSplit(Nudge::Grow));
        self.bind(
            History,
            KeyCombo::char('{'),
            Command::ScrollUp(ScrollTarget::HistoryDetail),
        );
        self.bind(
            History,
            KeyCombo::char('}'),
            Command::ScrollDown(ScrollTarget::HistoryDetail),
        );
        self.bind(History, KeyCombo::plain(KeyCode::Esc), Command::Cancel);

        self.bind(Help, KeyCombo::plain(KeyCode::Esc), Command::Cancel);
    }

    fn setup_line_editing_bindings(&mut self) {
        use KeyContext::LineEditing;

        self.bind(LineEditing, KeyCombo::plain(KeyCode::Enter), Command::Submit);
        self.bind(LineEditing, KeyCombo::plain(KeyCode::Esc), Command::Cancel);
        self.bind(LineEditing, KeyCombo::plain(KeyCode::Backspace), Command::DeleteChar);
        self.bind(LineEditing, KeyCombo::alt(KeyCode::Backspace), Command::DeleteWord);
        self.bind(LineEditing, KeyCombo::ctrl(KeyCode::Char('w')), Command::DeleteWord);
        self.bind(LineEditing, KeyCombo::ctrl(KeyCode::Backspace), Command::DeleteWord);
    }

    /// Resolve a key event in a context. Global bindings win.
    pub fn resolve(&self, context: KeyContext, key: &KeyEvent) -> Option<Command> {
        let combo = KeyCombo::from_event(key);
        self.global
            .get(&combo)
            .or_else(|| self.contexts.get(&context).and_then(|m| m.get(&combo)))
            .copied()
    }
}
