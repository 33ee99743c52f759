//! Keyboard input handling.
//!
//! ```text
//! KeyEvent -> ChordState (main normal mode only)
//!          -> KeybindingConfig::resolve(context) -> Command -> screen handler
//!          -> printable char fallback -> LineBuffer (prompts, insert mode)
//! ```
//!
//! - [`command`] - The [`Command`] enum with all user actions
//! - [`keybindings`] - Default bindings per [`KeyContext`]
//! - [`chord`] - `gg`/`ZZ`/`ZQ` two-key chords
//! - [`line`] - Single-line prompt buffer

pub mod chord;
pub mod command;
pub mod keybindings;
pub mod line;

pub use chord::{ChordState, ChordStep};
pub use command::{Command, Nudge, ScrollTarget};
pub use keybindings::{KeyCombo, KeyContext, KeybindingConfig};
pub use line::LineBuffer;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Printable character carried by a key event, ignoring Ctrl/Alt combos.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if !c.is_control() => Some(c),
        _ => None,
    }
}
