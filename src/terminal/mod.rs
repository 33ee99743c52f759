//! Terminal management with an RAII guard for automatic cleanup.
//!
//! `TerminalManager` puts the terminal into raw/alternate-screen mode and
//! restores it when dropped, whether the app exits normally or unwinds.
//!
//! # Example
//!
//! ```no_run
//! use tuiman::terminal::TerminalManager;
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut term_manager = TerminalManager::new()?;
//!     let terminal = term_manager.terminal();
//!     // ... draw frames ...
//!     Ok(())
//! }
//! ```

mod enhancements;
mod panic;
mod setup;

pub use enhancements::{pop_keyboard_enhancements, push_keyboard_enhancements};
pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode, resume_tui, suspend_tui};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// RAII guard that restores terminal state on drop.
pub struct TerminalGuard {
    cleaned_up: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { cleaned_up: false }
    }

    /// Restore the terminal now. Subsequent calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;

        let mut stdout = io::stdout();
        pop_keyboard_enhancements(&mut stdout);
        leave_tui_mode(&mut stdout);
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Owns the ratatui terminal and restores the real terminal when dropped.
///
/// The panic hook from [`setup_panic_hook`] covers the paths where `Drop`
/// would not run.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen with mouse capture and
    /// keyboard enhancements, then clear.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;
        push_keyboard_enhancements(&mut stdout);

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            _guard: TerminalGuard::new(),
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal before dropping the manager.
    pub fn restore(&mut self) -> Result<()> {
        self._guard.cleanup();
        self.terminal.show_cursor()?;
        Ok(())
    }
}
