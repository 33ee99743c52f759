//! Terminal setup and teardown functions.
//!
//! Used by `TerminalManager`, by the external editor (which hands the
//! terminal to a child process and takes it back), and by the panic hook.

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

use super::enhancements::{pop_keyboard_enhancements, push_keyboard_enhancements};

/// Enter TUI mode.
///
/// - Enters the alternate screen (preserves original terminal content)
/// - Enables bracketed paste so pasted text arrives as one event
/// - Enables mouse capture for divider dragging
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(
        writer,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )
}

/// Leave TUI mode and restore the terminal to normal state.
///
/// Safe to call multiple times; errors are ignored.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();

    let _ = execute!(
        writer,
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    );

    // Kitty-protocol terminals need the flags zeroed after leaving the
    // alternate screen (CSI = 0 u is a non-stack reset).
    let _ = write!(writer, "\x1b[=0u");
    let _ = writer.flush();

    let _ = execute!(writer, Show);
}

/// Hand the terminal over to a child process.
///
/// Leaves raw mode and the alternate screen so a full-screen program such
/// as `vi` starts from a clean cooked-mode terminal.
pub fn suspend_tui<W: Write>(writer: &mut W) {
    pop_keyboard_enhancements(writer);
    leave_tui_mode(writer);
}

/// Take the terminal back after [`suspend_tui`].
pub fn resume_tui<W: Write>(writer: &mut W) -> io::Result<()> {
    enable_raw_mode()?;
    enter_tui_mode(writer)?;
    push_keyboard_enhancements(writer);
    Ok(())
}

/// Restore terminal to a usable state after a panic or error.
pub fn emergency_restore() {
    let mut stdout = io::stdout();
    pop_keyboard_enhancements(&mut stdout);
    leave_tui_mode(&mut stdout);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_tui_mode_does_not_panic() {
        let mut buffer = Vec::new();
        leave_tui_mode(&mut buffer);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_enter_tui_mode_writes_sequences() {
        let mut buffer = Vec::new();
        enter_tui_mode(&mut buffer).unwrap();
        // Alternate screen: CSI ? 1049 h
        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("1049h"));
    }

    #[test]
    fn test_suspend_does_not_panic() {
        let mut buffer = Vec::new();
        suspend_tui(&mut buffer);
        assert!(String::from_utf8_lossy(&buffer).contains("1049l"));
    }
}
