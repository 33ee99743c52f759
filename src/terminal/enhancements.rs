//! Keyboard enhancement support (Kitty protocol).
//!
//! Only `DISAMBIGUATE_ESCAPE_CODES` is requested: it lets Alt+Backspace
//! arrive as one key instead of Esc followed by Backspace. Terminals
//! without the protocol ignore the request.

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
};
use std::io::Write;

/// Push keyboard enhancement flags onto the terminal's stack.
///
/// Returns `false` if the escape sequence could not be written.
pub fn push_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(
        writer,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok()
}

/// Pop the flags pushed by [`push_keyboard_enhancements`].
pub fn pop_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(writer, PopKeyboardEnhancementFlags).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop_do_not_panic() {
        let mut buffer = Vec::new();
        assert!(push_keyboard_enhancements(&mut buffer));
        assert!(pop_keyboard_enhancements(&mut buffer));
        assert!(!buffer.is_empty());
    }
}
