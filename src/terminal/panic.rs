//! Panic hook that restores the terminal before the panic message prints.

use super::setup::emergency_restore;
use std::panic;

/// Install a panic hook that restores the terminal.
///
/// Call early in `main`, before creating the `TerminalManager`. The hook
/// chains to the previously installed one (color-eyre's, in practice).
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
