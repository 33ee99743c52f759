//! Command-line interface for tuiman.
//!
//! Flags are handled before the terminal is touched:
//!
//! ```ignore
//! use tuiman::cli::{parse_args, run_cli_command};
//!
//! if run_cli_command(parse_args(std::env::args())) {
//!     std::process::exit(0);
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{handle_version_command, version_string, VERSION};

/// Run a CLI command if applicable.
///
/// Returns `true` when the command was handled and the process should exit
/// without starting the TUI.
pub fn run_cli_command(command: CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            handle_version_command();
            true
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            true
        }
        CliCommand::RunTui => false,
    }
}
