//! Command-line argument parsing.

/// Printed for `--help`.
pub const USAGE: &str = "\
Usage: tuiman [--version | --help]

Terminal HTTP request composer. Run without arguments to open the UI.

Environment:
  TUIMAN_CONFIG_DIR         request collection and secrets file location
  TUIMAN_STATE_DIR          history database and log location
  TUIMAN_CACHE_DIR          cache location
  TUIMAN_SECRET_BACKEND     keyring | file
  TUIMAN_HTTP_TIMEOUT_SECS  request timeout (default 30)
  TUIMAN_HISTORY_LIMIT      runs shown in :history (default 500)
  TUIMAN_EDITOR             external editor command
  TUIMAN_LOG                log filter (default info)";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// Print `tuiman <version>`
    Version,
    /// Print usage
    Help,
    /// Run the TUI application (default)
    RunTui,
}

/// Parse command-line arguments. The first item is the program name.
///
/// # Examples
///
/// ```
/// use tuiman::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["tuiman".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            _ => {}
        }
    }
    CliCommand::RunTui
}
