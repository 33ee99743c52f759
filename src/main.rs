use tuiman::app::App;
use tuiman::cli::{parse_args, run_cli_command};
use tuiman::error::ErrorCategory;
use tuiman::startup::{init_logging, preflight, AppConfig};
use tuiman::terminal::{setup_panic_hook, TerminalManager};
use tuiman::ui;

use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use tracing::{info, warn};

fn main() -> Result<()> {
    // CLI flags are handled before any initialization
    if run_cli_command(parse_args(std::env::args())) {
        return Ok(());
    }

    color_eyre::install()?;

    // =========================================================
    // Preflight - fatal errors exit before the TUI starts
    // =========================================================

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => fatal(&format!("failed to load configuration: {}", e), e.category()),
    };

    let paths = match preflight::prepare_paths(&config) {
        Ok(paths) => paths,
        Err(e) => fatal(&e.to_string(), e.category()),
    };

    if !init_logging(&paths.log_file, &config.log_filter) {
        eprintln!("warning: logging disabled, could not open {}", paths.log_file.display());
    }
    info!("tuiman {} starting", env!("CARGO_PKG_VERSION"));

    let services = match preflight::build_services(&config, &paths) {
        Ok(services) => services,
        Err(e) => fatal(&e.to_string(), e.category()),
    };

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(services);

    let mut term_manager = TerminalManager::new()?;
    let result = runtime.block_on(run_app(term_manager.terminal(), &mut app));
    term_manager.restore()?;

    info!("tuiman exiting");
    result
}

fn fatal(message: &str, category: ErrorCategory) -> ! {
    eprintln!("{}: {}", category.description(), message);
    eprintln!("hint: {}", category.recovery_hint());
    std::process::exit(1)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    while app.running {
        if app.dirty {
            terminal.draw(|f| ui::render(f, &mut *app))?;
        }

        let Some(event) = event_stream.next().await else {
            warn!("Terminal event stream ended");
            break;
        };
        app.handle_event(event?).await;

        // The editor needs the terminal to itself: stop reading input while
        // it runs, then repaint everything it may have scribbled over.
        if app.pending_edit.is_some() {
            drop(event_stream);
            app.run_pending_edit();
            event_stream = EventStream::new();
            terminal.clear()?;
        }
    }

    Ok(())
}
