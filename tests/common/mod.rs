//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let mut t = TestAppBuilder::new()
//!     .with_request(sample_request("List users", "GET", "http://localhost/users"))
//!     .build();
//! press(&mut t.app, key('j')).await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, Terminal};
use tempfile::TempDir;

use tuiman::app::{App, Services};
use tuiman::models::Request;
use tuiman::storage::{HistoryLog, RequestStore};
use tuiman::ui;

/// An [`App`] wired to mocks, plus handles to inspect them.
pub struct TestApp {
    pub app: App,
    pub transport: MockTransport,
    pub editor: MockEditor,
    pub secrets: InMemorySecretStore,
    /// Keeps the request directory alive for the test's lifetime.
    pub dir: TempDir,
}

/// Builder for [`TestApp`].
pub struct TestAppBuilder {
    requests: Vec<Request>,
    transport: MockTransport,
    editor: MockEditor,
    secrets: InMemorySecretStore,
    history_limit: usize,
    size: (u16, u16),
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            transport: MockTransport::new(),
            editor: MockEditor::new(),
            secrets: InMemorySecretStore::new(),
            history_limit: 500,
            size: (100, 30),
        }
    }

    /// Save `request` to the store before the app loads it.
    pub fn with_request(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }

    pub fn with_transport(mut self, transport: MockTransport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }

    pub fn build(self) -> TestApp {
        let dir = TempDir::new().expect("create temp dir");
        let store = RequestStore::new(dir.path().join("requests"));
        for mut request in self.requests {
            store.save(&mut request).expect("seed request");
        }

        let services = Services {
            requests: store,
            history: HistoryLog::open_in_memory().expect("open history"),
            transport: Arc::new(self.transport.clone()),
            secrets: Arc::new(self.secrets.clone()),
            editor: Box::new(self.editor.clone()),
            history_limit: self.history_limit,
        };
        let mut app = App::new(services);
        app.resize(self.size.0, self.size.1);

        TestApp {
            app,
            transport: self.transport,
            editor: self.editor,
            secrets: self.secrets,
            dir,
        }
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A request with the given name, method and URL.
pub fn sample_request(name: &str, method: &str, url: &str) -> Request {
    Request {
        name: name.to_string(),
        method: method.to_string(),
        url: url.to_string(),
        ..Request::new()
    }
}

// ============================================================================
// Events
// ============================================================================

pub fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

pub fn esc() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
}

pub fn enter() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

pub fn backspace() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE))
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

pub fn left_down(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

pub fn left_drag(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

pub fn left_up(column: u16, row: u16) -> Event {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

pub async fn press(app: &mut App, event: Event) {
    app.handle_event(event).await;
}

/// Type each character of `text` as a separate key press.
pub async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_event(key(c)).await;
    }
}

/// Open the `:` prompt, type `line` and submit it.
pub async fn run_command(app: &mut App, line: &str) {
    press(app, key(':')).await;
    type_text(app, line).await;
    press(app, enter()).await;
}

// ============================================================================
// Rendering
// ============================================================================

/// Render one frame at the app's current size and return its rows.
pub fn render_rows(app: &mut App) -> Vec<String> {
    let (width, height) = (app.width, app.height);
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal.draw(|f| ui::render(f, app)).expect("draw");

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

pub fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}
