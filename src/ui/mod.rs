//! Terminal rendering.
//!
//! Each screen has its own renderer module. All of them draw straight into
//! the frame buffer through [`widgets::Pane`], using geometry from
//! [`layout`] and line wrapping from [`text`]:
//!
//! - `main_view` - Request list, request preview, last response
//! - `editor_view` - Draft fields and live preview
//! - `history_view` - Run list and run detail
//! - `help_view` - Static reference page
//! - `status_bar` - Bottom line of every screen
//!
//! Renderers take `&mut App` because clamping a scroll offset to the
//! visible content writes the clamped value back.

mod editor_view;
mod help_view;
mod history_view;
pub mod layout;
mod main_view;
pub mod status_bar;
pub mod text;
pub mod theme;
pub mod widgets;

pub use help_view::{HELP_FOOTER, HELP_LINES, HELP_TITLE};

use ratatui::Frame;

use crate::app::{App, Screen};

/// Render the UI for the current screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.width = area.width;
    app.height = area.height;

    match app.screen {
        Screen::Main => main_view::render(frame, app),
        Screen::Editor if app.editor.is_some() => editor_view::render(frame, app),
        Screen::Editor => main_view::render(frame, app),
        Screen::History => history_view::render(frame, app),
        Screen::Help => help_view::render(frame),
    }
    app.dirty = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySecretStore, MockEditor, MockTransport};
    use crate::app::Services;
    use crate::models::Request;
    use crate::storage::{HistoryLog, RequestStore};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_app(dir: &TempDir) -> App {
        let services = Services {
            requests: RequestStore::new(dir.path().join("requests")),
            history: HistoryLog::open_in_memory().unwrap(),
            transport: Arc::new(MockTransport::new()),
            secrets: Arc::new(InMemorySecretStore::new()),
            editor: Box::new(MockEditor::new()),
            history_limit: 500,
        };
        App::new(services)
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_render_empty_main_screen() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);
        let rows = draw(&mut app, 100, 30);

        assert!(rows[0].contains("Name"));
        assert!(rows[1].contains("(empty)"));
        assert!(rows[2].contains("Use :new [METHOD] [URL]"));
        assert!(rows.iter().any(|r| r.contains("No requests. Use :new to create one.")));
        assert!(rows.iter().any(|r| r.contains("No response yet.")));
        assert!(rows[29].starts_with("j/k move | / search"));
        assert!(!app.dirty);
        assert_eq!((app.width, app.height), (100, 30));
    }

    #[test]
    fn test_render_too_small() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);
        let rows = draw(&mut app, 20, 10);
        assert!(rows[9].starts_with("Window too small"));
    }

    #[test]
    fn test_render_help() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);
        app.screen = Screen::Help;
        let rows = draw(&mut app, 100, 12);
        assert!(rows[1].contains("tuiman help"));
        assert!(rows[4].contains("Actions: y send, e edit body, a edit auth"));
        assert!(rows[11].starts_with("Press Esc to return"));
    }

    #[test]
    fn test_render_editor_for_new_draft() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);
        app.execute_main_command("new post http://localhost/items");
        assert_eq!(app.screen, Screen::Editor);

        let rows = draw(&mut app, 100, 30);
        assert!(rows[0].starts_with("New Request"));
        assert!(rows[3].contains("Method: "));
        assert!(rows[3].contains("POST"));
        assert!(rows.iter().any(|r| r.contains("Preview")));
        assert!(rows.iter().any(|r| r.contains("url: http://localhost/items")));
        assert!(rows[29].starts_with("NORMAL | j/k field"));
    }

    #[test]
    fn test_selected_request_shown_in_preview() {
        let dir = TempDir::new().unwrap();
        let mut app = create_test_app(&dir);
        let mut req = Request::new();
        req.name = "List users".into();
        req.method = "GET".into();
        req.url = "https://api.example.com/users".into();
        req.body = "{\n  \"page\": 1\n}".into();
        app.services.requests.save(&mut req).unwrap();
        app.load_requests(None);

        let rows = draw(&mut app, 120, 30);
        assert!(rows[1].contains("List users"));
        assert!(rows.iter().any(|r| r.contains("name: List users")));
        assert!(rows.iter().any(|r| r.contains("\"page\": 1")));
    }
}
