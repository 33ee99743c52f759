//! Bottom status/command line for each screen.
//!
//! The line never writes into the terminal's last column. Prompt modes place
//! the hardware cursor after the typed text.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::text::truncate_to_width;
use super::theme::{error_style, section_style};
use super::widgets::Pane;
use crate::app::{App, EditorMode, MainMode, Status};

pub const ACTION_PROMPT: &str = "[esc/n] cancel   [y] send request   [e] edit body   [a] edit auth";

pub const EDITOR_HINT: &str =
    " | j/k field | i edit | h/l method | { } body | e body | :w save | :q cancel";

pub const HISTORY_HINT: &str =
    "HISTORY | j/k move | r replay | H/L resize | { } details | drag divider | Esc back";

pub const TOO_SMALL: &str = "Window too small";

/// Shown on the last row when no layout fits.
pub(super) fn render_too_small(frame: &mut Frame) {
    let area = frame.area();
    let Some(y) = area.height.checked_sub(1) else {
        return;
    };
    let mut pane = Pane::new(frame.buffer_mut(), Rect::new(0, y, area.width, 1));
    pane.text(0, 0, TOO_SMALL, Style::default());
}

fn usable(area: Rect) -> usize {
    usize::from(area.width.saturating_sub(1))
}

/// Draw `prefix` + `buffer` and park the cursor after it.
fn render_prompt(frame: &mut Frame, area: Rect, prefix: &str, buffer: &str) {
    let line = format!("{}{}", prefix, buffer);
    let shown = truncate_to_width(&line, usable(area));
    let mut pane = Pane::new(frame.buffer_mut(), area);
    pane.text(0, 0, shown, Style::default());

    let cursor = (line.width() as u16).min(area.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(area.x + cursor, area.y));
}

fn render_status_text(pane: &mut Pane<'_>, x: u16, status: &Status, max: usize) {
    let style = if status.is_error {
        error_style()
    } else {
        Style::default()
    };
    pane.text(0, x, truncate_to_width(&status.text, max), style);
}

/// Text of the delete confirmation prompt, with the name cut to fit.
pub fn delete_prompt(name: &str, width: u16) -> String {
    let prompt_width = usize::from(width.saturating_sub(1)).max(20);
    let name_width = prompt_width.saturating_sub(30).max(4);
    format!(
        "Delete '{}'? [y] yes  [n/Esc] cancel",
        truncate_to_width(name, name_width)
    )
}

pub(super) fn render_main(frame: &mut Frame, area: Rect, app: &App) {
    match &app.main_mode {
        MainMode::Search => render_prompt(frame, area, "/", app.prompt.as_str()),
        MainMode::ReverseSearch => render_prompt(frame, area, "?", app.prompt.as_str()),
        MainMode::Command => render_prompt(frame, area, ":", app.prompt.as_str()),
        MainMode::Action => {
            let mut pane = Pane::new(frame.buffer_mut(), area);
            pane.text(0, 0, truncate_to_width(ACTION_PROMPT, usable(area)), Style::default());
        }
        MainMode::DeleteConfirm { name, .. } => {
            let prompt = delete_prompt(name, area.width);
            let mut pane = Pane::new(frame.buffer_mut(), area);
            pane.text(0, 0, truncate_to_width(&prompt, usable(area)), Style::default());
        }
        MainMode::Normal => {
            let mut pane = Pane::new(frame.buffer_mut(), area);
            render_status_text(&mut pane, 0, &app.status, usable(area));
        }
    }
}

pub(super) fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = app.editor.as_ref() else {
        return;
    };

    if editor.mode == EditorMode::Command {
        render_prompt(frame, area, ":", editor.command.as_str());
        return;
    }

    let mode = match editor.mode {
        EditorMode::Insert => "INSERT",
        _ => "NORMAL",
    };
    let limit = area.width.saturating_sub(1);
    let mut pane = Pane::new(frame.buffer_mut(), area);
    let mut x = pane.text(0, 0, mode, section_style());
    if x >= limit {
        return;
    }

    if editor.mode == EditorMode::Insert {
        let prefix = format!(" | {}: ", editor.field.label());
        x = pane.text(0, x, &prefix, Style::default());
        if x < limit {
            let input = editor.input.as_str();
            pane.text(0, x, truncate_to_width(input, usize::from(limit - x)), Style::default());
            let cursor = (usize::from(x) + input.width()).min(usize::from(limit)) as u16;
            frame.set_cursor_position(Position::new(area.x + cursor, area.y));
        }
        return;
    }

    if !app.status.is_empty() {
        x = pane.text(0, x, " | ", Style::default());
        if x < limit {
            render_status_text(&mut pane, x, &app.status, usize::from(limit - x));
        }
        return;
    }

    pane.text(
        0,
        x,
        truncate_to_width(EDITOR_HINT, usize::from(limit - x)),
        Style::default(),
    );
}

pub(super) fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let mut pane = Pane::new(frame.buffer_mut(), area);
    if app.status.is_error {
        let x = pane.text(0, 0, "HISTORY | ", Style::default());
        let room = usable(area).saturating_sub(usize::from(x));
        render_status_text(&mut pane, x, &app.status, room);
    } else {
        pane.text(0, 0, truncate_to_width(HISTORY_HINT, usable(area)), Style::default());
    }
}
