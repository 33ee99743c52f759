//! Editor screen: field list on the left, live preview on the right.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use super::layout::editor_layout;
use super::main_view::draw_url;
use super::status_bar;
use super::theme::{label_style, method_style, reversed};
use super::widgets::{vertical_divider, Pane};
use crate::app::{App, DraftField, DragMode, EditorState};
use crate::models::Request;

/// Column where the Method value is drawn
const METHOD_VALUE_X: u16 = 16;

pub(super) fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let Some(layout) = editor_layout(area.width, area.height, app.ratios) else {
        status_bar::render_too_small(frame);
        return;
    };
    let Some(editor) = app.editor.as_mut() else {
        return;
    };

    let buf = frame.buffer_mut();
    render_fields(buf, layout.columns.left, editor);

    match layout.columns.right {
        Some(right) => render_preview(buf, right, &editor.draft, &mut editor.body_scroll),
        None => {
            editor.body_scroll = 0;
            if layout.content_rows > 2 {
                let mut left = Pane::new(buf, layout.columns.left);
                left.text(
                    layout.content_rows - 2,
                    1,
                    "Preview hidden (window too narrow)",
                    Style::default(),
                );
            }
        }
    }

    if let Some(sep_x) = layout.columns.separator_x {
        let style = if app.drag == DragMode::Vertical {
            reversed()
        } else {
            Style::default()
        };
        vertical_divider(buf, sep_x, layout.content_rows, style);
    }

    status_bar::render_editor(frame, layout.status, app);
}

fn render_fields(buf: &mut Buffer, area: Rect, editor: &EditorState) {
    let mut pane = Pane::new(buf, area);
    pane.header(if editor.existing {
        "Edit Request"
    } else {
        "New Request"
    });

    let height = area.height;
    let mut row = 2u16;
    for field in DraftField::ALL {
        if row >= height {
            break;
        }
        let highlight = if field == editor.field {
            pane.fill_row(row, reversed());
            reversed()
        } else {
            Style::default()
        };

        let label = format!("{}: ", field.label());
        let after = pane.text(row, 1, &label, label_style().patch(highlight));
        let value = field.value(&editor.draft);
        if field == DraftField::Method {
            pane.text(
                row,
                METHOD_VALUE_X.max(after),
                value,
                highlight.patch(method_style(value)),
            );
        } else {
            pane.text(row, after, value, highlight);
        }
        row += 1;
    }

    if row < height {
        pane.section_title(row, 1, "Notes");
        row += 1;
    }
    if row < height {
        let bytes = format!("Body bytes: {}", editor.draft.body.len());
        pane.text(row, 1, &bytes, Style::default());
        row += 1;
    }
    pane.text(row, 1, "Method field uses h/l cycle only", Style::default());
}

fn render_preview(buf: &mut Buffer, area: Rect, draft: &Request, body_scroll: &mut usize) {
    let mut pane = Pane::new(buf, area);
    pane.header("Preview");

    let height = usize::from(area.height);
    let mut row = 2usize;

    let name = if draft.name.is_empty() {
        "(unnamed)"
    } else {
        draft.name.as_str()
    };
    pane.labeled(row as u16, 0, "name: ", name);
    row += 1;
    pane.labeled_method(row as u16, 0, "method: ", &draft.method);
    row += 1;

    let config = config_lines(draft);
    let mut reserve = 2usize;
    if !config.is_empty() {
        reserve += 1 + config.len();
    }

    row += draw_url(&mut pane, row, height, reserve, &draft.url);

    if !config.is_empty() && row < height {
        pane.section_title(row as u16, 0, "Config");
        row += 1;
    }
    for (label, value) in &config {
        if row >= height {
            break;
        }
        pane.labeled(row as u16, 0, label, value);
        row += 1;
    }

    if row < height {
        pane.section_title(row as u16, 0, "Body");
        row += 1;
    }
    if row < height {
        pane.body_preview(row as u16, (height - row) as u16, &draft.body, body_scroll);
    }
}

/// Labeled config rows for the preview, in display order.
fn config_lines(draft: &Request) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();
    if !draft.auth_type.is_empty() && draft.auth_type != "none" {
        lines.push(("auth: ", draft.auth_type.clone()));
    }
    for (label, value) in [
        ("secret: ", &draft.auth_secret_ref),
        ("key: ", &draft.auth_key_name),
        ("location: ", &draft.auth_location),
        ("user: ", &draft.auth_username),
    ] {
        if !value.is_empty() {
            lines.push((label, value.clone()));
        }
    }
    if draft.has_header() {
        lines.push((
            "header: ",
            format!("{}: {}", draft.header_key, draft.header_value),
        ));
    }
    lines
}
