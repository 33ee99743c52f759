//! History screen: run list on the left, run detail on the right.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use super::layout::history_layout;
use super::status_bar;
use super::text::fit_to_width;
use super::theme::{label_style, method_style, reversed, status_code_style};
use super::widgets::{vertical_divider, Pane};
use crate::app::{App, DragMode};

const HEADER_ROW: u16 = 2;

/// Column positions of the run list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    method: u16,
    status: u16,
    duration: u16,
    name: u16,
}

impl Columns {
    fn for_width(width: u16) -> Self {
        let at = |method: u16| Columns {
            method,
            status: method + 8,
            duration: method + 16,
            name: method + 23,
        };
        let mut columns = at(22);
        if i32::from(columns.method) >= i32::from(width) - 8 {
            columns = at(width / 2);
        }
        if i32::from(columns.name) >= i32::from(width) - 4 {
            columns.name = width.saturating_sub(4);
        }
        columns
    }
}

pub(super) fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let Some(layout) = history_layout(area.width, area.height, app.ratios) else {
        status_bar::render_too_small(frame);
        return;
    };

    let buf = frame.buffer_mut();
    render_run_list(buf, layout.columns.left, app);

    match layout.columns.right {
        Some(right) => render_run_detail(buf, right, app),
        None => {
            if layout.content_rows > 2 {
                let mut left = Pane::new(buf, layout.columns.left);
                left.text(
                    layout.content_rows - 2,
                    1,
                    "Run detail hidden (window too narrow)",
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

    status_bar::render_history(frame, layout.status, app);
}

fn render_run_list(buf: &mut Buffer, area: Rect, app: &mut App) {
    let mut pane = Pane::new(buf, area);
    pane.header("History");

    let columns = Columns::for_width(area.width);
    for (x, title) in [
        (1, "When"),
        (columns.method, "Method"),
        (columns.status, "Status"),
        (columns.duration, "ms"),
        (columns.name, "Name"),
    ] {
        pane.text(HEADER_ROW, x, title, label_style());
    }

    let rows = usize::from(area.height.saturating_sub(HEADER_ROW + 1)).max(1);
    app.scroll_history_into_view(rows);

    if app.runs.is_empty() {
        app.history_detail_scroll = 0;
        pane.text(3, 1, "No history yet", Style::default());
        pane.text(4, 1, "Send requests from main to populate history", Style::default());
        return;
    }

    let name_width = i32::from(area.width) - i32::from(columns.name) - 1;
    for (i, run) in app
        .runs
        .iter()
        .enumerate()
        .skip(app.history_scroll)
        .take(rows)
    {
        let y = (i - app.history_scroll) as u16 + HEADER_ROW + 1;
        let highlight = if i == app.history_selected {
            pane.fill_row(y, reversed());
            reversed()
        } else {
            Style::default()
        };

        pane.text(y, 1, &fit_to_width(&run.created_at, 19), highlight);
        pane.text(
            y,
            columns.method,
            &fit_to_width(&run.method, 7),
            highlight.patch(method_style(&run.method)),
        );
        pane.text(
            y,
            columns.status,
            &format!("{:<7}", run.status_code),
            highlight.patch(status_code_style(run.status_code)),
        );
        pane.text(
            y,
            columns.duration,
            &format!("{:<5}", run.duration_ms),
            highlight,
        );
        if name_width > 0 {
            pane.text(
                y,
                columns.name,
                &fit_to_width(&run.request_name, name_width as usize),
                highlight,
            );
        }
    }
}

fn render_run_detail(buf: &mut Buffer, area: Rect, app: &mut App) {
    let mut pane = Pane::new(buf, area);
    pane.header("Run Detail");

    let Some(run) = app.runs.get(app.history_selected) else {
        pane.text(2, 0, "No history yet.", Style::default());
        return;
    };

    let height = area.height;
    let mut row = 2u16;

    let name = if run.request_name.is_empty() {
        "(unnamed)"
    } else {
        run.request_name.as_str()
    };
    pane.labeled(row, 0, "name: ", name);
    row += 1;
    pane.labeled_method(row, 0, "method: ", &run.method);
    row += 1;

    let x = pane.text(row, 0, "status: ", label_style());
    let x = pane.text(
        row,
        x,
        &run.status_code.to_string(),
        status_code_style(run.status_code),
    );
    pane.text(row, x, &format!("  duration={}ms", run.duration_ms), Style::default());
    row += 1;

    pane.labeled(row, 0, "at: ", &run.created_at);
    row += 1;
    pane.labeled(row, 0, "id: ", &run.request_id);
    row += 1;

    if row < height {
        pane.rule(row);
        row += 1;
    }
    if row < height {
        pane.section_title(row, 0, "Request + Response");
        row += 1;
    }
    if row < height {
        let detail = run.detail_text();
        pane.body_preview(row, height - row, &detail, &mut app.history_detail_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_wide_pane() {
        let c = Columns::for_width(80);
        assert_eq!((c.method, c.status, c.duration, c.name), (22, 30, 38, 45));
    }

    #[test]
    fn test_columns_narrow_pane() {
        // 22 >= 28 - 8, so columns start at half width
        let c = Columns::for_width(28);
        assert_eq!(c.method, 14);
        assert_eq!(c.status, 22);
        // name would be 37, capped at width - 4
        assert_eq!(c.name, 24);
    }
}
