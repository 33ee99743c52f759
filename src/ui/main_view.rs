//! Main screen: request list, request preview and last response.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use super::layout::{main_layout, MainLayout};
use super::status_bar;
use super::text::fit_to_width;
use super::theme::{error_style, label_style, method_style, reversed, status_code_style};
use super::widgets::{vertical_divider, Pane, CROSS, RULE};
use crate::app::{App, DragMode};

/// Column width of the name field in the list
const NAME_COLUMN: usize = 28;
const METHOD_COLUMN: usize = 6;

/// Longest URL block in the preview pane
const MAX_URL_LINES: usize = 5;

pub(super) fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let Some(layout) = main_layout(area.width, area.height, app.ratios) else {
        status_bar::render_too_small(frame);
        return;
    };

    let buf = frame.buffer_mut();
    render_request_list(buf, &layout, app);

    match layout.top.right {
        Some(right) => render_request_preview(buf, right, app),
        None => {
            let mut left = Pane::new(buf, layout.top.left);
            left.text(1, 1, "Preview hidden (window too narrow)", Style::default());
            left.text(2, 1, "Widen terminal to restore split-pane view.", Style::default());
        }
    }

    if let Some(sep_x) = layout.top.separator_x {
        let style = divider_style(app.drag == DragMode::Vertical);
        vertical_divider(buf, sep_x, layout.top_rows(), style);
    }

    if let Some(response) = layout.response {
        render_response(buf, response, app);
    }

    if let Some(sep_y) = layout.horizontal_sep_y {
        let style = divider_style(app.drag == DragMode::Horizontal);
        let mut row = Pane::new(buf, Rect::new(0, sep_y, layout.width, 1));
        row.text(0, 0, &RULE.repeat(usize::from(layout.width)), style);
        if let Some(sep_x) = layout.top.separator_x {
            row.text(0, sep_x, CROSS, style);
        }
    }

    status_bar::render_main(frame, layout.status, app);
}

fn divider_style(active: bool) -> Style {
    if active {
        reversed()
    } else {
        Style::default()
    }
}

fn render_request_list(buf: &mut Buffer, layout: &MainLayout, app: &mut App) {
    let area = layout.top.left;
    let mut pane = Pane::new(buf, area);

    let method_x = (area.width / 2).max(8);
    let url_x = method_x + 8;

    pane.text(0, 1, "Name", Style::default());
    pane.text(0, method_x, "Type", Style::default());
    pane.text(0, url_x, "URL", Style::default());

    let view_rows = usize::from(area.height.saturating_sub(1)).max(1);
    app.filter_index.scroll_into_view(view_rows);

    if app.filter_index.is_empty() {
        pane.text(1, 1, "(empty)", Style::default());
        pane.text(2, 1, "Use :new [METHOD] [URL]", Style::default());
        return;
    }

    let scroll = app.filter_index.list_scroll();
    let selected = app.filter_index.selected();
    let rows = app
        .filter_index
        .visible()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(view_rows);

    for (row, (visible_pos, &req_index)) in rows.enumerate() {
        let Some(request) = app.requests.get(req_index) else {
            continue;
        };
        let y = row as u16 + 1;
        let highlight = if visible_pos == selected {
            pane.fill_row(y, reversed());
            reversed()
        } else {
            Style::default()
        };

        pane.text(y, 1, &fit_to_width(&request.name, NAME_COLUMN), highlight);
        pane.text(
            y,
            method_x,
            &fit_to_width(&request.method, METHOD_COLUMN),
            highlight.patch(method_style(&request.method)),
        );

        let url_space = i32::from(area.width) - (i32::from(url_x) + 1);
        if url_space > 0 {
            pane.text(y, url_x, &fit_to_width(&request.url, url_space as usize), highlight);
        }
    }
}

fn render_request_preview(buf: &mut Buffer, area: Rect, app: &mut App) {
    let mut pane = Pane::new(buf, area);
    pane.header("Request");

    let height = usize::from(area.height);
    let width = usize::from(area.width);

    let Some(request) = app.filter_index.selected_request(&app.requests) else {
        app.request_body_scroll = 0;
        pane.wrapped(
            2,
            0,
            height.saturating_sub(2),
            width,
            "No requests. Use :new to create one.",
            Style::default(),
        );
        return;
    };

    let mut row = 2usize;
    let name = if request.name.is_empty() {
        "(unnamed)"
    } else {
        request.name.as_str()
    };
    pane.labeled(row as u16, 0, "name: ", name);
    row += 1;
    pane.labeled_method(row as u16, 0, "method: ", &request.method);
    row += 1;

    let has_auth = !request.auth_type.is_empty();
    let has_header = request.has_header();
    let mut reserve = 2usize;
    if has_auth || has_header {
        reserve += 1 + usize::from(has_auth) + usize::from(has_header);
    }

    row += draw_url(&mut pane, row, height, reserve, &request.url);

    if (has_auth || has_header) && row < height {
        pane.section_title(row as u16, 0, "Config");
        row += 1;
    }
    if has_auth && row < height {
        pane.labeled(row as u16, 0, "auth: ", &request.auth_type);
        row += 1;
    }
    if has_header && row < height {
        let header = format!("{}: {}", request.header_key, request.header_value);
        pane.labeled(row as u16, 0, "header: ", &header);
        row += 1;
    }

    if row < height {
        pane.section_title(row as u16, 0, "Body");
        row += 1;
    }
    if row < height {
        pane.body_preview(
            row as u16,
            (height - row) as u16,
            &request.body,
            &mut app.request_body_scroll,
        );
    }
}

/// Labeled, wrapped URL block. Returns the rows used (at least one).
pub(super) fn draw_url(pane: &mut Pane<'_>, row: usize, height: usize, reserve: usize, url: &str) -> usize {
    const LABEL_WIDTH: u16 = 5;
    if row >= height {
        return 1;
    }
    pane.labeled(row as u16, 0, "url: ", "");
    let url_width = usize::from(pane.width().saturating_sub(LABEL_WIDTH)).max(1);
    let max_lines = height
        .saturating_sub(row + reserve)
        .clamp(1, MAX_URL_LINES);
    pane.wrapped(row as u16, LABEL_WIDTH, max_lines, url_width, url, Style::default())
        .max(1)
}

fn render_response(buf: &mut Buffer, area: Rect, app: &mut App) {
    let mut pane = Pane::new(buf, area);
    pane.header("Response");

    let Some(response) = app.last_response.as_ref() else {
        app.response_body_scroll = 0;
        pane.text(2, 0, "No response yet.", Style::default());
        pane.text(3, 0, "Select a request, press Enter, then y.", Style::default());
        return;
    };

    let height = usize::from(area.height);
    let width = usize::from(area.width);
    let mut row = 2usize;

    let x = pane.text(row as u16, 0, "status: ", label_style());
    let x = pane.text(
        row as u16,
        x,
        &response.status_code.to_string(),
        status_code_style(response.status_code),
    );
    pane.text(
        row as u16,
        x,
        &format!("  duration={}ms", response.duration_ms),
        Style::default(),
    );
    row += 1;

    pane.labeled(row as u16, 0, "at: ", &response.at);
    row += 1;

    const REQUEST_LABEL_WIDTH: u16 = 9;
    let request_line = format!("{} {}", response.method, response.url);
    pane.labeled(row as u16, 0, "request: ", "");
    let request_width = width.saturating_sub(usize::from(REQUEST_LABEL_WIDTH)).max(1);
    let request_lines_max = if !response.error.is_empty() || height.saturating_sub(row) < 5 {
        1
    } else {
        2
    };
    row += pane
        .wrapped(
            row as u16,
            REQUEST_LABEL_WIDTH,
            request_lines_max,
            request_width,
            &request_line,
            Style::default(),
        )
        .max(1);

    if !response.request_name.is_empty() && row < height {
        pane.labeled(row as u16, 0, "name: ", &response.request_name);
        row += 1;
    }

    if !response.error.is_empty() && row < height {
        const ERROR_LABEL_WIDTH: u16 = 7;
        pane.text(row as u16, 0, "error: ", label_style());
        let error_width = width.saturating_sub(usize::from(ERROR_LABEL_WIDTH)).max(1);
        row += pane
            .wrapped(
                row as u16,
                ERROR_LABEL_WIDTH,
                2,
                error_width,
                &response.error,
                error_style(),
            )
            .max(1);
    }

    if row < height {
        pane.section_title(row as u16, 0, "Body");
        row += 1;
    }
    if row < height {
        pane.body_preview(
            row as u16,
            (height - row) as u16,
            &response.body,
            &mut app.response_body_scroll,
        );
    }
}
