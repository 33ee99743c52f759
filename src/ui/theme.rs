//! Color theme for the tuiman UI.
//!
//! Method and status colors follow the usual REST client conventions.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Text roles
// ============================================================================

/// `name: ` style labels in front of values
pub const COLOR_LABEL: Color = Color::Cyan;

/// Pane titles and horizontal rules
pub const COLOR_SECTION: Color = Color::Blue;

/// Status line text flagged as an error
pub const COLOR_ERROR: Color = Color::Red;

/// Scroll indicator under body previews
pub const COLOR_DIM: Color = Color::DarkGray;

// ============================================================================
// HTTP
// ============================================================================

pub const COLOR_GET: Color = Color::Green;
pub const COLOR_POST: Color = Color::Yellow;
pub const COLOR_PUT: Color = Color::Cyan;
pub const COLOR_PATCH: Color = Color::Magenta;
pub const COLOR_DELETE: Color = Color::Red;

pub const COLOR_STATUS_2XX: Color = Color::Green;
pub const COLOR_STATUS_3XX: Color = Color::Cyan;
pub const COLOR_STATUS_4XX: Color = Color::Yellow;
pub const COLOR_STATUS_5XX: Color = Color::Red;

/// Color for a method name. Unknown methods use the default foreground.
pub fn method_color(method: &str) -> Option<Color> {
    match method {
        "GET" => Some(COLOR_GET),
        "POST" => Some(COLOR_POST),
        "PUT" => Some(COLOR_PUT),
        "PATCH" => Some(COLOR_PATCH),
        "DELETE" => Some(COLOR_DELETE),
        _ => None,
    }
}

/// Color for a response status code. `0` (no response) is uncolored.
pub fn status_color(status_code: u16) -> Option<Color> {
    match status_code {
        200..=299 => Some(COLOR_STATUS_2XX),
        300..=399 => Some(COLOR_STATUS_3XX),
        400..=499 => Some(COLOR_STATUS_4XX),
        500.. => Some(COLOR_STATUS_5XX),
        _ => None,
    }
}

pub fn label_style() -> Style {
    Style::default()
        .fg(COLOR_LABEL)
        .add_modifier(Modifier::BOLD)
}

pub fn section_style() -> Style {
    Style::default()
        .fg(COLOR_SECTION)
        .add_modifier(Modifier::BOLD)
}

pub fn rule_style() -> Style {
    Style::default().fg(COLOR_SECTION)
}

pub fn method_style(method: &str) -> Style {
    match method_color(method) {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

pub fn status_code_style(status_code: u16) -> Style {
    match status_color(status_code) {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

pub fn error_style() -> Style {
    Style::default().fg(COLOR_ERROR)
}

pub fn reversed() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
