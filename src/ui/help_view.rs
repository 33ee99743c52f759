//! Static help page.

use ratatui::{style::Style, Frame};

use super::theme::section_style;
use super::widgets::Pane;

pub const HELP_TITLE: &str = "tuiman help";

pub const HELP_LINES: [&str; 6] = [
    "Main: j/k gg G / ? : Enter E d Esc n N H/L K/J resize ZZ/ZQ quit { } req body [ ] resp body",
    "Actions: y send, e edit body, a edit auth",
    "Commands: :new [METHOD] [URL], :edit, :history, :export [DIR], :import [DIR], :help, :q",
    "Request editor: j/k move, i edit (except Method), h/l method, { } body scroll, e body, :w/:q",
    "History: j/k move, r replay, H/L resize, { } details scroll",
    "Mouse: drag main/editor/history vertical divider and main horizontal divider",
];

pub const HELP_FOOTER: &str = "Press Esc to return";

pub(super) fn render(frame: &mut Frame) {
    let area = frame.area();
    let mut pane = Pane::new(frame.buffer_mut(), area);

    pane.text(1, 2, HELP_TITLE, section_style());
    for (i, line) in HELP_LINES.iter().enumerate() {
        pane.text(3 + i as u16, 2, line, Style::default());
    }
    if let Some(last) = area.height.checked_sub(1) {
        pane.text(last, 0, HELP_FOOTER, Style::default());
    }
}
