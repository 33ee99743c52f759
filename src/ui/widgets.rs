//! Drawing primitives shared by every screen.
//!
//! A [`Pane`] is a clipped view of the frame buffer. Coordinates passed to
//! its methods are relative to the pane, and anything that would land
//! outside it is dropped, so callers can lay text out row by row without
//! bounds checks.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use super::text::{window, wrap};
use super::theme::{label_style, method_style, rule_style, section_style, COLOR_DIM};

/// Horizontal rule glyph
pub const RULE: &str = "─";
/// Vertical divider glyph
pub const VLINE: &str = "│";
/// Where the two dividers cross
pub const CROSS: &str = "┼";

pub struct Pane<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Pane<'a> {
    /// `area` must lie within `buf`.
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    /// Write `text` at `(x, y)`, clipped to the pane. Returns the column
    /// after the last written cell.
    pub fn text(&mut self, y: u16, x: u16, text: &str, style: Style) -> u16 {
        if y >= self.area.height || x >= self.area.width {
            return x;
        }
        let max = usize::from(self.area.width - x);
        let (end, _) = self
            .buf
            .set_stringn(self.area.x + x, self.area.y + y, text, max, style);
        end - self.area.x
    }

    /// Apply `style` to a whole row, e.g. a selection highlight.
    pub fn fill_row(&mut self, y: u16, style: Style) {
        if y >= self.area.height {
            return;
        }
        let row = Rect::new(self.area.x, self.area.y + y, self.area.width, 1);
        self.buf.set_style(row, style);
    }

    /// Bold label followed by a plain value.
    pub fn labeled(&mut self, y: u16, x: u16, label: &str, value: &str) -> u16 {
        let after = self.text(y, x, label, label_style());
        self.text(y, after, value, Style::default())
    }

    /// Bold label followed by a method in its color.
    pub fn labeled_method(&mut self, y: u16, x: u16, label: &str, method: &str) -> u16 {
        let after = self.text(y, x, label, label_style());
        self.text(y, after, method, method_style(method))
    }

    pub fn section_title(&mut self, y: u16, x: u16, title: &str) {
        self.text(y, x, title, section_style());
    }

    /// Full-width horizontal rule.
    pub fn rule(&mut self, y: u16) {
        let line = RULE.repeat(usize::from(self.area.width));
        self.text(y, 0, &line, rule_style());
    }

    /// Title on row 0 with a rule under it.
    pub fn header(&mut self, title: &str) {
        self.section_title(0, 0, title);
        self.rule(1);
    }

    /// Draw up to `max_lines` wrapped lines of `text` in a column `width`
    /// cells wide. Returns the number of lines the text occupies, capped at
    /// `max_lines`.
    pub fn wrapped(
        &mut self,
        y: u16,
        x: u16,
        max_lines: usize,
        width: usize,
        text: &str,
        style: Style,
    ) -> usize {
        let mut count = 0usize;
        for (i, line) in wrap(text, width).take(max_lines).enumerate() {
            self.text(y.saturating_add(i as u16), x, line, style);
            count += 1;
        }
        count
    }

    /// Scrollable full-width body preview starting at row `y`.
    ///
    /// `scroll` is clamped in place.
    pub fn body_preview(&mut self, y: u16, max_lines: u16, text: &str, scroll: &mut usize) {
        let view = window(
            text,
            usize::from(self.area.width),
            usize::from(max_lines),
            scroll,
        );
        for (i, line) in view.lines.iter().enumerate() {
            self.text(y.saturating_add(i as u16), 0, line, Style::default());
        }
        if let Some(hint) = view.hint {
            let hint_y = y.saturating_add(max_lines.saturating_sub(1));
            self.text(hint_y, 0, &hint, Style::default().fg(COLOR_DIM));
        }
    }
}

/// Vertical divider at column `x` over rows `0..rows`.
pub fn vertical_divider(buf: &mut Buffer, x: u16, rows: u16, style: Style) {
    let mut pane = Pane::new(buf, Rect::new(x, 0, 1, rows));
    for y in 0..pane.height() {
        pane.text(y, 0, VLINE, style);
    }
}
