//! Text wrapping and viewport arithmetic.
//!
//! Every text pane in the UI goes through [`wrap`]: logical lines are split
//! on `\r\n`, `\n` or a lone `\r`, then hard-wrapped into chunks of at most
//! `width` display columns. No word breaking is attempted.
//!
//! [`window`] builds the scrollable body previews and their
//! `"^ body 3-10/42 v"` indicator.

use unicode_width::UnicodeWidthChar;

/// Text shown in place of an empty body.
pub const EMPTY_PLACEHOLDER: &str = "(empty)";

/// Lazy iterator over display lines. Create with [`wrap`].
#[derive(Debug, Clone)]
pub struct Wrap<'a> {
    rest: &'a str,
    width: usize,
}

/// Wrap `text` to `width` display columns.
///
/// Empty text or a zero width yields no lines. A trailing line break does not
/// produce an extra empty line.
pub fn wrap(text: &str, width: usize) -> Wrap<'_> {
    Wrap {
        rest: if width == 0 { "" } else { text },
        width,
    }
}

impl<'a> Iterator for Wrap<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut used = 0usize;
        let mut end = 0usize;
        for (idx, c) in self.rest.char_indices() {
            if c == '\n' || c == '\r' {
                break;
            }
            let w = c.width().unwrap_or(0);
            // A glyph wider than the pane still gets a line of its own
            if used + w > self.width && end > 0 {
                break;
            }
            used += w;
            end = idx + c.len_utf8();
            if used >= self.width {
                break;
            }
        }

        let line = &self.rest[..end];
        let mut after = &self.rest[end..];
        if let Some(stripped) = after.strip_prefix("\r\n") {
            after = stripped;
        } else if let Some(stripped) = after
            .strip_prefix('\n')
            .or_else(|| after.strip_prefix('\r'))
        {
            after = stripped;
        }
        self.rest = after;
        Some(line)
    }
}

impl std::iter::FusedIterator for Wrap<'_> {}

/// Number of lines [`wrap`] yields for `text` at `width`.
pub fn total_line_count(text: &str, width: usize) -> usize {
    wrap(text, width).count()
}

/// Clamp a scroll offset so the viewport never points past the content.
pub fn clamp_scroll(offset: usize, total: usize, viewport: usize) -> usize {
    if viewport == 0 || total <= viewport {
        return 0;
    }
    offset.min(total - viewport)
}

/// A windowed slice of wrapped text, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Window<'a> {
    /// Content rows, at most `max_lines` (or `max_lines - 1` with a hint).
    pub lines: Vec<&'a str>,
    /// Scroll indicator for the last row.
    pub hint: Option<String>,
    /// Wrapped line count of the whole text.
    pub total: usize,
}

/// Compute the visible part of `text` for a pane of `max_lines` rows.
///
/// `scroll` is clamped in place. Empty text yields `(empty)` and resets the
/// scroll to 0.
pub fn window<'a>(text: &'a str, width: usize, max_lines: usize, scroll: &mut usize) -> Window<'a> {
    if max_lines == 0 || width == 0 {
        return Window::default();
    }

    if text.is_empty() {
        *scroll = 0;
        return Window {
            lines: vec![EMPTY_PLACEHOLDER],
            hint: None,
            total: 0,
        };
    }

    let total = total_line_count(text, width);
    let show_hint = total > max_lines || *scroll > 0;
    let reserve_hint = show_hint && max_lines >= 2;
    let content = if reserve_hint { max_lines - 1 } else { max_lines }.max(1);

    let offset = clamp_scroll(*scroll, total, content);
    *scroll = offset;

    let lines: Vec<&str> = wrap(text, width).skip(offset).take(content).collect();

    let hint = reserve_hint.then(|| {
        let shown = lines.len();
        let up = if offset > 0 { '^' } else { ' ' };
        let down = if offset + shown < total { 'v' } else { ' ' };
        format!(
            "{} body {}-{}/{} {}",
            up,
            offset + 1,
            offset + shown,
            total,
            down
        )
    });

    Window { lines, hint, total }
}

/// Longest prefix of `s` that fits in `width` display columns.
pub fn truncate_to_width(s: &str, width: usize) -> &str {
    let mut used = 0usize;
    for (idx, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Truncate then right-pad with spaces to exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let used: usize = cut.chars().map(|c| c.width().unwrap_or(0)).sum();
    let mut out = String::with_capacity(cut.len() + width.saturating_sub(used));
    out.push_str(cut);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}
