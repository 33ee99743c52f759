//! Pane geometry for each screen.
//!
//! Layouts are pure functions of the terminal size and [`PaneRatios`]. They
//! are recomputed on every frame and on every mouse event, so the renderer
//! and the drag handler always agree on where the dividers are.
//!
//! ```text
//! Main screen                      Editor / History
//! +-----------+-+----------+      +-----------+-+----------+
//! | list      |||  preview |      | fields    |||  preview |
//! +-----------+-+----------+      |           | |          |
//! | response               |      |           | |          |
//! +------------------------+      +-----------+-+----------+
//! | status                 |      | status                 |
//! ```

use ratatui::layout::Rect;

// ============================================================================
// Constants
// ============================================================================

/// Rows reserved at the bottom for the status/command line.
pub const STATUS_ROWS: u16 = 1;

/// Below this width no layout is valid.
pub const MIN_WIDTH: u16 = 24;

/// Below this many content rows no layout is valid.
pub const MIN_CONTENT_ROWS: u16 = 3;

pub const MAIN_MIN_TOP: u16 = 4;
pub const MAIN_MIN_RESPONSE: u16 = 4;

/// Step applied by the `H`/`L`/`K`/`J` keys.
pub const NUDGE_STEP: f64 = 0.03;

pub const SPLIT_RANGE: (f64, f64) = (0.20, 0.80);
pub const RESPONSE_RANGE: (f64, f64) = (0.15, 0.70);

/// Half-width of the grab zone around a divider, in cells.
pub const DIVIDER_GRAB: u16 = 2;

/// Minimum pane widths for a side-by-side split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMinimums {
    pub left: u16,
    pub right: u16,
}

impl SplitMinimums {
    /// Narrowest terminal that still shows both panes.
    pub const fn required_width(&self) -> u16 {
        self.left + self.right + 1
    }
}

pub const MAIN_SPLIT: SplitMinimums = SplitMinimums { left: 24, right: 20 };
pub const EDITOR_SPLIT: SplitMinimums = SplitMinimums { left: 42, right: 30 };
pub const HISTORY_SPLIT: SplitMinimums = SplitMinimums { left: 24, right: 20 };

/// `floor(x + 0.5)`, ties round up.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

fn clamp_i64(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

// ============================================================================
// Ratios
// ============================================================================

/// User-adjustable divider positions. Kept for the process lifetime only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneRatios {
    /// Left pane share of the terminal width.
    pub split: f64,
    /// Response pane share of the rows above the status line.
    pub response: f64,
}

impl Default for PaneRatios {
    fn default() -> Self {
        Self {
            split: 0.66,
            response: 0.28,
        }
    }
}

impl PaneRatios {
    pub fn nudge_split(&mut self, delta: f64) {
        self.split = (self.split + delta).clamp(SPLIT_RANGE.0, SPLIT_RANGE.1);
    }

    pub fn nudge_response(&mut self, delta: f64) {
        self.response = (self.response + delta).clamp(RESPONSE_RANGE.0, RESPONSE_RANGE.1);
    }

    /// Status text shown after a resize.
    pub fn resize_status(&self, response_rows: u16) -> String {
        format!(
            "Resize: left={}% response={}% ({} lines)",
            round_half_up(self.split * 100.0),
            round_half_up(self.response * 100.0),
            response_rows
        )
    }
}

// ============================================================================
// Vertical split
// ============================================================================

/// Left/right split of a band of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalSplit {
    pub left: Rect,
    /// Column of the divider, when the right pane is shown.
    pub separator_x: Option<u16>,
    pub right: Option<Rect>,
}

fn split_columns(width: u16, y: u16, rows: u16, split: f64, mins: SplitMinimums) -> VerticalSplit {
    if width < mins.required_width() {
        return VerticalSplit {
            left: Rect::new(0, y, width, rows),
            separator_x: None,
            right: None,
        };
    }

    let max_left = i64::from(width) - i64::from(mins.right) - 1;
    let left_w = clamp_i64(
        round_half_up(split * f64::from(width)),
        i64::from(mins.left),
        max_left,
    ) as u16;
    let right_x = left_w + 1;

    VerticalSplit {
        left: Rect::new(0, y, left_w, rows),
        separator_x: Some(left_w),
        right: Some(Rect::new(right_x, y, width - right_x, rows)),
    }
}

/// Split ratio for a divider dragged to column `x`.
///
/// Returns `None` when the terminal is too narrow for a split.
pub fn split_from_x(x: u16, width: u16, mins: SplitMinimums) -> Option<f64> {
    if width == 0 || width < mins.required_width() {
        return None;
    }
    let max_left = width - mins.right - 1;
    let left = x.clamp(mins.left, max_left);
    Some(f64::from(left) / f64::from(width))
}

/// Response ratio for a divider dragged to row `y`.
pub fn response_from_y(y: u16, available: u16) -> Option<f64> {
    if available < MAIN_MIN_TOP + MAIN_MIN_RESPONSE + 1 {
        return None;
    }
    let max_sep = available - MAIN_MIN_RESPONSE - 1;
    let sep = y.clamp(MAIN_MIN_TOP, max_sep);
    let response_rows = available - sep - 1;
    Some(f64::from(response_rows) / f64::from(available))
}

// ============================================================================
// Main screen
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub width: u16,
    pub height: u16,
    /// Rows above the status line.
    pub available: u16,
    /// List on the left, request preview on the right.
    pub top: VerticalSplit,
    pub horizontal_sep_y: Option<u16>,
    pub response: Option<Rect>,
    pub status: Rect,
}

impl MainLayout {
    pub fn top_rows(&self) -> u16 {
        self.top.left.height
    }

    pub fn response_rows(&self) -> u16 {
        self.response.map(|r| r.height).unwrap_or(0)
    }

    pub fn on_vertical_divider(&self, x: u16, y: u16) -> bool {
        match self.top.separator_x {
            Some(sep) => y < self.top_rows() && x.abs_diff(sep) <= DIVIDER_GRAB,
            None => false,
        }
    }

    pub fn on_horizontal_divider(&self, y: u16) -> bool {
        match self.horizontal_sep_y {
            Some(sep) => y.abs_diff(sep) <= DIVIDER_GRAB,
            None => false,
        }
    }
}

/// Geometry of the main screen, or `None` when the terminal is too small.
pub fn main_layout(width: u16, height: u16, ratios: PaneRatios) -> Option<MainLayout> {
    let available = height.checked_sub(STATUS_ROWS)?;
    if available < MIN_CONTENT_ROWS || width < MIN_WIDTH {
        return None;
    }

    let (top_rows, horizontal_sep_y, response) =
        if available >= MAIN_MIN_TOP + MAIN_MIN_RESPONSE + 1 {
            let max_response = i64::from(available) - i64::from(MAIN_MIN_TOP) - 1;
            let response_rows = clamp_i64(
                round_half_up(ratios.response * f64::from(available)),
                i64::from(MAIN_MIN_RESPONSE),
                max_response,
            ) as u16;
            let sep = available - response_rows - 1;
            (sep, Some(sep), Some(Rect::new(0, sep + 1, width, response_rows)))
        } else {
            (available, None, None)
        };

    Some(MainLayout {
        width,
        height,
        available,
        top: split_columns(width, 0, top_rows, ratios.split, MAIN_SPLIT),
        horizontal_sep_y,
        response,
        status: Rect::new(0, available, width, STATUS_ROWS),
    })
}

// ============================================================================
// Editor and history screens
// ============================================================================

/// Two-column layout shared by the editor and history screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLayout {
    pub width: u16,
    pub height: u16,
    pub content_rows: u16,
    pub columns: VerticalSplit,
    pub status: Rect,
    pub mins: SplitMinimums,
}

impl ContentLayout {
    pub fn on_vertical_divider(&self, x: u16, y: u16) -> bool {
        match self.columns.separator_x {
            Some(sep) => y < self.content_rows && x.abs_diff(sep) <= DIVIDER_GRAB,
            None => false,
        }
    }
}

fn content_layout(
    width: u16,
    height: u16,
    ratios: PaneRatios,
    mins: SplitMinimums,
) -> Option<ContentLayout> {
    let content_rows = height.checked_sub(STATUS_ROWS)?;
    if content_rows < MIN_CONTENT_ROWS || width < MIN_WIDTH {
        return None;
    }
    Some(ContentLayout {
        width,
        height,
        content_rows,
        columns: split_columns(width, 0, content_rows, ratios.split, mins),
        status: Rect::new(0, content_rows, width, STATUS_ROWS),
        mins,
    })
}

pub fn editor_layout(width: u16, height: u16, ratios: PaneRatios) -> Option<ContentLayout> {
    content_layout(width, height, ratios, EDITOR_SPLIT)
}

pub fn history_layout(width: u16, height: u16, ratios: PaneRatios) -> Option<ContentLayout> {
    content_layout(width, height, ratios, HISTORY_SPLIT)
}
