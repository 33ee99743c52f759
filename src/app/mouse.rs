//! Divider drag gestures.
//!
//! A left-button press within grab distance of a divider starts a drag and
//! moves the divider at once. Drag events keep moving it; release ends it.
//! Only the main screen has a horizontal divider, and only its drags
//! report the new ratios in the status line.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::{App, DragMode, Screen};
use crate::ui::layout::{
    editor_layout, history_layout, main_layout, response_from_y, split_from_x, ContentLayout,
    MAIN_SPLIT,
};

impl App {
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) {
        match self.screen {
            Screen::Main => self.handle_main_mouse(mouse),
            Screen::Editor => {
                let layout = editor_layout(self.width, self.height, self.ratios);
                self.handle_content_mouse(mouse, layout);
            }
            Screen::History => {
                let layout = history_layout(self.width, self.height, self.ratios);
                self.handle_content_mouse(mouse, layout);
            }
            Screen::Help => {}
        }
    }

    fn handle_main_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = main_layout(self.width, self.height, self.ratios) else {
            self.drag = DragMode::None;
            return;
        };
        let (x, y) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => self.drag = DragMode::None,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
                if self.drag != DragMode::None =>
            {
                self.apply_main_drag(x, y, layout.available);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag = if layout.on_vertical_divider(x, y) {
                    DragMode::Vertical
                } else if layout.on_horizontal_divider(y) {
                    DragMode::Horizontal
                } else {
                    DragMode::None
                };
                self.apply_main_drag(x, y, layout.available);
            }
            _ => {}
        }
    }

    fn apply_main_drag(&mut self, x: u16, y: u16, available: u16) {
        let ratio = match self.drag {
            DragMode::Vertical => split_from_x(x, self.width, MAIN_SPLIT),
            DragMode::Horizontal => response_from_y(y, available),
            DragMode::None => return,
        };
        if let Some(ratio) = ratio {
            match self.drag {
                DragMode::Vertical => self.ratios.split = ratio,
                _ => self.ratios.response = ratio,
            }
            self.refresh_resize_status();
        }
    }

    fn handle_content_mouse(&mut self, mouse: MouseEvent, layout: Option<ContentLayout>) {
        let Some(layout) = layout else {
            self.drag = DragMode::None;
            return;
        };
        let (x, y) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => self.drag = DragMode::None,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
                if self.drag == DragMode::Vertical =>
            {
                self.apply_content_drag(x, &layout);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.on_vertical_divider(x, y) {
                    self.drag = DragMode::Vertical;
                    self.apply_content_drag(x, &layout);
                } else {
                    self.drag = DragMode::None;
                }
            }
            _ => {}
        }
    }

    fn apply_content_drag(&mut self, x: u16, layout: &ContentLayout) {
        if let Some(ratio) = split_from_x(x, layout.width, layout.mins) {
            self.ratios.split = ratio;
        }
    }
}
