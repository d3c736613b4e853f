//! Input normalization and tap targets.
//!
//! Keyboard, mouse and touch all end up as an [`InputEvent`]. Screens
//! register [`ClickTarget`]s while rendering; a tap is resolved against
//! them to recover the action ID.

use ratzilla::ratatui::layout::{Position, Rect};

/// All input the screens react to.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    Backspace,
    Enter,
    Tab,
    Escape,
    /// A tap on a registered target, identified by its action ID.
    Click(u16),
}

/// A tappable region in terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame, plus the grid size the mouse
/// handler needs to turn pixels into cells.
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame of `area` cells: forget old targets.
    pub fn begin_frame(&mut self, area: Rect) {
        self.terminal_cols = area.width;
        self.terminal_rows = area.height;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if !rect.is_empty() {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// A one-row target spanning `area`'s width. Rows outside `area` are dropped.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if (area.top()..area.bottom()).contains(&row) {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Split a tab bar row among its tabs.
    ///
    /// `tabs` lists `(label_width, action_id)` left to right with
    /// `separator_width` cells between labels. Each boundary sits in the
    /// middle of its separator; the outer tabs reach the edges of `area`.
    pub fn register_tab_targets(&mut self, tabs: &[(u16, u16)], separator_width: u16, area: Rect) {
        let mut left = 0u16;
        let mut label_start = 0u16;
        for (i, &(width, action_id)) in tabs.iter().enumerate() {
            let label_end = label_start + width;
            let right = if i + 1 == tabs.len() {
                area.width
            } else {
                (label_end + separator_width.div_ceil(2)).min(area.width)
            };
            if right > left {
                self.add_click_target(
                    Rect::new(area.x + left, area.y, right - left, area.height),
                    action_id,
                );
            }
            left = right;
            label_start = label_end + separator_width;
        }
    }

    /// Action under a cell. Later targets are drawn on top, so they win.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        let cell = Position::new(col, row);
        self.targets
            .iter()
            .rev()
            .find(|t| t.rect.contains(cell))
            .map(|t| t.action_id)
    }
}

/// Whether a terminal this wide should use the compact layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset along one axis of the grid to a cell index.
fn pixel_to_index(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if cells == 0 || extent <= 0.0 || !(0.0..extent).contains(&offset) {
        return None;
    }
    let index = (offset * cells as f64 / extent) as u16;
    Some(index.min(cells - 1))
}

/// Convert a pixel Y offset (relative to the grid's top edge) to a row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_index(click_y, grid_height, terminal_rows)
}

/// Convert a pixel X offset (relative to the grid's left edge) to a column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_index(click_x, grid_width, terminal_cols)
}
