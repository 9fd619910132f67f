//! Root layout computation for header + main content + status bar, and the
//! card grid geometry of the list view.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the header band (title + score or page label).
pub const HEADER_HEIGHT: u16 = 3;
/// Fixed card size in the list grid, borders included.
pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 5;
/// The grid never grows wider than this many columns.
pub const MAX_GRID_COLUMNS: u16 = 6;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        AppLayout {
            header: rows[0],
            main: rows[1],
            status: rows[2],
        }
    }
}

/// Cards per row for a given content width; at least one.
pub fn grid_columns(width: u16) -> u16 {
    (width / CARD_WIDTH).clamp(1, MAX_GRID_COLUMNS)
}

/// Card rows that fit in a given content height; at least one.
pub fn grid_rows(height: u16) -> u16 {
    (height / CARD_HEIGHT).max(1)
}

/// Cell rectangles for `count` cards laid out row-major, skipping the first
/// `skip_rows` rows. Cards that do not fit are omitted.
pub fn grid_cells(area: Rect, count: usize, skip_rows: usize) -> Vec<Rect> {
    let columns = grid_columns(area.width) as usize;
    let visible_rows = grid_rows(area.height) as usize;
    (0..count)
        .filter_map(|i| {
            let row = (i / columns).checked_sub(skip_rows)?;
            if row >= visible_rows {
                return None;
            }
            let col = i % columns;
            let rect = Rect::new(
                area.x + col as u16 * CARD_WIDTH,
                area.y + row as u16 * CARD_HEIGHT,
                CARD_WIDTH.min(area.width),
                CARD_HEIGHT.min(area.height),
            );
            Some(rect)
        })
        .collect()
}
