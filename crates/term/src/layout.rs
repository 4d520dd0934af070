//! Mapping between the logical canvas and terminal cells.
//!
//! Each board tile is drawn as a `tile_cols x tile_rows` block of cells (two
//! columns per row to compensate for the terminal glyph aspect ratio). The
//! whole canvas scales by the same factor, so the score panel to the right of
//! the board keeps its proportion of the logical window.
//!
//! A terminal click is mapped to the logical point under the *center* of the
//! clicked cell, which always falls inside the tile drawn at that cell.

use crate::types::{Point, TilePos, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Nominal canvas height in cells for the default 4x4 board.
pub const CANVAS_ROWS: u16 = 24;

/// Smallest tile height in rows (border plus one interior row).
const MIN_TILE_ROWS: u16 = 3;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Placement of the canvas and board inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left cell of the canvas.
    pub origin_x: u16,
    pub origin_y: u16,
    pub tile_cols: u16,
    pub tile_rows: u16,
    pub board_size: u8,
    /// Tile side in logical pixels.
    pub tile_px: u32,
}

impl BoardLayout {
    /// Center the canvas for a `board_size` board in `viewport`.
    pub fn new(viewport: Viewport, board_size: u8) -> Self {
        let size = board_size.max(1);
        let tile_rows = (CANVAS_ROWS / size as u16).max(MIN_TILE_ROWS);
        let tile_cols = tile_rows * 2;
        let tile_px = WINDOW_HEIGHT / size as u32;

        let mut layout = Self {
            origin_x: 0,
            origin_y: 0,
            tile_cols,
            tile_rows,
            board_size: size,
            tile_px,
        };
        layout.origin_x = viewport.width.saturating_sub(layout.canvas_cols()) / 2;
        layout.origin_y = viewport.height.saturating_sub(layout.canvas_rows()) / 2;
        layout
    }

    /// Canvas width in cells.
    pub fn canvas_cols(&self) -> u16 {
        let cols = (WINDOW_WIDTH as u64 * self.tile_cols as u64).div_ceil(self.tile_px as u64);
        cols.min(u16::MAX as u64) as u16
    }

    /// Canvas height in cells.
    pub fn canvas_rows(&self) -> u16 {
        let rows = (WINDOW_HEIGHT as u64 * self.tile_rows as u64).div_ceil(self.tile_px as u64);
        rows.min(u16::MAX as u64) as u16
    }

    /// Board width in cells.
    pub fn board_cols(&self) -> u16 {
        self.tile_cols * self.board_size as u16
    }

    /// Top-left cell of the tile at `pos`.
    pub fn tile_origin(&self, pos: TilePos) -> (u16, u16) {
        (
            self.origin_x + pos.col as u16 * self.tile_cols,
            self.origin_y + pos.row as u16 * self.tile_rows,
        )
    }

    /// Terminal column of a logical x coordinate.
    pub fn column_of(&self, x: u32) -> u16 {
        let dx = (x as u64 * self.tile_cols as u64) / self.tile_px as u64;
        self.origin_x.saturating_add(dx.min(u16::MAX as u64) as u16)
    }

    /// Terminal row of a logical y coordinate.
    pub fn row_of(&self, y: u32) -> u16 {
        let dy = (y as u64 * self.tile_rows as u64) / self.tile_px as u64;
        self.origin_y.saturating_add(dy.min(u16::MAX as u64) as u16)
    }

    /// Logical point under the center of a terminal cell.
    ///
    /// Returns None for cells outside the canvas.
    pub fn to_canvas(&self, column: u16, row: u16) -> Option<Point> {
        if column < self.origin_x || row < self.origin_y {
            return None;
        }
        let dx = (column - self.origin_x) as i64;
        let dy = (row - self.origin_y) as i64;
        if dx >= self.canvas_cols() as i64 || dy >= self.canvas_rows() as i64 {
            return None;
        }

        let px = self.tile_px as i64;
        let x = ((2 * dx + 1) * px) / (2 * self.tile_cols as i64);
        let y = ((2 * dy + 1) * px) / (2 * self.tile_rows as i64);
        Some(Point::new(x as i32, y as i32))
    }
}
