//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Canvas
//!
//! The game is laid out on a logical "window" canvas measured in pixels. The
//! terminal renderer maps this canvas onto character cells, and pointer input
//! is mapped back into canvas coordinates before it reaches the game session.
//!
//! - **Canvas**: 500 x 400 logical pixels
//! - **Board**: square, anchored at the canvas origin, side = canvas height
//! - **Score**: drawn in the top-right corner, to the right of the board
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_SIZE` | 4 | Tiles per board side (16 tiles, 8 pairs) |
//! | `TARGET_FPS` | 60 | Frame loop rate |
//! | `FRAME_MS` | 16 | Frame budget in milliseconds |
//! | `MISMATCH_DELAY_MS` | 777 | How long a mismatched pair stays face-up |
//! | `TILE_BORDER_WIDTH` | 3 | Tile border width in logical pixels |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{ImageId, Point, Rect, RevealState, BOARD_SIZE, PAIR_COUNT};
//!
//! assert_eq!(PAIR_COUNT, (BOARD_SIZE as usize * BOARD_SIZE as usize) / 2);
//!
//! let rect = Rect::new(0, 0, 100, 100);
//! assert!(rect.contains(Point::new(99, 0)));
//! assert!(!rect.contains(Point::new(100, 0)));
//!
//! let id = ImageId::new(3);
//! assert_eq!(id.index(), 3);
//!
//! assert!(RevealState::TemporarilyShown.is_revealed());
//! ```

/// Logical canvas width in pixels.
pub const WINDOW_WIDTH: u32 = 500;

/// Logical canvas height in pixels.
pub const WINDOW_HEIGHT: u32 = 400;

/// Default number of tiles along each side of the board.
pub const BOARD_SIZE: u8 = 4;

/// Number of distinct images on the default board.
pub const PAIR_COUNT: usize = (BOARD_SIZE as usize * BOARD_SIZE as usize) / 2;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: u8 = 10;

/// Target frame rate of the game loop.
pub const TARGET_FPS: u32 = 60;

/// Frame budget in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 1000 / TARGET_FPS;

/// How long a mismatched pair stays face-up before flipping back (≈0.78s).
pub const MISMATCH_DELAY_MS: u32 = 777;

/// Tile border width in logical pixels.
///
/// Terminal cells cannot draw a fractional border, so any width above one
/// pixel is drawn with heavy box lines.
pub const TILE_BORDER_WIDTH: u32 = 3;

/// Score font size in logical pixels.
///
/// The terminal draws the score with fixed 3x5 block digits; the panel text
/// below the score starts no higher than this many pixels under its anchor.
pub const SCORE_FONT_SIZE: u32 = 64;

/// Score is drawn bold.
pub const SCORE_BOLD: bool = true;

/// Top-left anchor of the score text in logical pixels (top-right of the canvas).
pub const SCORE_POSITION: (u32, u32) = (445, 0);


/// Identity of one of the paired images a tile can conceal.
///
/// The value is the load order of the face image: `ImageId(0)` is the first
/// face asset, not the face-down placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u8);

impl ImageId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Face state of a single tile.
///
/// Replaces a pair of "temporary"/"permanent" flags so that a tile can never
/// be both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealState {
    /// Face-down.
    #[default]
    Hidden,
    /// Face-up while the current pair-attempt is unresolved.
    TemporarilyShown,
    /// Matched; face-up for the rest of the game.
    PermanentlyShown,
}

impl RevealState {
    pub fn is_hidden(self) -> bool {
        self == RevealState::Hidden
    }

    pub fn is_revealed(self) -> bool {
        !self.is_hidden()
    }
}

/// A point on the logical canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle on the logical canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if `p` lies inside the rectangle (right and bottom edges excluded).
    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (p.x as i64, p.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }
}

/// Grid coordinates of a tile (row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TilePos {
    pub row: u8,
    pub col: u8,
}

impl TilePos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Keyboard cursor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete input event delivered to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The player closed the game.
    Close,
    /// Primary pointer button released at a terminal cell.
    PointerRelease { column: u16, row: u16 },
    /// Move the keyboard cursor one tile.
    Cursor(CursorMove),
    /// "Click" the tile under the keyboard cursor.
    Select,
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
}
