//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal backend.
//!
//! The game is specified on a logical pixel canvas (see `tui_memory_types`).
//! [`BoardLayout`] maps that canvas onto character cells and maps terminal
//! clicks back onto it, so rendering and hit-testing always agree.
//!
//! - [`fb`]: framebuffer, styles, and sprites
//! - [`assets`]: face / face-down sprites, built in or decoded from image files
//! - [`digits`]: large block-digit text for the score
//! - [`layout`]: canvas <-> terminal cell mapping
//! - [`game_view`]: session snapshot -> framebuffer (pure, no I/O)
//! - [`renderer`]: framebuffer -> terminal (crossterm)

pub mod assets;
pub mod digits;
pub mod fb;
pub mod game_view;
pub mod layout;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use assets::{asset_file_name, AssetError, AssetSet, SPRITE_COLS, SPRITE_ROWS};
pub use fb::{BoxLine, Cell, CellStyle, FrameBuffer, Rgb, Sprite};
pub use game_view::GameView;
pub use layout::{BoardLayout, Viewport};
pub use renderer::TerminalRenderer;
