//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the memory game rules and state machine.
//! It has **zero dependencies** on terminal I/O, input devices, or clocks:
//! time is passed in by the caller.
//!
//! - **Deterministic**: Same seed deals the same board
//! - **Testable**: Every transition is reachable from plain method calls
//! - **Portable**: Can run under any renderer (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`tile`]: one cell; face state transitions and hit-testing
//! - [`board`]: the square grid and the shuffled pair deal
//! - [`session`]: turn protocol (idle / one selected / resolving / game over)
//! - [`rng`]: seeded LCG used for the deal
//! - [`snapshot`]: read-only session view for renderers
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{ClickOutcome, GameSession, SessionConfig, TurnPhase};
//! use tui_memory_types::TilePos;
//!
//! let mut game = GameSession::new(SessionConfig::default(), 12345).unwrap();
//!
//! let out = game.click_tile(TilePos::new(0, 0));
//! assert!(matches!(out, ClickOutcome::FirstRevealed { .. }));
//! assert_eq!(game.phase(), TurnPhase::OneSelected);
//! ```

pub mod board;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod tile;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use board::{deal_pairs, Board, BoardError, TileIndex};
pub use rng::SimpleRng;
pub use session::{ClickOutcome, GameSession, SelectionState, SessionConfig, TurnPhase};
pub use snapshot::{SessionSnapshot, TileSnapshot};
pub use tile::Tile;
