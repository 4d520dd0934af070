//! Terminal input module (session-facing).
//!
//! This module is intentionally independent of the game rules. It maps
//! `crossterm` events into [`crate::types::InputEvent`] values and drains the
//! terminal event queue once per frame into a fixed-capacity batch.

pub mod map;
pub mod source;

pub use tui_memory_types as types;

pub use map::{is_close_key, map_event, map_key_event};
pub use source::{CrosstermEvents, EventBatch, MAX_EVENTS_PER_FRAME};
