//! Read-only view of a session for renderers.
//!
//! Renderers never touch [`GameSession`](crate::GameSession) directly; they draw
//! from a snapshot that the frame loop refreshes in place each frame.

use crate::session::TurnPhase;
use crate::types::{ImageId, Rect, RevealState, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub pos: TilePos,
    pub rect: Rect,
    pub image: ImageId,
    pub state: RevealState,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub board_size: u8,
    pub tile_px: u32,
    /// Row-major.
    pub tiles: Vec<TileSnapshot>,
    pub pending: Option<TilePos>,
    pub phase: TurnPhase,
    pub matched_count: usize,
    pub pair_count: usize,
    pub score_secs: u64,
    pub is_over: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board_size: 0,
            tile_px: 0,
            tiles: Vec::new(),
            pending: None,
            phase: TurnPhase::Idle,
            matched_count: 0,
            pair_count: 0,
            score_secs: 0,
            is_over: false,
        }
    }
}

impl SessionSnapshot {
    /// Number of matched pairs.
    pub fn pairs_found(&self) -> usize {
        self.matched_count / 2
    }
}
