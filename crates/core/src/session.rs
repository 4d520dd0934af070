//! Session module - the memory game state machine
//!
//! A [`GameSession`] owns the board, the pair-attempt selection, the match
//! count, and the elapsed-time score. Per turn it moves through:
//!
//! ```text
//! Idle --click hidden--> OneSelected --click other hidden--> Resolving
//!   ^                                                         |
//!   +----------- match: immediately / mismatch: after delay --+
//! ```
//!
//! and enters the terminal `GameOver` phase once every tile is matched.
//!
//! A mismatched pair stays face-up for `mismatch_delay_ms`. The session does
//! not sleep: it holds the pair as pending and either counts the delay down in
//! [`GameSession::tick`] or flips it back on [`GameSession::finish_resolve`]
//! (for callers that block for the delay themselves). Clicks are ignored while
//! a mismatch is pending.

use std::time::Duration;

use crate::board::{Board, BoardError, TileIndex};
use crate::rng::SimpleRng;
use crate::snapshot::{SessionSnapshot, TileSnapshot};
use crate::types::{Point, TilePos, BOARD_SIZE, MISMATCH_DELAY_MS};

/// Session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub board_size: u8,
    pub mismatch_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
        }
    }
}

/// Where the current pair-attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// No tile pending.
    Idle,
    /// One tile face-up, waiting for the second click.
    OneSelected,
    /// Two unmatched tiles face-up, waiting to flip back.
    Resolving,
    /// Every tile matched.
    GameOver,
}

/// First tile of the in-progress pair-attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pending: Option<TileIndex>,
}

impl SelectionState {
    pub fn pending_tile(&self) -> Option<TileIndex> {
        self.pending
    }

    pub fn awaiting_second_click(&self) -> bool {
        self.pending.is_some()
    }

    fn select(&mut self, index: TileIndex) {
        self.pending = Some(index);
    }

    fn clear(&mut self) {
        self.pending = None;
    }
}

/// Result of a click, for the caller to react to (render, pause, log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// First tile of a pair-attempt flipped.
    FirstRevealed { tile: TilePos },
    /// Second tile matched the first; both are now permanent.
    Matched { first: TilePos, second: TilePos },
    /// Second tile differs; both stay face-up until the mismatch resolves.
    Mismatched { first: TilePos, second: TilePos },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingMismatch {
    first: TileIndex,
    second: TileIndex,
    remaining_ms: u32,
}

/// Complete game-in-progress state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    selection: SelectionState,
    mismatch: Option<PendingMismatch>,
    /// Number of permanently shown tiles (always even).
    matched_count: usize,
    elapsed: Duration,
    is_over: bool,
    mismatch_delay_ms: u32,
    seed: u32,
}

impl GameSession {
    /// Create a session with a board dealt from `seed`.
    pub fn new(config: SessionConfig, seed: u32) -> Result<Self, BoardError> {
        let mut rng = SimpleRng::new(seed);
        let board = Board::new(config.board_size, &mut rng)?;
        let mut session = Self::with_board(board, config.mismatch_delay_ms);
        session.seed = seed;
        Ok(session)
    }

    /// Create a session around an already-built board.
    pub fn with_board(board: Board, mismatch_delay_ms: u32) -> Self {
        Self {
            board,
            selection: SelectionState::default(),
            mismatch: None,
            matched_count: 0,
            elapsed: Duration::ZERO,
            is_over: false,
            mismatch_delay_ms,
            seed: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms as u64)
    }

    /// Elapsed time since session start (frozen at game over).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Score: whole seconds since session start. Lower is better.
    pub fn score(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn phase(&self) -> TurnPhase {
        if self.is_over {
            TurnPhase::GameOver
        } else if self.mismatch.is_some() {
            TurnPhase::Resolving
        } else if self.selection.awaiting_second_click() {
            TurnPhase::OneSelected
        } else {
            TurnPhase::Idle
        }
    }

    /// True while a mismatched pair is waiting to flip back.
    pub fn is_resolving(&self) -> bool {
        self.mismatch.is_some()
    }

    /// Number of face-up tiles whose pair-attempt is unresolved.
    pub fn temporarily_shown_count(&self) -> usize {
        self.board
            .tiles()
            .iter()
            .filter(|t| t.state() == crate::types::RevealState::TemporarilyShown)
            .count()
    }

    /// Handle a pointer release at `point` on the logical canvas.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        match self.board.tile_at(point) {
            Some(index) => self.click_index(index),
            None => ClickOutcome::Ignored,
        }
    }

    /// Handle a click on the tile at `pos` (keyboard selection).
    pub fn click_tile(&mut self, pos: TilePos) -> ClickOutcome {
        match self.board.index_of(pos) {
            Some(index) => self.click_index(index),
            None => ClickOutcome::Ignored,
        }
    }

    fn click_index(&mut self, index: TileIndex) -> ClickOutcome {
        if self.is_over || self.mismatch.is_some() {
            return ClickOutcome::Ignored;
        }

        let Some(tile) = self.board.tile_mut(index) else {
            return ClickOutcome::Ignored;
        };
        // Also rejects re-clicking the pending tile, which is already face-up.
        if !tile.reveal() {
            return ClickOutcome::Ignored;
        }
        let clicked = tile.position();

        let Some(first) = self.selection.pending_tile() else {
            self.selection.select(index);
            return ClickOutcome::FirstRevealed { tile: clicked };
        };

        self.resolve_pair(first, index)
    }

    /// Compare the pending tile with the second one just revealed.
    fn resolve_pair(&mut self, first: TileIndex, second: TileIndex) -> ClickOutcome {
        let (first_tile, second_tile) = match (self.board.tile(first), self.board.tile(second)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return ClickOutcome::Ignored,
        };
        self.selection.clear();

        let first_pos = first_tile.position();
        let second_pos = second_tile.position();

        if first_tile.matches(&second_tile) {
            for index in [first, second] {
                if let Some(t) = self.board.tile_mut(index) {
                    t.confirm_match();
                }
            }
            self.matched_count += 2;
            self.check_termination();
            return ClickOutcome::Matched {
                first: first_pos,
                second: second_pos,
            };
        }

        self.mismatch = Some(PendingMismatch {
            first,
            second,
            remaining_ms: self.mismatch_delay_ms,
        });
        ClickOutcome::Mismatched {
            first: first_pos,
            second: second_pos,
        }
    }

    /// Flip a pending mismatched pair back to hidden right away.
    ///
    /// Returns false if no mismatch was pending.
    pub fn finish_resolve(&mut self) -> bool {
        let Some(pending) = self.mismatch.take() else {
            return false;
        };
        for index in [pending.first, pending.second] {
            if let Some(t) = self.board.tile_mut(index) {
                t.confirm_mismatch();
            }
        }
        true
    }

    /// Advance the mismatch countdown by `elapsed_ms`.
    ///
    /// Returns true if a pending mismatch flipped back during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(pending) = self.mismatch.as_mut() else {
            return false;
        };
        pending.remaining_ms = pending.remaining_ms.saturating_sub(elapsed_ms);
        if pending.remaining_ms > 0 {
            return false;
        }
        self.finish_resolve()
    }

    /// Recompute the score from the time since session start.
    ///
    /// No-op once the game is over, so the final score stays frozen.
    pub fn update_clock(&mut self, since_start: Duration) {
        if self.is_over {
            return;
        }
        self.elapsed = since_start;
    }

    /// Enter `GameOver` once every tile is matched. Returns `is_over`.
    pub fn check_termination(&mut self) -> bool {
        if !self.is_over && self.matched_count == self.board.len() {
            self.is_over = true;
        }
        self.is_over
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.board_size = self.board.size();
        out.tile_px = self.board.tile_px();
        out.tiles.clear();
        out.tiles.extend(self.board.tiles().iter().map(|t| TileSnapshot {
            pos: t.position(),
            rect: t.rect(),
            image: t.image_identity(),
            state: t.state(),
        }));
        out.pending = self
            .selection
            .pending_tile()
            .and_then(|i| self.board.tile(i))
            .map(|t| t.position());
        out.phase = self.phase();
        out.matched_count = self.matched_count;
        out.pair_count = self.board.pair_count();
        out.score_secs = self.score();
        out.is_over = self.is_over;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
