//! Per-frame terminal event drain.
//!
//! The frame loop never blocks on input: each frame it takes whatever events
//! are already queued, up to a fixed batch size. Anything beyond the batch
//! stays queued for the next frame.

use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event;

use crate::map::map_event;
use crate::types::InputEvent;

/// Upper bound on events handled in one frame.
pub const MAX_EVENTS_PER_FRAME: usize = 64;

/// Stack-only batch of input events for one frame.
pub type EventBatch = ArrayVec<InputEvent, MAX_EVENTS_PER_FRAME>;

/// Reads queued crossterm events without blocking.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl CrosstermEvents {
    pub fn new() -> Self {
        Self
    }

    /// Move every queued event (that maps to an input event) into `out`.
    pub fn drain_into(&mut self, out: &mut EventBatch) -> io::Result<()> {
        while !out.is_full() && event::poll(Duration::ZERO)? {
            if let Some(mapped) = map_event(&event::read()?) {
                out.push(mapped);
            }
        }
        Ok(())
    }
}
