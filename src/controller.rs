//! Frame loop: drives a [`GameSession`] against a surface, an event source, and a clock.
//!
//! Each frame:
//!
//! 1. drain queued input (close stops the loop, clicks go to the session
//!    after the score is brought up to the click time)
//! 2. render the board and score
//! 3. while the game is active, update the elapsed score and check for game over
//! 4. wait out the rest of the frame budget
//!
//! The three collaborators are traits so the loop runs unchanged against the
//! real terminal or against test doubles.
//!
//! # Mismatch pause
//!
//! With [`MismatchPause::Blocking`] a mismatched pair is rendered, then the loop
//! sleeps for the mismatch delay before flipping the pair back. No input is
//! read during that sleep, and a close request waits until it ends.
//! [`MismatchPause::Timed`] keeps the loop running and lets the session count
//! the delay down frame by frame; clicks are ignored until the pair flips back.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::core::{ClickOutcome, GameSession, SessionSnapshot};
use crate::input::{CrosstermEvents, EventBatch};
use crate::term::{AssetSet, BoardLayout, FrameBuffer, GameView, TerminalRenderer, Viewport};
use crate::types::{CursorMove, InputEvent, TilePos};

/// How a mismatched pair is kept on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPause {
    /// Render, then block the loop for the delay.
    #[default]
    Blocking,
    /// Keep running frames; the session flips the pair back when the delay has elapsed.
    Timed,
}

/// How a play session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every pair was found; `score_secs` is the final (frozen) score.
    Completed { score_secs: u64 },
    /// Closed before the board was cleared.
    Abandoned { pairs_found: usize, elapsed_secs: u64 },
}

/// Where frames are drawn.
pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()>;
    /// Drop any cached frame so the next present is a full redraw.
    fn invalidate(&mut self);
}

/// Where input comes from.
pub trait EventSource {
    /// Move every event queued since the last call into `out`, without blocking.
    fn drain_into(&mut self, out: &mut EventBatch) -> Result<()>;
}

/// Monotonic time and blocking sleep.
pub trait Clock {
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

impl Surface for TerminalRenderer {
    fn viewport(&self) -> Viewport {
        TerminalRenderer::viewport(self)
    }

    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.draw_swap(fb)
    }

    fn invalidate(&mut self) {
        TerminalRenderer::invalidate(self);
    }
}

impl EventSource for CrosstermEvents {
    fn drain_into(&mut self, out: &mut EventBatch) -> Result<()> {
        CrosstermEvents::drain_into(self, out)?;
        Ok(())
    }
}

/// Wall clock backed by [`Instant`] and [`thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Caps the loop at a fixed frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame: Duration,
    last: Option<Duration>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            last: None,
        }
    }

    /// Sleep until one frame has passed since the previous tick.
    ///
    /// Returns the time since the previous tick (zero on the first call).
    pub fn tick(&mut self, clock: &mut impl Clock) -> Duration {
        if let Some(last) = self.last {
            let target = last + self.frame;
            let now = clock.elapsed();
            if now < target {
                clock.sleep(target - now);
            }
        }

        let now = clock.elapsed();
        let dt = self.last.map(|last| now.saturating_sub(last)).unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt
    }
}

/// Owns the session and its collaborators for one play.
pub struct Controller<S, E, C> {
    session: GameSession,
    assets: AssetSet,
    view: GameView,
    surface: S,
    events: E,
    clock: C,
    pause: MismatchPause,
    limiter: FrameLimiter,
    fb: FrameBuffer,
    snapshot: SessionSnapshot,
    cursor: TilePos,
    show_cursor: bool,
    started_at: Duration,
    frames: u64,
}

impl<S: Surface, E: EventSource, C: Clock> Controller<S, E, C> {
    pub fn new(
        session: GameSession,
        assets: AssetSet,
        surface: S,
        events: E,
        clock: C,
        pause: MismatchPause,
        fps: u32,
    ) -> Self {
        let started_at = clock.elapsed();
        let snapshot = session.snapshot();
        Self {
            session,
            assets,
            view: GameView::default(),
            surface,
            events,
            clock,
            pause,
            limiter: FrameLimiter::new(fps),
            fb: FrameBuffer::new(0, 0),
            snapshot,
            cursor: TilePos::default(),
            show_cursor: false,
            started_at,
            frames: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn cursor(&self) -> Option<TilePos> {
        self.show_cursor.then_some(self.cursor)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run frames until the player closes the game.
    pub fn run(&mut self) -> Result<ExitStatus> {
        info!(
            board_size = self.session.board().size(),
            seed = self.session.seed(),
            "session started"
        );
        let viewport = self.surface.viewport();
        let layout = BoardLayout::new(viewport, self.session.board().size());
        if viewport.width < layout.canvas_cols() || viewport.height < layout.canvas_rows() {
            warn!(
                width = viewport.width,
                height = viewport.height,
                needed_width = layout.canvas_cols(),
                needed_height = layout.canvas_rows(),
                "terminal smaller than the board; some tiles are cut off"
            );
        }
        while self.frame()? {}
        let status = self.exit_status();
        info!(?status, frames = self.frames, "session closed");
        Ok(status)
    }

    /// Run one frame. Returns false once a close event was seen.
    pub fn frame(&mut self) -> Result<bool> {
        self.frames += 1;
        let was_over = self.session.is_over();

        let mut batch = EventBatch::new();
        self.events.drain_into(&mut batch)?;
        for event in batch {
            if !self.handle_event(event)? {
                return Ok(false);
            }
        }

        self.render()?;

        if !self.session.is_over() {
            self.sync_clock();
            self.session.check_termination();
        }
        if !was_over && self.session.is_over() {
            info!(score = self.session.score(), "all pairs found");
        }

        let dt = self.limiter.tick(&mut self.clock);
        if self.pause == MismatchPause::Timed && self.session.tick(dt.as_millis() as u32) {
            debug!("mismatched pair hidden");
        }

        Ok(true)
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.session.is_over() {
            ExitStatus::Completed {
                score_secs: self.session.score(),
            }
        } else {
            ExitStatus::Abandoned {
                pairs_found: self.session.matched_count() / 2,
                elapsed_secs: self.session.score(),
            }
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<bool> {
        match event {
            InputEvent::Close => return Ok(false),
            InputEvent::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                self.surface.invalidate();
            }
            InputEvent::PointerRelease { column, row } => {
                self.show_cursor = false;
                let layout = BoardLayout::new(self.surface.viewport(), self.session.board().size());
                match layout.to_canvas(column, row) {
                    Some(point) => {
                        self.sync_clock();
                        let outcome = self.session.click(point);
                        self.after_click(outcome)?;
                    }
                    None => trace!(column, row, "click outside canvas"),
                }
            }
            InputEvent::Cursor(direction) => {
                self.cursor = step_cursor(self.cursor, direction, self.session.board().size());
                self.show_cursor = true;
            }
            InputEvent::Select => {
                self.show_cursor = true;
                self.sync_clock();
                let outcome = self.session.click_tile(self.cursor);
                self.after_click(outcome)?;
            }
        }
        Ok(true)
    }

    /// Bring the score up to the current time. Frozen once the game is over,
    /// so a click that ends the game keeps the time it was made at.
    fn sync_clock(&mut self) {
        let since_start = self.clock.elapsed().saturating_sub(self.started_at);
        self.session.update_clock(since_start);
    }

    fn after_click(&mut self, outcome: ClickOutcome) -> Result<()> {
        match outcome {
            ClickOutcome::Ignored => trace!("click ignored"),
            ClickOutcome::FirstRevealed { tile } => {
                debug!(row = tile.row, col = tile.col, "first tile revealed");
            }
            ClickOutcome::Matched { first, second } => {
                debug!(?first, ?second, matched = self.session.matched_count(), "pair matched");
            }
            ClickOutcome::Mismatched { first, second } => {
                debug!(?first, ?second, "pair mismatched");
                if self.pause == MismatchPause::Blocking {
                    // Show both faces before the pause hides them again.
                    self.render()?;
                    self.clock.sleep(self.session.mismatch_delay());
                    self.session.finish_resolve();
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.session.snapshot_into(&mut self.snapshot);
        let viewport = self.surface.viewport();
        let cursor = self.cursor();
        self.view
            .render_into(&self.snapshot, &self.assets, cursor, viewport, &mut self.fb);
        self.surface.present(&mut self.fb)
    }
}

fn step_cursor(cursor: TilePos, direction: CursorMove, size: u8) -> TilePos {
    let last = size.saturating_sub(1);
    match direction {
        CursorMove::Up => TilePos::new(cursor.row.saturating_sub(1), cursor.col),
        CursorMove::Down => TilePos::new((cursor.row + 1).min(last), cursor.col),
        CursorMove::Left => TilePos::new(cursor.row, cursor.col.saturating_sub(1)),
        CursorMove::Right => TilePos::new(cursor.row, (cursor.col + 1).min(last)),
    }
}

/// Play one game in the terminal.
///
/// Assets are loaded before the terminal is touched, so a missing or broken
/// image aborts startup with a plain error message. The terminal is restored
/// on every exit path.
pub fn run_game(config: &GameConfig) -> Result<ExitStatus> {
    config.validate()?;
    let assets = config.load_assets()?;
    let seed = config.resolved_seed();
    let session = GameSession::new(config.session(), seed)?;

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;

    let mut controller = Controller::new(
        session,
        assets,
        renderer,
        CrosstermEvents::new(),
        SystemClock::new(),
        config.pause,
        config.fps,
    );
    let result = controller.run();

    // Always try to restore terminal state.
    let _ = controller.into_surface().exit();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct StepClock {
        now: Duration,
        slept: Vec<Duration>,
    }

    impl Clock for StepClock {
        fn elapsed(&self) -> Duration {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.slept.push(duration);
            self.now += duration;
        }
    }

    #[test]
    fn limiter_first_tick_does_not_sleep() {
        let mut clock = StepClock::default();
        let mut limiter = FrameLimiter::new(60);
        assert_eq!(limiter.tick(&mut clock), Duration::ZERO);
        assert!(clock.slept.is_empty());
    }

    #[test]
    fn limiter_sleeps_out_the_frame() {
        let mut clock = StepClock::default();
        let mut limiter = FrameLimiter::new(50);
        limiter.tick(&mut clock);

        clock.now += Duration::from_millis(5);
        let dt = limiter.tick(&mut clock);
        assert_eq!(clock.slept, vec![Duration::from_millis(15)]);
        assert_eq!(dt, Duration::from_millis(20));
    }

    #[test]
    fn limiter_skips_sleep_for_slow_frames() {
        let mut clock = StepClock::default();
        let mut limiter = FrameLimiter::new(50);
        limiter.tick(&mut clock);

        clock.now += Duration::from_millis(35);
        let dt = limiter.tick(&mut clock);
        assert!(clock.slept.is_empty());
        assert_eq!(dt, Duration::from_millis(35));
    }

    #[test]
    fn cursor_stays_on_board() {
        let origin = TilePos::new(0, 0);
        assert_eq!(step_cursor(origin, CursorMove::Up, 4), origin);
        assert_eq!(step_cursor(origin, CursorMove::Left, 4), origin);
        assert_eq!(step_cursor(origin, CursorMove::Right, 4), TilePos::new(0, 1));

        let corner = TilePos::new(3, 3);
        assert_eq!(step_cursor(corner, CursorMove::Down, 4), corner);
        assert_eq!(step_cursor(corner, CursorMove::Right, 4), corner);
        assert_eq!(step_cursor(corner, CursorMove::Up, 4), TilePos::new(2, 3));
    }
}
