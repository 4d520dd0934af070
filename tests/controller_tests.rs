//! Frame loop tests against in-memory surface, input, and clock.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use tui_memory::controller::{Clock, EventSource, Surface};
use tui_memory::core::{Board, GameSession};
use tui_memory::input::EventBatch;
use tui_memory::term::{AssetSet, FrameBuffer, Viewport};
use tui_memory::types::{
    CursorMove, ImageId, InputEvent, RevealState, TilePos, FRAME_MS, MISMATCH_DELAY_MS, PAIR_COUNT,
};
use tui_memory::{Controller, ExitStatus, MismatchPause};

#[derive(Default)]
struct RecordingSurface {
    frames: Vec<FrameBuffer>,
    invalidations: usize,
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(60, 24)
    }

    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.frames.push(fb.clone());
        Ok(())
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

/// One batch of events per frame; empty once the script runs out.
#[derive(Default)]
struct ScriptedEvents {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn drain_into(&mut self, out: &mut EventBatch) -> Result<()> {
        if let Some(events) = self.frames.pop_front() {
            out.extend(events);
        }
        Ok(())
    }
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    slept: Vec<Duration>,
}

/// Manual clock; sleeping advances time instantly.
#[derive(Clone, Default)]
struct ManualClock(Rc<RefCell<ClockState>>);

impl ManualClock {
    fn advance(&self, by: Duration) {
        self.0.borrow_mut().now += by;
    }

    fn slept(&self) -> Vec<Duration> {
        self.0.borrow().slept.clone()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.0.borrow().now
    }

    fn sleep(&mut self, duration: Duration) {
        let mut state = self.0.borrow_mut();
        state.slept.push(duration);
        state.now += duration;
    }
}

type TestController = Controller<RecordingSurface, ScriptedEvents, ManualClock>;

/// row r = [2r, 2r, 2r+1, 2r+1]
fn paired_columns() -> Board {
    let deal: Vec<ImageId> = (0..4u8)
        .flat_map(|r| {
            let (a, b) = (ImageId::new(2 * r), ImageId::new(2 * r + 1));
            [a, a, b, b]
        })
        .collect();
    Board::with_deal(4, &deal).unwrap()
}

/// row r = [2r, 2r+1, 2r, 2r+1]
fn alternating() -> Board {
    let deal: Vec<ImageId> = (0..4u8)
        .flat_map(|r| {
            let (a, b) = (ImageId::new(2 * r), ImageId::new(2 * r + 1));
            [a, b, a, b]
        })
        .collect();
    Board::with_deal(4, &deal).unwrap()
}

/// Release inside the tile at (row, col) for a 60x24 viewport (12x6 cells per tile).
fn click(row: u16, col: u16) -> InputEvent {
    InputEvent::PointerRelease {
        column: col * 12 + 5,
        row: row * 6 + 2,
    }
}

fn controller(
    board: Board,
    pause: MismatchPause,
    script: Vec<Vec<InputEvent>>,
    clock: &ManualClock,
) -> TestController {
    Controller::new(
        GameSession::with_board(board, MISMATCH_DELAY_MS),
        AssetSet::builtin(PAIR_COUNT).unwrap(),
        RecordingSurface::default(),
        ScriptedEvents::new(script),
        clock.clone(),
        pause,
        60,
    )
}

fn state(c: &TestController, row: u8, col: u8) -> RevealState {
    c.session().board().get(TilePos::new(row, col)).unwrap().state()
}

#[test]
fn close_ends_the_loop() {
    let clock = ManualClock::default();
    let mut c = controller(
        paired_columns(),
        MismatchPause::Blocking,
        vec![vec![InputEvent::Close]],
        &clock,
    );

    let status = c.run().unwrap();
    assert_eq!(
        status,
        ExitStatus::Abandoned {
            pairs_found: 0,
            elapsed_secs: 0
        }
    );
    assert_eq!(c.frames(), 1);
    assert!(c.surface().frames.is_empty());
}

#[test]
fn blocking_mismatch_shows_pair_then_hides_it() {
    let clock = ManualClock::default();
    let mut c = controller(
        alternating(),
        MismatchPause::Blocking,
        vec![vec![click(0, 0), click(0, 1)], vec![InputEvent::Close]],
        &clock,
    );

    c.run().unwrap();

    assert!(clock.slept().contains(&Duration::from_millis(MISMATCH_DELAY_MS as u64)));
    assert_eq!(state(&c, 0, 0), RevealState::Hidden);
    assert_eq!(state(&c, 0, 1), RevealState::Hidden);
    assert_eq!(c.session().matched_count(), 0);

    // The frame drawn before the pause shows both faces; the next one does not.
    let frames = &c.surface().frames;
    assert_eq!(frames.len(), 2);
    assert_ne!(frames[0].get(2, 1).unwrap().ch, '░');
    assert_ne!(frames[0].get(14, 1).unwrap().ch, '░');
    assert_eq!(frames[1].get(2, 1).unwrap().ch, '░');
    assert_eq!(frames[1].get(14, 1).unwrap().ch, '░');
}

#[test]
fn timed_mismatch_counts_down_over_frames() {
    let clock = ManualClock::default();
    let mut c = controller(
        alternating(),
        MismatchPause::Timed,
        vec![vec![click(0, 0), click(0, 1)], vec![], vec![click(3, 3)]],
        &clock,
    );

    for _ in 0..10 {
        assert!(c.frame().unwrap());
    }
    assert!(c.session().is_resolving());
    assert_eq!(state(&c, 0, 0), RevealState::TemporarilyShown);
    // Dropped while the pair is pending.
    assert_eq!(state(&c, 3, 3), RevealState::Hidden);

    // Frames are paced at FRAME_MS; this is enough of them to cover the delay.
    for _ in 0..MISMATCH_DELAY_MS / FRAME_MS {
        c.frame().unwrap();
    }
    assert!(!c.session().is_resolving());
    assert_eq!(state(&c, 0, 0), RevealState::Hidden);
    assert_eq!(state(&c, 0, 1), RevealState::Hidden);
    assert!(!clock.slept().contains(&Duration::from_millis(MISMATCH_DELAY_MS as u64)));
}

#[test]
fn score_tracks_time_then_freezes() {
    let clock = ManualClock::default();
    let solve: Vec<InputEvent> = (0..4)
        .flat_map(|row| [click(row, 0), click(row, 1), click(row, 2), click(row, 3)])
        .collect();
    let mut c = controller(
        paired_columns(),
        MismatchPause::Blocking,
        vec![vec![], vec![], solve],
        &clock,
    );

    c.frame().unwrap();
    assert_eq!(c.session().score(), 0);
    clock.advance(Duration::from_secs(5));
    c.frame().unwrap();
    assert_eq!(c.session().score(), 5);

    // Every pair found in this frame.
    c.frame().unwrap();
    assert!(c.session().is_over());

    clock.advance(Duration::from_secs(30));
    c.frame().unwrap();
    assert_eq!(c.session().score(), 5);
    assert_eq!(c.exit_status(), ExitStatus::Completed { score_secs: 5 });
}

#[test]
fn winning_click_records_its_own_time() {
    let clock = ManualClock::default();
    let solve: Vec<InputEvent> = (0..4)
        .flat_map(|row| [click(row, 0), click(row, 1), click(row, 2), click(row, 3)])
        .collect();
    let mut c = controller(
        paired_columns(),
        MismatchPause::Blocking,
        vec![vec![], vec![], solve],
        &clock,
    );

    c.frame().unwrap();
    clock.advance(Duration::from_millis(4_990));
    c.frame().unwrap();
    assert_eq!(c.session().score(), 4);

    // The board is cleared in a frame that starts past the 5 second mark.
    clock.advance(Duration::from_millis(20));
    c.frame().unwrap();
    assert!(c.session().is_over());
    assert_eq!(c.session().elapsed(), Duration::from_millis(5_010));
    assert_eq!(c.exit_status(), ExitStatus::Completed { score_secs: 5 });
}

#[test]
fn keyboard_cursor_selects_tiles() {
    let clock = ManualClock::default();
    let mut c = controller(
        paired_columns(),
        MismatchPause::Blocking,
        vec![vec![
            InputEvent::Select,
            InputEvent::Cursor(CursorMove::Right),
            InputEvent::Select,
            InputEvent::Cursor(CursorMove::Down),
        ]],
        &clock,
    );

    c.frame().unwrap();
    assert_eq!(c.session().matched_count(), 2);
    assert_eq!(state(&c, 0, 1), RevealState::PermanentlyShown);
    assert_eq!(c.cursor(), Some(TilePos::new(1, 1)));
}

#[test]
fn clicks_outside_the_board_do_nothing() {
    let clock = ManualClock::default();
    let mut c = controller(
        paired_columns(),
        MismatchPause::Blocking,
        vec![vec![
            // Score panel
            InputEvent::PointerRelease { column: 55, row: 2 },
            // Past the canvas
            InputEvent::PointerRelease { column: 70, row: 30 },
        ]],
        &clock,
    );
    let before = c.session().snapshot();
    c.frame().unwrap();
    assert_eq!(c.session().snapshot(), before);
}

#[test]
fn resize_forces_full_redraw() {
    let clock = ManualClock::default();
    let mut c = controller(
        paired_columns(),
        MismatchPause::Blocking,
        vec![vec![InputEvent::Resize {
            width: 100,
            height: 40,
        }]],
        &clock,
    );
    c.frame().unwrap();
    assert_eq!(c.surface().invalidations, 1);
}
