//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a size change or [`TerminalRenderer::invalidate`])
//! is a full redraw. Every other frame only rewrites runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::layout::Viewport;

/// Window title shown by terminals that support it.
pub const WINDOW_TITLE: &str = "Memory";

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            active: false,
        }
    }

    /// Raw mode, alternate screen, mouse capture.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(terminal::SetTitle(WINDOW_TITLE))?;
        self.stdout.queue(EnableMouseCapture)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(DisableMouseCapture)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Current terminal size (80x24 if it cannot be read).
    pub fn viewport(&self) -> Viewport {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        Viewport::new(w, h)
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// The renderer diffs against the previous frame and then swaps buffers
    /// so the caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                self.diff_redraw(fb, &prev)?;
                prev
            }
            Some(mut prev) => {
                self.full_redraw(fb)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                self.full_redraw(fb)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn full_redraw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        let mut pen = None;
        for y in 0..fb.height() {
            self.write_run(fb, 0, y, fb.width(), &mut pen)?;
        }
        self.finish_frame()
    }

    fn diff_redraw(&mut self, next: &FrameBuffer, prev: &FrameBuffer) -> Result<()> {
        let mut pen = None;
        for_each_changed_run(prev, next, |x, y, len| self.write_run(next, x, y, len, &mut pen))?;
        self.finish_frame()
    }

    /// Print `len` cells of row `y` starting at column `x`.
    ///
    /// `pen` is the style last sent to the terminal; it is only re-sent on change.
    fn write_run(
        &mut self,
        fb: &FrameBuffer,
        x: u16,
        y: u16,
        len: u16,
        pen: &mut Option<CellStyle>,
    ) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(x, y))?;
        for cx in x..x.saturating_add(len) {
            let cell = fb.get(cx, y).unwrap_or_default();
            if *pen != Some(cell.style) {
                self.apply_style(cell.style)?;
                *pen = Some(cell.style);
            }
            self.stdout.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish_frame(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        // Reset first: it clears colours as well as bold/dim.
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        self.stdout.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        for (on, attr) in [(style.bold, Attribute::Bold), (style.dim, Attribute::Dim)] {
            if on {
                self.stdout.queue(SetAttribute(attr))?;
            }
        }
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ between frames.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}
