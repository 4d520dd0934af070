//! Large block digits for the score readout.
//!
//! Each glyph is 3 cells wide and 5 rows tall, drawn with full blocks.
//! Glyphs are separated by one blank column.

use crate::fb::{CellStyle, FrameBuffer};

pub const DIGIT_WIDTH: u16 = 3;
pub const DIGIT_HEIGHT: u16 = 5;
pub const DIGIT_GAP: u16 = 1;

const GLYPHS: [[&str; DIGIT_HEIGHT as usize]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];

/// Width in cells of `value` rendered as block digits.
pub fn text_width(value: u64) -> u16 {
    let n = digit_count(value);
    n * DIGIT_WIDTH + (n - 1) * DIGIT_GAP
}

fn digit_count(value: u64) -> u16 {
    let mut n = 1;
    let mut v = value / 10;
    while v > 0 {
        n += 1;
        v /= 10;
    }
    n
}

/// Draw `value` with its top-left corner at (x, y).
///
/// Only the lit cells are written, so the background shows through.
pub fn draw_number(fb: &mut FrameBuffer, x: u16, y: u16, value: u64, style: CellStyle) {
    let n = digit_count(value);
    let mut rest = value;
    // Least significant digit first, right to left.
    for i in (0..n).rev() {
        let d = (rest % 10) as usize;
        rest /= 10;
        let gx = x.saturating_add(i * (DIGIT_WIDTH + DIGIT_GAP));
        for (dy, line) in GLYPHS[d].iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch == '#' {
                    fb.put_char(gx + dx as u16, y + dy as u16, '█', style);
                }
            }
        }
    }
}
