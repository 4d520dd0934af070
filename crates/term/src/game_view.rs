//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::assets::AssetSet;
use crate::core::{SessionSnapshot, TileSnapshot};
use crate::digits::{draw_number, text_width, DIGIT_HEIGHT};
use crate::fb::{BoxLine, CellStyle, FrameBuffer, Rgb};
use crate::layout::{BoardLayout, Viewport};
use crate::types::{
    RevealState, TilePos, SCORE_BOLD, SCORE_FONT_SIZE, SCORE_POSITION, TILE_BORDER_WIDTH,
};

/// Score text colour.
pub const SCORE_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Line weight of tile borders.
pub const TILE_BORDER: BoxLine = BoxLine::for_border_width(TILE_BORDER_WIDTH);

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const TILE_FILL: Rgb = Rgb::new(30, 30, 40);

/// Renders the board, tiles, and score panel.
pub struct GameView {
    border: CellStyle,
    cursor_border: CellStyle,
    matched_border: CellStyle,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            border: CellStyle::new(Rgb::new(150, 150, 160), BACKGROUND),
            cursor_border: CellStyle::new(Rgb::new(255, 220, 80), BACKGROUND).bold(),
            matched_border: CellStyle {
                dim: true,
                ..CellStyle::new(Rgb::new(90, 160, 90), BACKGROUND)
            },
        }
    }
}

impl GameView {
    /// Layout this view uses for a viewport; the frame loop maps clicks with it.
    pub fn layout(&self, snap: &SessionSnapshot, viewport: Viewport) -> BoardLayout {
        BoardLayout::new(viewport, snap.board_size)
    }

    /// Render into a fresh framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        assets: &AssetSet,
        cursor: Option<TilePos>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, assets, cursor, viewport, &mut fb);
        fb
    }

    /// Render the current session into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        assets: &AssetSet,
        cursor: Option<TilePos>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(SCORE_COLOR, BACKGROUND).into_cell(' '));

        let layout = self.layout(snap, viewport);

        for tile in &snap.tiles {
            let highlighted = cursor == Some(tile.pos);
            self.draw_tile(fb, &layout, tile, assets, highlighted);
        }

        self.draw_score_panel(fb, &layout, snap);
    }

    /// Bordered box with the face (revealed) or face-down sprite centered inside.
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        tile: &TileSnapshot,
        assets: &AssetSet,
        highlighted: bool,
    ) {
        let (x, y) = layout.tile_origin(tile.pos);
        let (w, h) = (layout.tile_cols, layout.tile_rows);

        let fill = CellStyle::new(TILE_FILL, TILE_FILL);
        fb.fill_rect(x + 1, y + 1, w.saturating_sub(2), h.saturating_sub(2), ' ', fill);

        let sprite = if tile.state.is_revealed() {
            assets.face(tile.image).unwrap_or(assets.back())
        } else {
            assets.back()
        };
        fb.blit_centered(sprite, x + 1, y + 1, w.saturating_sub(2), h.saturating_sub(2));

        let border = if highlighted {
            self.cursor_border
        } else if tile.state == RevealState::PermanentlyShown {
            self.matched_border
        } else {
            self.border
        };
        fb.draw_box(x, y, w, h, TILE_BORDER, border);
    }

    /// Elapsed seconds in large digits at the top right, pair count beneath.
    fn draw_score_panel(&self, fb: &mut FrameBuffer, layout: &BoardLayout, snap: &SessionSnapshot) {
        let panel_left = layout.origin_x + layout.board_cols() + 1;
        let canvas_right = layout.origin_x + layout.canvas_cols();

        let width = text_width(snap.score_secs);
        let x = layout
            .column_of(SCORE_POSITION.0)
            .min(canvas_right.saturating_sub(width))
            .max(panel_left);
        let y = layout.row_of(SCORE_POSITION.1);

        let mut style = CellStyle::new(SCORE_COLOR, BACKGROUND);
        style.bold = SCORE_BOLD;
        draw_number(fb, x, y, snap.score_secs, style);

        let label = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);
        let below_score = layout.row_of(SCORE_POSITION.1 + SCORE_FONT_SIZE);
        let mut line = (y + DIGIT_HEIGHT).max(below_score) + 1;
        fb.put_str(panel_left, line, "PAIRS", label.bold());
        line += 1;
        fb.put_str(
            panel_left,
            line,
            &format!("{}/{}", snap.pairs_found(), snap.pair_count),
            label,
        );

        if snap.is_over {
            line += 2;
            fb.put_str(panel_left, line, "ALL FOUND", style);
        }
    }
}
