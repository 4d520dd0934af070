use tui_memory::core::{GameSession, SessionConfig};
use tui_memory::term::{AssetSet, BoardLayout, FrameBuffer, GameView, Viewport};
use tui_memory::types::{RevealState, TilePos, PAIR_COUNT};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

fn session(size: u8) -> GameSession {
    let config = SessionConfig {
        board_size: size,
        ..SessionConfig::default()
    };
    GameSession::new(config, 1).unwrap()
}

#[test]
fn term_view_draws_score_top_right() {
    let mut snap = session(4).snapshot();
    snap.score_secs = 12;
    let assets = AssetSet::builtin(PAIR_COUNT).unwrap();
    let fb = GameView::default().render(&snap, &assets, None, Viewport::new(60, 24));

    // "1" then "2", right-aligned against the canvas edge.
    assert_eq!(fb.get(54, 0).unwrap().ch, '█');
    assert_eq!(fb.get(53, 0).unwrap().ch, ' ');
    for x in 57..60 {
        assert_eq!(fb.get(x, 0).unwrap().ch, '█');
    }
}

#[test]
fn term_view_keeps_long_scores_on_the_panel() {
    let mut snap = session(4).snapshot();
    snap.score_secs = 123;
    let assets = AssetSet::builtin(PAIR_COUNT).unwrap();
    let fb = GameView::default().render(&snap, &assets, None, Viewport::new(60, 24));

    // Board ends at column 48; nothing of the score may overwrite it.
    assert_eq!(fb.get(47, 0).unwrap().ch, '┓');
    assert_eq!(fb.get(49, 0).unwrap().ch, ' ');
    assert_eq!(fb.get(50, 0).unwrap().ch, '█');
}

#[test]
fn term_view_shows_faces_only_for_revealed_tiles() {
    let mut snap = session(4).snapshot();
    snap.tiles[0].state = RevealState::TemporarilyShown;
    snap.tiles[5].state = RevealState::PermanentlyShown;
    let assets = AssetSet::builtin(PAIR_COUNT).unwrap();
    let fb = GameView::default().render(&snap, &assets, None, Viewport::new(60, 24));

    let layout = BoardLayout::new(Viewport::new(60, 24), 4);
    let face_down = |pos: TilePos| {
        let (x, y) = layout.tile_origin(pos);
        fb.get(x + 2, y + 1).unwrap().ch == '░'
    };

    assert!(!face_down(TilePos::new(0, 0)));
    assert!(!face_down(TilePos::new(1, 1)));
    assert!(face_down(TilePos::new(0, 1)));
    assert!(face_down(TilePos::new(3, 3)));
}

#[test]
fn term_view_centers_canvas_in_large_terminal() {
    let snap = session(4).snapshot();
    let assets = AssetSet::builtin(PAIR_COUNT).unwrap();
    let fb = GameView::default().render(&snap, &assets, None, Viewport::new(80, 30));

    assert_eq!(fb.get(10, 3).unwrap().ch, '┏');
    assert_eq!(fb.get(9, 3).unwrap().ch, ' ');
}

#[test]
fn term_view_scales_tiles_with_board_size() {
    let snap = session(6).snapshot();
    let assets = AssetSet::builtin(18).unwrap();
    let fb = GameView::default().render(&snap, &assets, None, Viewport::new(61, 24));

    // 6x6 board: 8x4 cells per tile.
    assert_eq!(fb.get(0, 0).unwrap().ch, '┏');
    assert_eq!(fb.get(7, 0).unwrap().ch, '┓');
    assert_eq!(fb.get(8, 0).unwrap().ch, '┏');
    assert_eq!(fb.get(0, 4).unwrap().ch, '┏');
}

#[test]
fn term_view_announces_game_over() {
    let mut snap = session(4).snapshot();
    for t in &mut snap.tiles {
        t.state = RevealState::PermanentlyShown;
    }
    snap.matched_count = 16;
    snap.is_over = true;
    let assets = AssetSet::builtin(PAIR_COUNT).unwrap();
    let text = screen_text(&GameView::default().render(&snap, &assets, None, Viewport::new(60, 24)));

    assert!(text.contains("8/8"));
    assert!(text.contains("ALL FOUND"));
    assert!(!text.contains('░'));
}

#[test]
fn term_view_highlights_cursor_tile() {
    let snap = session(4).snapshot();
    let assets = AssetSet::builtin(PAIR_COUNT).unwrap();
    let view = GameView::default();
    let plain = view.render(&snap, &assets, None, Viewport::new(60, 24));
    let marked = view.render(&snap, &assets, Some(TilePos::new(1, 2)), Viewport::new(60, 24));

    // Same glyphs, different border style on tile (1,2) only.
    assert_eq!(screen_text(&plain), screen_text(&marked));
    assert_ne!(plain.get(24, 6), marked.get(24, 6));
    assert_eq!(plain.get(0, 0), marked.get(0, 0));
}
