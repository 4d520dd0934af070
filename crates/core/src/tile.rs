//! Tile module - one cell of the memory board
//!
//! A tile owns its grid position, its hit-test rectangle on the logical canvas,
//! the image it conceals, and its face state. All transitions are total: calling
//! one from the wrong state is a no-op and reports `false` where useful.

use crate::types::{ImageId, Point, Rect, RevealState, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pos: TilePos,
    rect: Rect,
    image: ImageId,
    state: RevealState,
}

impl Tile {
    /// Create a face-down tile.
    pub fn new(pos: TilePos, rect: Rect, image: ImageId) -> Self {
        Self {
            pos,
            rect,
            image,
            state: RevealState::Hidden,
        }
    }

    pub fn position(&self) -> TilePos {
        self.pos
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn image_identity(&self) -> ImageId {
        self.image
    }

    /// True iff `point` lies within the tile's rectangle.
    pub fn hit_test(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    pub fn is_hidden(&self) -> bool {
        self.state.is_hidden()
    }

    /// Face-up, either pending comparison or matched.
    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    /// Same image as `other`.
    pub fn matches(&self, other: &Tile) -> bool {
        self.image == other.image
    }

    /// Hidden -> TemporarilyShown. Returns false if the tile was not hidden.
    pub fn reveal(&mut self) -> bool {
        if self.state != RevealState::Hidden {
            return false;
        }
        self.state = RevealState::TemporarilyShown;
        true
    }

    /// TemporarilyShown -> PermanentlyShown.
    pub fn confirm_match(&mut self) -> bool {
        if self.state != RevealState::TemporarilyShown {
            return false;
        }
        self.state = RevealState::PermanentlyShown;
        true
    }

    /// TemporarilyShown -> Hidden.
    pub fn confirm_mismatch(&mut self) -> bool {
        if self.state != RevealState::TemporarilyShown {
            return false;
        }
        self.state = RevealState::Hidden;
        true
    }
}
