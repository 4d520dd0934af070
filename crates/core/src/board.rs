//! Board module - the square grid of tiles
//!
//! The board is `size x size` tiles stored row-major in a flat vector.
//! Coordinates: (row, col) with row 0 at the top. Each tile is a square of
//! `WINDOW_HEIGHT / size` logical pixels, with the board anchored at the canvas origin.
//!
//! Images are dealt from ONE shuffle of the full multiset (two copies of each
//! pair image) over all cells, never per row.

use thiserror::Error;

use crate::rng::SimpleRng;
use crate::tile::Tile;
use crate::types::{ImageId, Point, Rect, TilePos, WINDOW_HEIGHT};

/// Index of a tile in row-major order.
pub type TileIndex = usize;

/// Largest number of distinct pair images an `ImageId` can address.
pub const MAX_PAIRS: usize = u8::MAX as usize + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    Empty,
    #[error("board size {0} gives an odd number of tiles; every image needs a partner")]
    OddCellCount(u8),
    #[error("board needs {needed} distinct images, at most {max} are supported")]
    TooManyPairs { needed: usize, max: usize },
    #[error("deal has {got} images, board has {expected} cells")]
    DealSize { expected: usize, got: usize },
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: u8,
    tile_px: u32,
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board with a freshly shuffled deal.
    pub fn new(size: u8, rng: &mut SimpleRng) -> Result<Self, BoardError> {
        let deal = deal_pairs(size, rng)?;
        Self::with_deal(size, &deal)
    }

    /// Build a board from an explicit row-major image assignment.
    ///
    /// The deal must contain exactly `size * size` images. Pairing is not
    /// checked here so tests can lay out specific boards.
    pub fn with_deal(size: u8, deal: &[ImageId]) -> Result<Self, BoardError> {
        let cells = validate_size(size)?;
        if deal.len() != cells {
            return Err(BoardError::DealSize {
                expected: cells,
                got: deal.len(),
            });
        }

        let tile_px = WINDOW_HEIGHT / size as u32;
        let tiles = deal
            .iter()
            .enumerate()
            .map(|(i, &image)| {
                let row = (i / size as usize) as u8;
                let col = (i % size as usize) as u8;
                let rect = Rect::new(
                    col as i32 * tile_px as i32,
                    row as i32 * tile_px as i32,
                    tile_px,
                    tile_px,
                );
                Tile::new(TilePos::new(row, col), rect, image)
            })
            .collect();

        Ok(Self {
            size,
            tile_px,
            tiles,
        })
    }

    /// Tiles per side
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Total number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of distinct pair images on the board
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    /// Tile side in logical pixels
    pub fn tile_px(&self) -> u32 {
        self.tile_px
    }

    /// Flat index of a grid position, if on the board
    pub fn index_of(&self, pos: TilePos) -> Option<TileIndex> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row as usize * self.size as usize + pos.col as usize)
    }

    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.index_of(pos).map(|i| &self.tiles[i])
    }

    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub(crate) fn tile_mut(&mut self, index: TileIndex) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Index of the tile under `point`, or None when the point is off the board
    pub fn tile_at(&self, point: Point) -> Option<TileIndex> {
        self.tiles.iter().position(|t| t.hit_test(point))
    }

    /// Row-major image assignment (the deal)
    pub fn deal(&self) -> Vec<ImageId> {
        self.tiles.iter().map(|t| t.image_identity()).collect()
    }
}

/// Check `size` and return the cell count.
fn validate_size(size: u8) -> Result<usize, BoardError> {
    if size == 0 {
        return Err(BoardError::Empty);
    }
    let cells = size as usize * size as usize;
    if cells % 2 != 0 {
        return Err(BoardError::OddCellCount(size));
    }
    if cells / 2 > MAX_PAIRS {
        return Err(BoardError::TooManyPairs {
            needed: cells / 2,
            max: MAX_PAIRS,
        });
    }
    Ok(cells)
}

/// Two copies of each of `size² / 2` images, shuffled once as a flat list.
pub fn deal_pairs(size: u8, rng: &mut SimpleRng) -> Result<Vec<ImageId>, BoardError> {
    let cells = validate_size(size)?;
    let mut deal: Vec<ImageId> = (0..cells / 2)
        .flat_map(|i| {
            let id = ImageId::new(i as u8);
            [id, id]
        })
        .collect();
    rng.shuffle(&mut deal);
    Ok(deal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size() {
        assert_eq!(validate_size(4), Ok(16));
        assert_eq!(validate_size(2), Ok(4));
        assert_eq!(validate_size(0), Err(BoardError::Empty));
        assert_eq!(validate_size(3), Err(BoardError::OddCellCount(3)));
        assert!(matches!(
            validate_size(24),
            Err(BoardError::TooManyPairs { needed: 288, .. })
        ));
    }

    #[test]
    fn test_tile_geometry() {
        let mut rng = SimpleRng::new(1);
        let board = Board::new(4, &mut rng).unwrap();
        assert_eq!(board.tile_px(), 100);

        let t = board.get(TilePos::new(2, 3)).unwrap();
        assert_eq!(t.rect(), Rect::new(300, 200, 100, 100));
        assert_eq!(t.position(), TilePos::new(2, 3));
    }

    #[test]
    fn test_index_of_bounds() {
        let board = Board::new(4, &mut SimpleRng::new(1)).unwrap();
        assert_eq!(board.index_of(TilePos::new(0, 0)), Some(0));
        assert_eq!(board.index_of(TilePos::new(1, 0)), Some(4));
        assert_eq!(board.index_of(TilePos::new(3, 3)), Some(15));
        assert_eq!(board.index_of(TilePos::new(4, 0)), None);
        assert_eq!(board.index_of(TilePos::new(0, 4)), None);
    }

    #[test]
    fn test_deal_size_mismatch() {
        let deal = vec![ImageId::new(0); 3];
        assert_eq!(
            Board::with_deal(2, &deal),
            Err(BoardError::DealSize {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_tile_at_off_board() {
        let board = Board::new(4, &mut SimpleRng::new(1)).unwrap();
        assert_eq!(board.tile_at(Point::new(450, 50)), None);
        assert_eq!(board.tile_at(Point::new(-1, 0)), None);
        assert_eq!(board.tile_at(Point::new(0, 0)), Some(0));
        assert_eq!(board.tile_at(Point::new(399, 399)), Some(15));
    }
}
