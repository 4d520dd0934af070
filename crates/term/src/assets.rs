//! Tile image assets.
//!
//! An [`AssetSet`] holds one face-down sprite and one face sprite per pair
//! image. The face for `ImageId(k)` is the `k`-th face loaded, so identity is
//! load order.
//!
//! Assets come from one of two places:
//!
//! - [`AssetSet::builtin`]: coloured symbols generated in code
//! - [`AssetSet::load_dir`]: `image0.bmp` (face-down) and `image1.bmp` ..
//!   `imageN.bmp` (faces) decoded with the `image` crate and downsampled to
//!   `SPRITE_COLS x SPRITE_ROWS` cells, two pixel rows per cell
//!
//! A missing or undecodable file is an [`AssetError`]; the game refuses to
//! start with a partial set.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

use crate::fb::{Cell, CellStyle, Rgb, Sprite};
use crate::types::ImageId;

/// Sprite width in cells.
pub const SPRITE_COLS: u16 = 8;

/// Sprite height in cells.
pub const SPRITE_ROWS: u16 = 4;

/// Number of distinct built-in faces.
pub const BUILTIN_FACES: usize = PALETTE.len() * SYMBOLS.len();

const PALETTE: [Rgb; 8] = [
    Rgb::new(200, 60, 60),
    Rgb::new(60, 150, 220),
    Rgb::new(80, 180, 90),
    Rgb::new(230, 190, 50),
    Rgb::new(170, 90, 200),
    Rgb::new(240, 140, 40),
    Rgb::new(50, 190, 180),
    Rgb::new(220, 100, 160),
];

const SYMBOLS: [char; 8] = ['♥', '♠', '♦', '♣', '★', '●', '▲', '■'];

/// Upper half block: foreground paints the top pixel, background the bottom one.
const HALF_BLOCK: char = '▀';

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing image asset: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to decode image asset {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("board needs {needed} face images, only {available} available")]
    NotEnough { needed: usize, available: usize },
}

/// File name of the asset loaded at `index` (0 is the face-down placeholder).
pub fn asset_file_name(index: usize) -> String {
    format!("image{index}.bmp")
}

#[derive(Debug, Clone)]
pub struct AssetSet {
    back: Sprite,
    faces: Vec<Sprite>,
}

impl AssetSet {
    /// Generated sprites for `pair_count` faces.
    pub fn builtin(pair_count: usize) -> Result<Self, AssetError> {
        if pair_count > BUILTIN_FACES {
            return Err(AssetError::NotEnough {
                needed: pair_count,
                available: BUILTIN_FACES,
            });
        }
        Ok(Self {
            back: builtin_back(),
            faces: (0..pair_count).map(builtin_face).collect(),
        })
    }

    /// Load `image0.bmp ..= image{pair_count}.bmp` from `dir`.
    pub fn load_dir(dir: &Path, pair_count: usize) -> Result<Self, AssetError> {
        let back = load_sprite(&dir.join(asset_file_name(0)))?;
        let faces = (1..=pair_count)
            .map(|i| load_sprite(&dir.join(asset_file_name(i))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { back, faces })
    }

    pub fn back(&self) -> &Sprite {
        &self.back
    }

    pub fn face(&self, id: ImageId) -> Option<&Sprite> {
        self.faces.get(id.index())
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sprite_from_image(&img))
}

/// Downsample an image to a sprite, packing two pixel rows into each cell.
pub fn sprite_from_image(img: &DynamicImage) -> Sprite {
    let w = SPRITE_COLS as u32;
    let h = SPRITE_ROWS as u32 * 2;
    let small = img.resize_exact(w, h, FilterType::Triangle).to_rgb8();

    let mut cells = Vec::with_capacity((SPRITE_COLS * SPRITE_ROWS) as usize);
    for row in 0..SPRITE_ROWS as u32 {
        for col in 0..w {
            let [tr, tg, tb] = small.get_pixel(col, row * 2).0;
            let [br, bg, bb] = small.get_pixel(col, row * 2 + 1).0;
            let style = CellStyle::new(Rgb::new(tr, tg, tb), Rgb::new(br, bg, bb));
            cells.push(style.into_cell(HALF_BLOCK));
        }
    }
    Sprite::new(SPRITE_COLS, SPRITE_ROWS, cells)
}

/// Face `i`: colour `i % 8`, symbol shifted by `i / 8` so that every
/// (colour, symbol) combination is used before any repeats.
fn builtin_face(i: usize) -> Sprite {
    let color = PALETTE[i % PALETTE.len()];
    let symbol = SYMBOLS[(i + i / PALETTE.len()) % SYMBOLS.len()];

    let fill = CellStyle::new(Rgb::new(255, 255, 255), color);
    let mut sprite = Sprite::filled(SPRITE_COLS, SPRITE_ROWS, fill.into_cell(' '));
    let glyph = fill.bold().into_cell(symbol);
    let (cx, cy) = (SPRITE_COLS / 2, SPRITE_ROWS / 2);
    for (x, y) in [(cx - 2, cy - 1), (cx + 1, cy - 1), (cx - 1, cy), (cx, cy)] {
        sprite.set(x, y, glyph);
    }
    sprite
}

fn builtin_back() -> Sprite {
    let hatch = CellStyle::new(Rgb::new(110, 110, 140), Rgb::new(45, 45, 70));
    let mut sprite = Sprite::filled(SPRITE_COLS, SPRITE_ROWS, hatch.into_cell('░'));
    let mark = CellStyle::new(Rgb::new(200, 200, 230), Rgb::new(45, 45, 70)).bold();
    sprite.set(SPRITE_COLS / 2 - 1, SPRITE_ROWS / 2 - 1, Cell { ch: '?', style: mark });
    sprite.set(SPRITE_COLS / 2, SPRITE_ROWS / 2, Cell { ch: '?', style: mark });
    sprite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_faces_are_distinct() {
        let set = AssetSet::builtin(BUILTIN_FACES).unwrap();
        for a in 0..BUILTIN_FACES {
            for b in (a + 1)..BUILTIN_FACES {
                assert_ne!(
                    set.faces[a], set.faces[b],
                    "faces {a} and {b} should differ"
                );
            }
        }
    }

    #[test]
    fn builtin_rejects_too_many_pairs() {
        assert!(matches!(
            AssetSet::builtin(BUILTIN_FACES + 1),
            Err(AssetError::NotEnough { .. })
        ));
    }

    #[test]
    fn face_lookup_is_load_order() {
        let set = AssetSet::builtin(8).unwrap();
        assert_eq!(set.face_count(), 8);
        assert_eq!(set.face(ImageId::new(3)), Some(&builtin_face(3)));
        assert_eq!(set.face(ImageId::new(8)), None);
    }

    #[test]
    fn sprite_from_image_packs_half_blocks() {
        // Top half red, bottom half blue.
        let img = image::RgbImage::from_fn(16, 16, |_, y| {
            if y < 8 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        let sprite = sprite_from_image(&DynamicImage::ImageRgb8(img));
        assert_eq!(sprite.width(), SPRITE_COLS);
        assert_eq!(sprite.height(), SPRITE_ROWS);

        let top = sprite.get(0, 0).unwrap();
        assert_eq!(top.ch, HALF_BLOCK);
        assert_eq!(top.style.fg, Rgb::new(255, 0, 0));
        assert_eq!(top.style.bg, Rgb::new(255, 0, 0));

        let bottom = sprite.get(0, SPRITE_ROWS - 1).unwrap();
        assert_eq!(bottom.style.fg, Rgb::new(0, 0, 255));
    }

    #[test]
    fn missing_dir_reports_first_file() {
        let dir = std::env::temp_dir().join("tui-memory-no-such-assets");
        match AssetSet::load_dir(&dir, 8) {
            Err(AssetError::Missing { path }) => assert!(path.ends_with("image0.bmp")),
            other => panic!("expected Missing, got {other:?}"),
        }
    }
}
