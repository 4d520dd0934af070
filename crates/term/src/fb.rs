//! Framebuffer, style, and sprite types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// A small pre-rendered block of cells (a tile image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Sprite {
    /// Build a sprite from row-major cells. Missing cells are padded with blanks.
    pub fn new(width: u16, height: u16, mut cells: Vec<Cell>) -> Self {
        cells.resize((width as usize) * (height as usize), Cell::default());
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        Self::new(width, height, vec![cell; (width as usize) * (height as usize)])
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[(y as usize) * (self.width as usize) + (x as usize)] = cell;
        }
    }
}

/// Line weight of a box outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxLine {
    Light,
    Heavy,
}

impl BoxLine {
    /// Heavy lines for borders wider than one logical pixel.
    pub const fn for_border_width(px: u32) -> Self {
        if px > 1 {
            BoxLine::Heavy
        } else {
            BoxLine::Light
        }
    }

    /// Corners (top-left, top-right, bottom-left, bottom-right), then horizontal and vertical edges.
    fn glyphs(self) -> [char; 6] {
        match self {
            BoxLine::Light => ['┌', '┐', '└', '┘', '─', '│'],
            BoxLine::Heavy => ['┏', '┓', '┗', '┛', '━', '┃'],
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Box outline. Boxes smaller than 2x2 are skipped.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, line: BoxLine, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let [tl, tr, bl, br, horiz, vert] = line.glyphs();

        self.put_char(x, y, tl, style);
        self.put_char(x + w - 1, y, tr, style);
        self.put_char(x, y + h - 1, bl, style);
        self.put_char(x + w - 1, y + h - 1, br, style);

        for dx in 1..w - 1 {
            self.put_char(x + dx, y, horiz, style);
            self.put_char(x + dx, y + h - 1, horiz, style);
        }
        for dy in 1..h - 1 {
            self.put_char(x, y + dy, vert, style);
            self.put_char(x + w - 1, y + dy, vert, style);
        }
    }

    /// Draw `sprite` centered in the `w x h` area at (x, y).
    ///
    /// A sprite larger than the area is cropped around its center.
    pub fn blit_centered(&mut self, sprite: &Sprite, x: u16, y: u16, w: u16, h: u16) {
        let off_x = (w as i32 - sprite.width() as i32) / 2;
        let off_y = (h as i32 - sprite.height() as i32) / 2;

        for sy in 0..sprite.height() {
            let ty = off_y + sy as i32;
            if ty < 0 || ty >= h as i32 {
                continue;
            }
            for sx in 0..sprite.width() {
                let tx = off_x + sx as i32;
                if tx < 0 || tx >= w as i32 {
                    continue;
                }
                if let Some(cell) = sprite.get(sx, sy) {
                    self.set(x + tx as u16, y + ty as u16, cell);
                }
            }
        }
    }
}
