// Fixed-layout bitmap font

use glam::Vec2;

use super::texture::TextureHandle;

/// Pixel size of one glyph cell in the atlas
const GLYPH_CELL: u32 = 16;

/// Atlas dimensions in pixels
const ATLAS_SIZE: u32 = 256;

/// Glyphs per atlas row
const COLUMNS: u32 = 16;

/// First character in the atlas
const FIRST_CHAR: char = ' ';

/// Horizontal advance between glyphs, as a fraction of glyph size
const ADVANCE: f32 = 0.6;

/// Vertical drop per newline, as a fraction of glyph size
const LINE_SPACING: f32 = 1.2;

/// A positioned glyph ready to be drawn as a textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Bottom-left corner in world units
    pub position: Vec2,

    /// Edge length of the glyph quad
    pub size: f32,

    /// Top-left of the glyph cell in the atlas
    pub uv_min: Vec2,

    /// Bottom-right of the glyph cell in the atlas
    pub uv_max: Vec2,
}

/// An ASCII bitmap font on a fixed 16-column atlas, starting at the space
/// character. Cell size and atlas dimensions are renderer configuration,
/// not game state.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    /// `None` when the atlas failed to load; text then draws as nothing
    pub texture: Option<TextureHandle>,
}

impl BitmapFont {
    pub fn new(texture: Option<TextureHandle>) -> Self {
        Self { texture }
    }

    /// UV rectangle of a glyph's atlas cell. Characters before the first
    /// atlas glyph fall back to the space cell.
    pub fn glyph_uvs(c: char) -> (Vec2, Vec2) {
        let index = (c as u32).saturating_sub(FIRST_CHAR as u32);
        let column = index % COLUMNS;
        let row = index / COLUMNS;

        let cell = GLYPH_CELL as f32 / ATLAS_SIZE as f32;
        let uv_min = Vec2::new(column as f32 * cell, row as f32 * cell);

        (uv_min, uv_min + Vec2::splat(cell))
    }

    /// Lay `text` out as glyph quads, with `(x, y)` at the bottom-left of
    /// the first glyph. Newlines drop a line and reset the offset.
    pub fn layout(text: &str, x: f32, y: f32, size: f32) -> Vec<GlyphQuad> {
        let mut quads = Vec::with_capacity(text.len());
        let mut offset = 0.0;
        let mut line_y = y;

        for c in text.chars() {
            if c == '\n' {
                line_y -= size * LINE_SPACING;
                offset = 0.0;
                continue;
            }

            let (uv_min, uv_max) = Self::glyph_uvs(c);
            quads.push(GlyphQuad {
                position: Vec2::new(x + offset, line_y),
                size,
                uv_min,
                uv_max,
            });
            offset += size * ADVANCE;
        }

        quads
    }

    /// Width of the widest line at the given glyph size
    pub fn measure(text: &str, size: f32) -> f32 {
        text.lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as f32
            * size
            * ADVANCE
    }
}
