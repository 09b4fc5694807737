//! 8x8 bitmap font and glyph blitter.
//!
//! Each glyph is 8 rows of 8 bits; the most significant bit is the leftmost
//! pixel. Only the ramp and edge glyphs are present.

use super::stripes::CanvasRows;
use crate::config::Rgb;

/// Glyph bitmap width and height in pixels.
pub const GLYPH_SIZE: usize = 8;

pub type GlyphBitmap = [u8; GLYPH_SIZE];

/// Look up the bitmap for a character. Returns `None` for characters the font
/// does not cover.
pub fn glyph_bitmap(ch: char) -> Option<&'static GlyphBitmap> {
    const SPACE: GlyphBitmap = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    const DOT: GlyphBitmap = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x00];
    const LOWER_I: GlyphBitmap = [0x00, 0x0C, 0x00, 0x0C, 0x0C, 0x0C, 0x0C, 0x00];
    const LOWER_C: GlyphBitmap = [0x00, 0x00, 0x1C, 0x20, 0x20, 0x20, 0x1C, 0x00];
    const LOWER_O: GlyphBitmap = [0x00, 0x00, 0x18, 0x24, 0x24, 0x24, 0x18, 0x00];
    const UPPER_P: GlyphBitmap = [0x00, 0x38, 0x24, 0x38, 0x20, 0x20, 0x3E, 0x00];
    const UPPER_O: GlyphBitmap = [0x00, 0x18, 0x24, 0x24, 0x24, 0x24, 0x18, 0x00];
    const QUESTION: GlyphBitmap = [0x00, 0x38, 0x44, 0x04, 0x08, 0x00, 0x08, 0x00];
    const AT: GlyphBitmap = [0x00, 0x18, 0x24, 0x2A, 0x2A, 0x20, 0x1C, 0x00];
    const HASH: GlyphBitmap = [0x00, 0x3C, 0x3C, 0x3C, 0x3C, 0x3C, 0x3C, 0x00];
    const PIPE: GlyphBitmap = [0x00, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x00];
    const DASH: GlyphBitmap = [0x00, 0x00, 0x00, 0x3C, 0x3C, 0x00, 0x00, 0x00];
    const SLASH: GlyphBitmap = [0x00, 0x04, 0x08, 0x08, 0x10, 0x10, 0x20, 0x00];
    const BACKSLASH: GlyphBitmap = [0x00, 0x20, 0x10, 0x10, 0x08, 0x08, 0x04, 0x00];

    match ch {
        ' ' => Some(&SPACE),
        '.' => Some(&DOT),
        'i' => Some(&LOWER_I),
        'c' => Some(&LOWER_C),
        'o' => Some(&LOWER_O),
        'P' => Some(&UPPER_P),
        'O' => Some(&UPPER_O),
        '?' => Some(&QUESTION),
        '@' => Some(&AT),
        '#' => Some(&HASH),
        '|' => Some(&PIPE),
        '-' => Some(&DASH),
        '/' => Some(&SLASH),
        '\\' => Some(&BACKSLASH),
        _ => None,
    }
}

/// Number of lit pixels in a glyph.
pub fn coverage(bitmap: &GlyphBitmap) -> u32 {
    bitmap.iter().map(|row| row.count_ones()).sum()
}

/// Draw `ch` with its top-left corner at (`x`, `y`), clipped to the canvas.
///
/// Only lit bits are written; unlit pixels keep whatever the canvas holds.
/// Unknown characters draw nothing. Returns whether a bitmap was found.
pub fn blit_glyph(canvas: &mut CanvasRows<'_>, x: usize, y: usize, ch: char, color: Rgb) -> bool {
    let Some(bitmap) = glyph_bitmap(ch) else {
        return false;
    };

    let max_y = (y + GLYPH_SIZE).min(canvas.row_end());
    let max_x = (x + GLYPH_SIZE).min(canvas.width());

    for py in y.max(canvas.first_row())..max_y {
        let bits = bitmap[py - y];
        if bits == 0 {
            continue;
        }
        for px in x..max_x {
            let bit = 7 - (px - x);
            if (bits >> bit) & 1 == 1 {
                canvas.set_pixel(px, py, color);
            }
        }
    }

    true
}
