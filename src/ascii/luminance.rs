//! Luminance pass: fills every cell the edge pass left free with a ramp glyph.

use super::charset::ramp_glyph;
use super::color::CellPalette;
use super::font::blit_glyph;
use super::grid::{GlyphCell, RenderSource};
use super::stripes::Stripe;
use crate::config::CELL_SIZE;
use crate::frame::Frame;

/// Mean luminance of the whole cell with top-left pixel (`x`, `y`) in a
/// single-channel frame.
pub fn cell_luminance(gray: &Frame, x: usize, y: usize) -> u8 {
    debug_assert_eq!(gray.channels(), 1);
    let sum: u32 = (y..y + CELL_SIZE)
        .map(|py| {
            gray.row(py)[x..x + CELL_SIZE]
                .iter()
                .map(|&v| v as u32)
                .sum::<u32>()
        })
        .sum();
    (sum / (CELL_SIZE * CELL_SIZE) as u32).min(255) as u8
}

pub struct LuminancePainter<'a> {
    gray: &'a Frame,
    palette: CellPalette<'a>,
}

impl<'a> LuminancePainter<'a> {
    /// `gray` is the full-resolution luminance frame.
    pub fn new(gray: &'a Frame, palette: CellPalette<'a>) -> Self {
        Self { gray, palette }
    }

    /// Paint every unoccupied cell in the stripe's rows. Returns the number
    /// of cells painted.
    pub fn paint(&self, stripe: &mut Stripe<'_>) -> usize {
        let cols = self.gray.width as usize / CELL_SIZE;
        let mut painted = 0;

        for cell_row in stripe.cell_rows.clone() {
            let y = cell_row * CELL_SIZE;
            for col in 0..cols {
                let x = col * CELL_SIZE;
                if stripe.mask.is_occupied(x, y) {
                    continue;
                }

                let glyph = ramp_glyph(cell_luminance(self.gray, x, y));
                blit_glyph(
                    &mut stripe.canvas,
                    x,
                    y,
                    glyph,
                    self.palette.color(col, cell_row),
                );
                stripe.mask.mark_cell(x, y);
                stripe.glyphs.set(
                    col,
                    cell_row,
                    GlyphCell {
                        glyph,
                        source: RenderSource::Luminance,
                    },
                );
                painted += 1;
            }
        }

        painted
    }
}
