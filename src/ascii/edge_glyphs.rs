//! Edge pass: stamps orientation glyphs on cells with a strong edge.
//!
//! Edge data lives at reduced resolution. Each reduced pixel maps back to a
//! full-resolution cell by scaling and flooring to the cell grid; the mapping
//! is injective, so every reduced row lands in at most one cell row and a
//! stripe only ever reads the reduced rows of its own cells.

use super::charset::EdgeOrientation;
use super::color::CellPalette;
use super::edges::EdgeData;
use super::font::blit_glyph;
use super::grid::{GlyphCell, RenderSource};
use super::stripes::Stripe;
use crate::config::CELL_SIZE;

/// Minimum gradient magnitude for an edge glyph, scaled by the downscale
/// ratio to compensate for attenuation after blur and downscale.
pub fn magnitude_threshold(full_width: usize, reduced_width: usize) -> f32 {
    if reduced_width == 0 {
        return f32::INFINITY;
    }
    30.0 * (full_width as f32 / reduced_width as f32)
}

/// Map a reduced-resolution coordinate to the full-resolution pixel
/// coordinate of its cell (a multiple of `CELL_SIZE`).
#[inline]
pub fn to_cell_origin(reduced: usize, full_len: usize, reduced_len: usize) -> usize {
    if reduced_len == 0 {
        return 0;
    }
    (reduced * full_len / reduced_len) / CELL_SIZE * CELL_SIZE
}

pub struct EdgePainter<'a> {
    edges: &'a EdgeData,
    full_width: usize,
    threshold: f32,
    /// Reduced row feeding each cell row, if any
    row_sources: Vec<Option<usize>>,
    palette: CellPalette<'a>,
}

impl<'a> EdgePainter<'a> {
    pub fn new(
        edges: &'a EdgeData,
        full_width: usize,
        full_height: usize,
        palette: CellPalette<'a>,
    ) -> Self {
        let cell_rows = full_height / CELL_SIZE;
        let mut row_sources = vec![None; cell_rows];
        for i in 0..edges.height {
            let row = to_cell_origin(i, full_height, edges.height) / CELL_SIZE;
            if let Some(slot) = row_sources.get_mut(row) {
                *slot = Some(i);
            }
        }

        Self {
            edges,
            full_width,
            threshold: magnitude_threshold(full_width, edges.width),
            row_sources,
            palette,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Classify the reduced pixel (`x`, `y`), or `None` when it is not an
    /// edge or its gradient is too weak.
    pub fn classify(&self, x: usize, y: usize) -> Option<EdgeOrientation> {
        if !self.edges.is_edge(x, y) {
            return None;
        }
        let (gx, gy) = self.edges.gradient(x, y);
        let magnitude = (gx * gx + gy * gy).sqrt();
        if magnitude < self.threshold {
            return None;
        }
        Some(EdgeOrientation::from_gradient(gx, gy))
    }

    /// Paint every edge cell in the stripe's rows. Returns the number of
    /// cells claimed.
    pub fn paint(&self, stripe: &mut Stripe<'_>) -> usize {
        let cols = self.full_width / CELL_SIZE;
        let mut painted = 0;

        for cell_row in stripe.cell_rows.clone() {
            let Some(i) = self.row_sources.get(cell_row).copied().flatten() else {
                continue;
            };
            let y = cell_row * CELL_SIZE;

            for j in 0..self.edges.width {
                let Some(orientation) = self.classify(j, i) else {
                    continue;
                };
                let x = to_cell_origin(j, self.full_width, self.edges.width);
                let col = x / CELL_SIZE;
                if col >= cols || stripe.mask.is_occupied(x, y) {
                    continue;
                }

                let glyph = orientation.glyph();
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
                        source: RenderSource::Edge,
                    },
                );
                painted += 1;
            }
        }

        painted
    }
}
