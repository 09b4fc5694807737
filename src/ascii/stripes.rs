//! Row-stripe scheduling for the parallel painting passes.
//!
//! The cell grid is cut into stripes of whole cell rows. Each stripe owns
//! disjoint mutable slices of the output frame, the occupancy mask and the
//! glyph grid, so stripes run on the rayon pool without locks.

use std::ops::Range;

use rayon::prelude::*;

use super::grid::{GlyphGrid, GridRows};
use super::occupancy::{OccupancyMask, OccupancyRows};
use crate::config::{Rgb, CELL_SIZE};
use crate::frame::Frame;

/// Number of stripes for `cell_rows` rows of work on `threads` workers.
///
/// Capped at twice the worker count to bound dispatch overhead on tall frames.
pub fn stripe_count(cell_rows: usize, threads: usize) -> usize {
    cell_rows.min(threads.saturating_mul(2)).max(1)
}

/// Split `len` items into `parts` near-equal consecutive ranges.
pub fn stripe_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let per = len.div_ceil(parts.max(1));
    (0..len)
        .step_by(per)
        .map(|start| start..(start + per).min(len))
        .collect()
}

/// Mutable RGB view over a contiguous range of frame rows.
///
/// Coordinates are absolute frame coordinates; writes outside the range are
/// dropped.
#[derive(Debug)]
pub struct CanvasRows<'a> {
    width: usize,
    first_row: usize,
    data: &'a mut [u8],
}

impl<'a> CanvasRows<'a> {
    /// View every row of an RGB frame.
    pub fn whole(frame: &'a mut Frame) -> Self {
        debug_assert_eq!(frame.channels(), 3);
        Self {
            width: frame.width as usize,
            first_row: 0,
            data: &mut frame.data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn row_end(&self) -> usize {
        if self.width == 0 {
            self.first_row
        } else {
            self.first_row + self.data.len() / (self.width * 3)
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x >= self.width || y < self.first_row || y >= self.row_end() {
            return;
        }
        let idx = ((y - self.first_row) * self.width + x) * 3;
        self.data[idx..idx + 3].copy_from_slice(&color.to_array());
    }
}

/// One unit of parallel work: a range of cell rows and the buffers it owns.
#[derive(Debug)]
pub struct Stripe<'a> {
    pub cell_rows: Range<usize>,
    pub canvas: CanvasRows<'a>,
    pub mask: OccupancyRows<'a>,
    pub glyphs: GridRows<'a>,
}

/// Cut the whole cell grid into stripes over the shared output buffers.
///
/// Only the first `glyphs.rows() * CELL_SIZE` pixel rows are handed out;
/// trailing rows that do not form a whole cell stay untouched.
pub fn split_stripes<'a>(
    canvas: &'a mut Frame,
    mask: &'a mut OccupancyMask,
    glyphs: &'a mut GlyphGrid,
    stripes: usize,
) -> Vec<Stripe<'a>> {
    let cell_rows = glyphs.rows();
    let ranges = stripe_ranges(cell_rows, stripes);
    let Some(per) = ranges.first().map(|r| r.len()) else {
        return Vec::new();
    };

    let width = canvas.width as usize;
    let stride = width * 3;
    let pixel_rows = cell_rows * CELL_SIZE;
    let rows_per_stripe = per * CELL_SIZE;

    let canvases = canvas.data[..pixel_rows * stride]
        .chunks_mut(rows_per_stripe * stride)
        .enumerate()
        .map(|(i, data)| CanvasRows {
            width,
            first_row: i * rows_per_stripe,
            data,
        });
    let masks = mask.split_rows(rows_per_stripe, pixel_rows);
    let grids = glyphs.split_rows(per);

    ranges
        .into_iter()
        .zip(canvases)
        .zip(masks)
        .zip(grids)
        .map(|(((cell_rows, canvas), mask), glyphs)| Stripe {
            cell_rows,
            canvas,
            mask,
            glyphs,
        })
        .collect()
}

/// Run `paint` over every stripe on the current rayon pool and wait for all
/// of them to finish.
pub fn run_stripes<F>(stripes: Vec<Stripe<'_>>, paint: F)
where
    F: Fn(&mut Stripe<'_>) + Sync + Send,
{
    stripes.into_par_iter().for_each(|mut stripe| paint(&mut stripe));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::grid::{GlyphCell, RenderSource};
    use crate::frame::PixelFormat;

    #[test]
    fn test_stripe_count_caps() {
        assert_eq!(stripe_count(100, 4), 8);
        assert_eq!(stripe_count(3, 4), 3);
        assert_eq!(stripe_count(0, 4), 1);
        assert_eq!(stripe_count(10, 0), 1);
    }

    #[test]
    fn test_stripe_ranges_cover_exactly() {
        let ranges = stripe_ranges(10, 4);
        assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..10]);
        assert!(stripe_ranges(0, 4).is_empty());
        assert_eq!(stripe_ranges(5, 1), vec![0..5]);
        assert_eq!(stripe_ranges(2, 8), vec![0..1, 1..2]);
    }

    #[test]
    fn test_split_stripes_align_buffers() {
        let mut frame = Frame::new(16, 40, PixelFormat::Rgb);
        let mut mask = OccupancyMask::new(16, 40);
        let mut grid = GlyphGrid::new(2, 5);

        let stripes = split_stripes(&mut frame, &mut mask, &mut grid, 2);
        assert_eq!(stripes.len(), 2);
        for stripe in &stripes {
            let first = stripe.cell_rows.start * CELL_SIZE;
            let end = stripe.cell_rows.end * CELL_SIZE;
            assert_eq!(stripe.canvas.first_row(), first);
            assert_eq!(stripe.canvas.row_end(), end);
            assert_eq!(stripe.mask.first_row(), first);
            assert_eq!(stripe.mask.row_end(), end);
        }
    }

    #[test]
    fn test_split_stripes_excludes_partial_rows() {
        let mut frame = Frame::new(8, 20, PixelFormat::Rgb);
        let mut mask = OccupancyMask::new(8, 20);
        let mut grid = GlyphGrid::new(1, 2);

        let stripes = split_stripes(&mut frame, &mut mask, &mut grid, 4);
        assert_eq!(stripes.len(), 2);
        assert_eq!(stripes[1].canvas.row_end(), 16);
    }

    #[test]
    fn test_run_stripes_writes_every_cell_once() {
        let mut frame = Frame::new(24, 64, PixelFormat::Rgb);
        let mut mask = OccupancyMask::new(24, 64);
        let mut grid = GlyphGrid::new(3, 8);

        let stripes = split_stripes(&mut frame, &mut mask, &mut grid, 3);
        run_stripes(stripes, |stripe| {
            for row in stripe.cell_rows.clone() {
                for col in 0..3 {
                    let (x, y) = (col * CELL_SIZE, row * CELL_SIZE);
                    assert!(!stripe.mask.is_occupied(x, y));
                    stripe.mask.mark_cell(x, y);
                    stripe.canvas.set_pixel(x, y, Rgb::WHITE);
                    stripe.glyphs.set(
                        col,
                        row,
                        GlyphCell {
                            glyph: '#',
                            source: RenderSource::Luminance,
                        },
                    );
                }
            }
        });

        assert_eq!(mask.occupied_cells(), 24);
        assert_eq!(grid.count_source(RenderSource::Luminance), 24);
        assert_eq!(frame.pixel(16, 56), [255, 255, 255]);
    }

    #[test]
    fn test_canvas_rows_clip_outside_range() {
        let mut frame = Frame::new(4, 4, PixelFormat::Rgb);
        let mut canvas = CanvasRows::whole(&mut frame);
        canvas.set_pixel(4, 0, Rgb::WHITE);
        canvas.set_pixel(0, 4, Rgb::WHITE);
        assert!(frame.data.iter().all(|&b| b == 0));
    }
}
