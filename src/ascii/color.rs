//! Per-cell average color sampling.
//!
//! Two strategies produce the same per-cell means (rounded half up):
//! - `AreaResize`: box-resize the whole-cell region down to grid resolution.
//! - `IntegralImage`: summed-area tables per channel, queried per cell in
//!   parallel row stripes.
//!
//! Wide frames go through the resize, tall frames through the integral
//! tables, which avoid re-scanning on many-row inputs.

use rayon::prelude::*;

use super::scale::resize_region;
use super::stripes::{stripe_count, stripe_ranges};
use crate::config::{Interpolation, Rgb, CELL_SIZE};
use crate::frame::Frame;

/// Strategy used to compute cell colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    AreaResize,
    IntegralImage,
}

impl SamplingStrategy {
    /// Area resize when `width >= height`, integral tables otherwise.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        if width >= height {
            SamplingStrategy::AreaResize
        } else {
            SamplingStrategy::IntegralImage
        }
    }
}

/// Average color of every whole cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellColors {
    cols: usize,
    rows: usize,
    colors: Vec<Rgb>,
}

impl CellColors {
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Color of the cell at grid position (`col`, `row`).
    pub fn get(&self, col: usize, row: usize) -> Rgb {
        self.colors[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Resolves the glyph color for a cell.
#[derive(Debug, Clone, Copy)]
pub enum CellPalette<'a> {
    /// Every glyph uses one color
    Fixed(Rgb),
    /// Each glyph takes its cell's sampled color
    Sampled(&'a CellColors),
}

impl CellPalette<'_> {
    /// Glyph color for the cell at grid position (`col`, `row`).
    ///
    /// Sampled palettes must cover the cell grid being painted.
    pub fn color(&self, col: usize, row: usize) -> Rgb {
        match self {
            CellPalette::Fixed(color) => *color,
            CellPalette::Sampled(samples) => {
                debug_assert!(
                    col < samples.cols && row < samples.rows,
                    "cell ({}, {}) outside sampled grid {}x{}",
                    col,
                    row,
                    samples.cols,
                    samples.rows
                );
                samples.get(col, row)
            }
        }
    }
}

/// Average the input color of every whole cell.
///
/// Landscape and square frames go through an area resize; portrait frames
/// use per-channel integral images split into parallel stripes. Both paths
/// produce the same values.
///
/// # Arguments
/// * `frame` - The full-resolution input frame (RGB or gray)
///
/// # Returns
/// One color per whole cell, row-major. Partial trailing cells are not
/// sampled.
pub fn sample_cell_colors(frame: &Frame) -> CellColors {
    let strategy = SamplingStrategy::for_dimensions(frame.width, frame.height);
    sample_cell_colors_with(frame, strategy)
}

pub fn sample_cell_colors_with(frame: &Frame, strategy: SamplingStrategy) -> CellColors {
    let cols = frame.width as usize / CELL_SIZE;
    let rows = frame.height as usize / CELL_SIZE;
    if cols == 0 || rows == 0 {
        return CellColors {
            cols,
            rows,
            colors: Vec::new(),
        };
    }

    let colors = match strategy {
        SamplingStrategy::AreaResize => sample_by_area(frame, cols, rows),
        SamplingStrategy::IntegralImage => sample_by_integral(frame, cols, rows),
    };
    CellColors { cols, rows, colors }
}

fn sample_by_area(frame: &Frame, cols: usize, rows: usize) -> Vec<Rgb> {
    // Restrict to whole cells so every footprint is exactly one cell.
    let small = resize_region(
        frame,
        cols * CELL_SIZE,
        rows * CELL_SIZE,
        cols,
        rows,
        Interpolation::Area,
    );
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (c, r)))
        .map(|(c, r)| Rgb::from(small.pixel(c, r)))
        .collect()
}

/// Summed-area table over one channel: `(width + 1) x (height + 1)`, with a
/// zero first row and column.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    /// Build the table for channel `channel` of `frame`.
    pub fn new(frame: &Frame, channel: usize) -> Self {
        let width = frame.width as usize;
        let height = frame.height as usize;
        let channels = frame.channels();
        let stride = width + 1;
        let mut sums = vec![0u64; stride * (height + 1)];

        for y in 0..height {
            let row = frame.row(y);
            let mut running = 0u64;
            for x in 0..width {
                running += row[x * channels + channel] as u64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + running;
            }
        }

        Self { width, sums }
    }

    /// Sum over the rectangle `[x0, x0 + w) x [y0, y0 + h)`.
    pub fn rect_sum(&self, x0: usize, y0: usize, w: usize, h: usize) -> u64 {
        let stride = self.width + 1;
        let top = y0 * stride;
        let bottom = (y0 + h) * stride;
        self.sums[bottom + x0 + w] + self.sums[top + x0]
            - self.sums[bottom + x0]
            - self.sums[top + x0 + w]
    }
}

fn sample_by_integral(frame: &Frame, cols: usize, rows: usize) -> Vec<Rgb> {
    let tables: Vec<IntegralImage> = if frame.channels() == 1 {
        vec![IntegralImage::new(frame, 0)]
    } else {
        (0..3).map(|c| IntegralImage::new(frame, c)).collect()
    };
    let area = (CELL_SIZE * CELL_SIZE) as u64;
    let mean = |table: &IntegralImage, x0: usize, y0: usize| -> u8 {
        let sum = table.rect_sum(x0, y0, CELL_SIZE, CELL_SIZE);
        ((sum + area / 2) / area).min(255) as u8
    };

    let mut colors = vec![Rgb::default(); cols * rows];
    let stripes = stripe_ranges(rows, stripe_count(rows, rayon::current_num_threads()));
    let rows_per_stripe = stripes.first().map_or(rows, |r| r.len());

    colors
        .par_chunks_mut(rows_per_stripe * cols)
        .zip(stripes)
        .for_each(|(out, range)| {
            for (local, row) in range.enumerate() {
                let y0 = row * CELL_SIZE;
                for col in 0..cols {
                    let x0 = col * CELL_SIZE;
                    // Gray frames have a single table shared by all channels
                    let channel = |c: usize| mean(&tables[c.min(tables.len() - 1)], x0, y0);
                    out[local * cols + col] = Rgb::new(channel(0), channel(1), channel(2));
                }
            }
        });

    colors
}
