//! Per-pixel occupancy mask arbitrating between the edge and luminance passes.
//!
//! A cell is occupied iff its top-left pixel is marked. The edge pass marks
//! the cells it draws; the luminance pass skips them.

use crate::config::CELL_SIZE;

/// Occupancy flags for every pixel of the output frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl OccupancyMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x]
    }

    /// Whether the cell at grid position (`col`, `row`) has been claimed.
    pub fn is_cell_occupied(&self, col: usize, row: usize) -> bool {
        self.is_occupied(col * CELL_SIZE, row * CELL_SIZE)
    }

    /// Number of whole-grid cells currently marked.
    pub fn occupied_cells(&self) -> usize {
        let cols = self.width / CELL_SIZE;
        let rows = self.height / CELL_SIZE;
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (c, r)))
            .filter(|&(c, r)| self.is_cell_occupied(c, r))
            .count()
    }

    /// Borrow the whole mask as a single row range.
    pub fn rows_mut(&mut self) -> OccupancyRows<'_> {
        OccupancyRows {
            width: self.width,
            first_row: 0,
            data: &mut self.data,
        }
    }

    /// Split the first `rows * rows_per_chunk` pixel rows into disjoint,
    /// consecutive row ranges of `rows_per_chunk` rows each (the last may be
    /// shorter). Rows past `limit_rows` are not handed out.
    pub(crate) fn split_rows(
        &mut self,
        rows_per_chunk: usize,
        limit_rows: usize,
    ) -> Vec<OccupancyRows<'_>> {
        let width = self.width;
        let limit = limit_rows.min(self.height) * width;
        if rows_per_chunk == 0 || width == 0 {
            return Vec::new();
        }
        self.data[..limit]
            .chunks_mut(rows_per_chunk * width)
            .enumerate()
            .map(|(i, data)| OccupancyRows {
                width,
                first_row: i * rows_per_chunk,
                data,
            })
            .collect()
    }
}

/// Mutable view over a contiguous range of mask rows.
///
/// Coordinates are absolute frame coordinates; writes outside the range are
/// clipped, so a stripe can never touch another stripe's rows.
#[derive(Debug)]
pub struct OccupancyRows<'a> {
    width: usize,
    first_row: usize,
    data: &'a mut [bool],
}

impl OccupancyRows<'_> {
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn row_end(&self) -> usize {
        if self.width == 0 {
            self.first_row
        } else {
            self.first_row + self.data.len() / self.width
        }
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y < self.first_row || y >= self.row_end() {
            return false;
        }
        self.data[(y - self.first_row) * self.width + x]
    }

    /// Mark the `CELL_SIZE x CELL_SIZE` region at (`x`, `y`), clipped to this range.
    pub fn mark_cell(&mut self, x: usize, y: usize) {
        debug_assert!(
            y >= self.first_row && y < self.row_end(),
            "cell row {} outside stripe rows {}..{}",
            y,
            self.first_row,
            self.row_end()
        );
        let y_end = (y + CELL_SIZE).min(self.row_end());
        let x_end = (x + CELL_SIZE).min(self.width);
        if x >= x_end {
            return;
        }
        for py in y.max(self.first_row)..y_end {
            let start = (py - self.first_row) * self.width;
            self.data[start + x..start + x_end].fill(true);
        }
    }
}
