//! Per-cell record of which glyph each cell received.

/// Which pass drew a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSource {
    Edge,
    Luminance,
}

/// A glyph placed in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub glyph: char,
    pub source: RenderSource,
}

/// Glyph assignments for the whole cell grid, row-major.
///
/// `None` marks a cell no pass has drawn yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Option<GlyphCell>>,
}

impl GlyphGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<GlyphCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        self.cell(col, row).map(|c| c.glyph)
    }

    pub fn source(&self, col: usize, row: usize) -> Option<RenderSource> {
        self.cell(col, row).map(|c| c.source)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<GlyphCell>> + '_ {
        self.cells.iter().copied()
    }

    pub fn count_source(&self, source: RenderSource) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Some(cell) if cell.source == source))
            .count()
    }

    /// Render the grid as text, one line per cell row. Undrawn cells are spaces.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols.max(1)).take(self.rows) {
            out.extend(row.iter().map(|c| c.map_or(' ', |c| c.glyph)));
            out.push('\n');
        }
        out
    }

    /// Split into disjoint chunks of `rows_per_chunk` grid rows.
    pub(crate) fn split_rows(&mut self, rows_per_chunk: usize) -> Vec<GridRows<'_>> {
        let cols = self.cols;
        if rows_per_chunk == 0 || cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks_mut(rows_per_chunk * cols)
            .enumerate()
            .map(|(i, cells)| GridRows {
                cols,
                first_row: i * rows_per_chunk,
                cells,
            })
            .collect()
    }
}

/// Mutable view over a contiguous range of grid rows.
#[derive(Debug)]
pub struct GridRows<'a> {
    cols: usize,
    first_row: usize,
    cells: &'a mut [Option<GlyphCell>],
}

impl GridRows<'_> {
    pub fn set(&mut self, col: usize, row: usize, cell: GlyphCell) {
        if col >= self.cols || row < self.first_row {
            return;
        }
        if let Some(slot) = self.cells.get_mut((row - self.first_row) * self.cols + col) {
            *slot = Some(cell);
        }
    }
}
