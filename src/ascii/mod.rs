//! Character-art renderer for raster frames.
//!
//! Each frame is cut into 8x8 cells. A cell either gets an edge glyph
//! (`|`, `-`, `/`, `\`) when a strong edge runs through it, or a glyph from
//! the luminance ramp otherwise:
//!
//! 1. **Grayscale conversion** - RGB to luminance using BT.709
//! 2. **Downscale** - area-average to 1/8 resolution for edge analysis
//! 3. **Edge detection** - Gaussian + median smoothing, adaptive Canny, Sobel
//! 4. **Edge pass** - orientation glyphs on edge cells, claimed in the
//!    occupancy mask
//! 5. **Luminance pass** - ramp glyphs on every unclaimed cell
//!
//! Both passes run over row stripes on a rayon pool. Glyphs are tinted with a
//! fixed color or the cell's sampled average color.

mod charset;
mod color;
mod edge_glyphs;
mod edges;
mod font;
mod grayscale;
mod grid;
mod luminance;
mod occupancy;
mod renderer;
mod scale;
mod stripes;

pub use charset::{ramp_glyph, ramp_index, EdgeOrientation, GLYPH_RAMP};
pub use color::{
    sample_cell_colors, sample_cell_colors_with, CellColors, CellPalette, IntegralImage,
    SamplingStrategy,
};
pub use edge_glyphs::{magnitude_threshold, to_cell_origin, EdgePainter};
pub use edges::{
    canny, canny_thresholds, detect_edges, gaussian_blur, median_blur3, sobel, EdgeData,
};
pub use font::{blit_glyph, coverage, glyph_bitmap, GlyphBitmap, GLYPH_SIZE};
pub use grayscale::{luminance, to_grayscale, to_grayscale_into};
pub use grid::{GlyphCell, GlyphGrid, GridRows, RenderSource};
pub use luminance::{cell_luminance, LuminancePainter};
pub use occupancy::{OccupancyMask, OccupancyRows};
pub use renderer::{AsciiRenderer, Rendered};
pub use scale::{downscale, resize, resize_region, upscale, SCALE_FACTOR};
pub use stripes::{run_stripes, split_stripes, stripe_count, stripe_ranges, CanvasRows, Stripe};
