//! Frame-to-glyph renderer driving the full pipeline.
//!
//! Per frame: grayscale, downscale, edge detection, optional color sampling,
//! then the edge pass and the luminance pass over row stripes. The edge pass
//! finishes on every stripe before the luminance pass starts, since the
//! luminance pass skips the cells the edge pass claimed.

use std::time::Instant;

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::color::{sample_cell_colors, CellPalette};
use super::edge_glyphs::EdgePainter;
use super::edges::detect_edges;
use super::grayscale::to_grayscale;
use super::grid::{GlyphGrid, RenderSource};
use super::luminance::LuminancePainter;
use super::occupancy::OccupancyMask;
use super::scale::downscale;
use super::stripes::{run_stripes, split_stripes, stripe_count};
use crate::config::{ColorMode, FilterConfig, CELL_SIZE};
use crate::error::RenderError;
use crate::frame::{Frame, PixelFormat};

/// Output of a render: the glyph frame and the glyph chosen for each cell.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// RGB frame with the input's dimensions
    pub frame: Frame,
    pub glyphs: GlyphGrid,
}

/// Stateless per-frame renderer. Holds only the validated configuration and
/// the worker pool.
pub struct AsciiRenderer {
    config: FilterConfig,
    pool: Option<ThreadPool>,
}

impl AsciiRenderer {
    /// Validate `config` and build a dedicated pool when `threads` is set.
    /// Without it, the global rayon pool is used.
    pub fn new(config: FilterConfig) -> Result<Self, RenderError> {
        config.validate()?;

        let pool = match config.threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("ascii-stripe-{}", i))
                    .build()?,
            ),
            None => None,
        };

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Number of workers the stripes are spread over.
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Render a frame. The result is always RGB with the input's dimensions.
    pub fn render(&self, frame: &Frame) -> Frame {
        self.render_with_glyphs(frame).frame
    }

    /// Render a frame and report which glyph each cell received.
    ///
    /// Cells crossed by a strong edge get an orientation glyph; every other
    /// whole cell gets a luminance glyph. Partial cells along the right and
    /// bottom borders stay black. Runs on the dedicated pool when one was
    /// configured.
    ///
    /// # Arguments
    /// * `frame` - Input frame, RGB or gray, of any size
    ///
    /// # Returns
    /// The RGB glyph frame with the input's dimensions, and the cell grid
    /// (empty when the frame is smaller than one cell).
    pub fn render_with_glyphs(&self, frame: &Frame) -> Rendered {
        match &self.pool {
            Some(pool) => pool.install(|| self.render_frame(frame)),
            None => self.render_frame(frame),
        }
    }

    fn render_frame(&self, frame: &Frame) -> Rendered {
        debug_assert!(
            frame.is_valid(),
            "frame data is {} bytes, expected {}x{}x{}",
            frame.data.len(),
            frame.width,
            frame.height,
            frame.channels()
        );
        let width = frame.width as usize;
        let height = frame.height as usize;
        let cols = width / CELL_SIZE;
        let rows = height / CELL_SIZE;

        let mut canvas = Frame::new(frame.width, frame.height, PixelFormat::Rgb);
        let mut mask = OccupancyMask::new(width, height);
        let mut glyphs = GlyphGrid::new(cols, rows);

        if cols == 0 || rows == 0 {
            log::debug!("Frame {}x{} has no whole cells", width, height);
            return Rendered {
                frame: canvas,
                glyphs,
            };
        }

        let start = Instant::now();
        let gray = to_grayscale(frame);
        let small = downscale(&gray, self.config.interpolation);
        let edges = detect_edges(&small, self.config.edge_kernel_size);
        let samples;
        let palette = match self.config.color_mode {
            ColorMode::Fixed(color) => CellPalette::Fixed(color),
            ColorMode::SampleOriginal => {
                samples = sample_cell_colors(frame);
                CellPalette::Sampled(&samples)
            }
        };
        let analysis = start.elapsed();

        let stripes = stripe_count(rows, rayon::current_num_threads());

        let edge_painter = EdgePainter::new(&edges, width, height, palette);
        run_stripes(
            split_stripes(&mut canvas, &mut mask, &mut glyphs, stripes),
            |stripe| {
                edge_painter.paint(stripe);
            },
        );
        let edge_pass = start.elapsed();

        let luminance_painter = LuminancePainter::new(&gray, palette);
        run_stripes(
            split_stripes(&mut canvas, &mut mask, &mut glyphs, stripes),
            |stripe| {
                luminance_painter.paint(stripe);
            },
        );

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Rendered {}x{} ({} stripes): {} edge cells, {} luminance cells; analysis {:?}, edges {:?}, total {:?}",
                cols,
                rows,
                stripes,
                glyphs.count_source(RenderSource::Edge),
                glyphs.count_source(RenderSource::Luminance),
                analysis,
                edge_pass - analysis,
                start.elapsed()
            );
        }

        Rendered {
            frame: canvas,
            glyphs,
        }
    }
}
