//! ascii-filter library crate.
//!
//! Renders raster video frames as 8x8 character-art glyphs. The renderer lives
//! in [`ascii`]; [`stream`] and [`cli`] are the glue used by the binary.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod stream;

pub use ascii::{AsciiRenderer, Rendered};
pub use config::{ColorMode, FilterConfig, Interpolation, Rgb, CELL_SIZE};
pub use frame::{Frame, PixelFormat};
