//! CLI enum types for pixel format and interpolation options.

use clap::ValueEnum;

use crate::config::Interpolation;
use crate::frame::PixelFormat;

/// Raw input pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    #[default]
    Rgb24,
    Gray,
}

impl From<InputFormat> for PixelFormat {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Rgb24 => PixelFormat::Rgb,
            InputFormat::Gray => PixelFormat::Gray,
        }
    }
}

/// Resampling kernel for the edge-analysis downscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InterpolationArg {
    #[default]
    Area,
    Bilinear,
}

impl From<InterpolationArg> for Interpolation {
    fn from(i: InterpolationArg) -> Self {
        match i {
            InterpolationArg::Area => Interpolation::Area,
            InterpolationArg::Bilinear => Interpolation::Bilinear,
        }
    }
}
