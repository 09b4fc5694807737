//! Error types for ascii-filter.
//!
//! The render path itself never fails; these cover frame construction,
//! configuration, worker-pool setup and the raw frame stream.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when wrapping raw pixel data in a [`crate::frame::Frame`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame data is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("frame dimensions must be positive, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid color '{0}': expected R,G,B with each channel in 0-255, or 'original'")]
    InvalidColor(String),
    #[error(
        "edge kernel size must be an odd number from 1 to {max}, got {0}",
        max = crate::config::MAX_EDGE_KERNEL_SIZE
    )]
    InvalidKernelSize(usize),
    #[error("thread count must be at least 1")]
    InvalidThreadCount,
    #[error("invalid frame size '{0}': expected WIDTHxHEIGHT")]
    InvalidSize(String),
    #[error("unknown pixel format '{0}': expected rgb24 or gray")]
    InvalidFormat(String),
    #[error("frame size not set: pass --size WIDTHxHEIGHT or set [input] width and height")]
    MissingSize,
    #[error("config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Errors that can occur when constructing a renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors raised by the raw frame stream.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated frame: read {read} of {expected} bytes")]
    Truncated { read: usize, expected: usize },
    #[error(transparent)]
    Frame(#[from] FrameError),
}
