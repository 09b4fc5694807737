//! Frame types shared by the renderer and the stream glue.

use crate::error::FrameError;

/// Pixel format of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Single luminance channel (1 byte per pixel)
    Gray,
    /// Interleaved RGB (3 bytes per pixel)
    #[default]
    Rgb,
}

impl PixelFormat {
    /// Get the number of bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        }
    }

    /// Parse a format name (`gray`, `rgb`, or the ffmpeg pix_fmt aliases).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gray" | "grey" | "gray8" => Some(Self::Gray),
            "rgb" | "rgb24" => Some(Self::Rgb),
            _ => None,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gray => write!(f, "gray"),
            Self::Rgb => write!(f, "rgb24"),
        }
    }
}

/// A raster frame: `width * height` pixels, row-major, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw pixel data, `width * height * channels` bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: PixelFormat,
}

impl Frame {
    /// Allocate an all-zero (black) frame.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            data: vec![0; len],
            width,
            height,
            format,
        }
    }

    /// Wrap existing pixel data, checking that its length matches the dimensions.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Get the number of bytes per pixel.
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// True when `data` holds exactly `width * height * channels` bytes.
    ///
    /// Always holds for frames built with [`Frame::new`] or [`Frame::from_raw`];
    /// the fields are public, so hand-built frames may not.
    pub fn is_valid(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * self.channels()
    }

    /// True when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Borrow one row of pixel data.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Mutably borrow one row of pixel data.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.stride();
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Read a pixel as RGB. Gray pixels are replicated across the channels.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let channels = self.channels();
        let idx = (y * self.width as usize + x) * channels;
        match self.format {
            PixelFormat::Gray => {
                let v = self.data[idx];
                [v, v, v]
            }
            PixelFormat::Rgb => [self.data[idx], self.data[idx + 1], self.data[idx + 2]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_black() {
        let frame = Frame::new(4, 2, PixelFormat::Rgb);
        assert_eq!(frame.data.len(), 24);
        assert!(frame.data.iter().all(|&b| b == 0));
        assert_eq!(frame.stride(), 12);
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let err = Frame::from_raw(vec![0; 5], 2, 1, PixelFormat::Rgb).unwrap_err();
        assert_eq!(
            err,
            FrameError::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_pixel_gray_is_replicated() {
        let frame = Frame::from_raw(vec![10, 20], 2, 1, PixelFormat::Gray).unwrap();
        assert_eq!(frame.pixel(1, 0), [20, 20, 20]);
    }

    #[test]
    fn test_pixel_rgb() {
        let frame = Frame::from_raw(vec![1, 2, 3, 4, 5, 6], 1, 2, PixelFormat::Rgb).unwrap();
        assert_eq!(frame.pixel(0, 1), [4, 5, 6]);
        assert_eq!(frame.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_is_valid() {
        assert!(Frame::new(3, 2, PixelFormat::Rgb).is_valid());
        let frame = Frame {
            data: vec![0; 17],
            width: 3,
            height: 2,
            format: PixelFormat::Rgb,
        };
        assert!(!frame.is_valid());
    }

    #[test]
    fn test_is_empty() {
        assert!(Frame::new(0, 10, PixelFormat::Rgb).is_empty());
        assert!(!Frame::new(1, 1, PixelFormat::Gray).is_empty());
    }

    #[test]
    fn test_pixel_format_from_str() {
        assert_eq!(PixelFormat::from_str("rgb24"), Some(PixelFormat::Rgb));
        assert_eq!(PixelFormat::from_str("GRAY"), Some(PixelFormat::Gray));
        assert_eq!(PixelFormat::from_str("yuv420p"), None);
        assert_eq!(format!("{}", PixelFormat::Rgb), "rgb24");
    }
}
