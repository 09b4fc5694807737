//! RGB to grayscale conversion using ITU-R BT.709 luminance weights.

use crate::frame::{Frame, PixelFormat};

/// BT.709 luminance with integer math, coefficients scaled by 10000
/// (2126 + 7152 + 722 = 10000), truncated.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((2126 * r as u32 + 7152 * g as u32 + 722 * b as u32) / 10_000) as u8
}

/// Convert a frame to a single-channel luminance frame.
///
/// Gray frames are returned as a copy.
pub fn to_grayscale(frame: &Frame) -> Frame {
    let mut gray = Vec::new();
    to_grayscale_into(frame, &mut gray);
    Frame {
        data: gray,
        width: frame.width,
        height: frame.height,
        format: PixelFormat::Gray,
    }
}

/// Convert a frame to luminance values, reusing an existing buffer.
///
/// Returns the number of pixels written.
pub fn to_grayscale_into(frame: &Frame, buffer: &mut Vec<u8>) -> usize {
    let pixel_count = frame.width as usize * frame.height as usize;
    buffer.clear();
    buffer.reserve(pixel_count);

    match frame.format {
        PixelFormat::Gray => buffer.extend_from_slice(&frame.data[..pixel_count]),
        PixelFormat::Rgb => {
            for rgb in frame.data.chunks_exact(3).take(pixel_count) {
                buffer.push(luminance(rgb[0], rgb[1], rgb[2]));
            }
        }
    }

    pixel_count
}
