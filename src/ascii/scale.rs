//! Frame resampling: fixed-factor downscale/upscale and general resize.
//!
//! Both kernels are separable. Each output column (and row) gets a list of
//! `(source index, weight)` taps; a horizontal pass followed by a vertical
//! pass applies them.
//!
//! - `Area`: every output pixel is the mean of its source footprint, with
//!   fractional edge pixels weighted by overlap. For integer factors this is
//!   a plain box average.
//! - `Bilinear`: pixel-center aligned, clamped at the borders.

use crate::config::{Interpolation, CELL_SIZE};
use crate::frame::Frame;

/// Factor between the full frame and the edge-analysis frame.
pub const SCALE_FACTOR: usize = CELL_SIZE;

type Taps = Vec<(usize, f64)>;

/// Shrink a frame to `(width / 8, height / 8)`.
///
/// Dimensions are exact integer quotients; inputs smaller than 8 pixels in
/// either direction produce an empty frame.
pub fn downscale(frame: &Frame, interpolation: Interpolation) -> Frame {
    let width = frame.width as usize / SCALE_FACTOR;
    let height = frame.height as usize / SCALE_FACTOR;
    resize(frame, width, height, interpolation)
}

/// Enlarge a frame to `(width * 8, height * 8)`.
pub fn upscale(frame: &Frame, interpolation: Interpolation) -> Frame {
    let width = frame.width as usize * SCALE_FACTOR;
    let height = frame.height as usize * SCALE_FACTOR;
    resize(frame, width, height, interpolation)
}

/// Resample a whole frame to `dst_width x dst_height`.
pub fn resize(
    frame: &Frame,
    dst_width: usize,
    dst_height: usize,
    interpolation: Interpolation,
) -> Frame {
    resize_region(
        frame,
        frame.width as usize,
        frame.height as usize,
        dst_width,
        dst_height,
        interpolation,
    )
}

/// Resample the top-left `src_width x src_height` region of a frame.
pub fn resize_region(
    frame: &Frame,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    interpolation: Interpolation,
) -> Frame {
    let src_width = src_width.min(frame.width as usize);
    let src_height = src_height.min(frame.height as usize);
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return Frame::new(dst_width as u32, dst_height as u32, frame.format);
    }

    let taps_x = axis_taps(src_width, dst_width, interpolation);
    let taps_y = axis_taps(src_height, dst_height, interpolation);
    let channels = frame.channels();
    let stride = frame.stride();

    // Horizontal pass: src_height rows of dst_width pixels.
    let row_len = dst_width * channels;
    let mut horizontal = vec![0f64; src_height * row_len];
    for y in 0..src_height {
        let src_row = &frame.data[y * stride..y * stride + src_width * channels];
        let out_row = &mut horizontal[y * row_len..(y + 1) * row_len];
        for (dx, taps) in taps_x.iter().enumerate() {
            for c in 0..channels {
                out_row[dx * channels + c] = taps
                    .iter()
                    .map(|&(sx, w)| src_row[sx * channels + c] as f64 * w)
                    .sum();
            }
        }
    }

    // Vertical pass.
    let mut out = Frame::new(dst_width as u32, dst_height as u32, frame.format);
    for (dy, taps) in taps_y.iter().enumerate() {
        let out_row = out.row_mut(dy);
        for (i, px) in out_row.iter_mut().enumerate() {
            let v: f64 = taps
                .iter()
                .map(|&(sy, w)| horizontal[sy * row_len + i] * w)
                .sum();
            *px = saturate(v);
        }
    }

    out
}

/// Round to nearest and clamp into the channel range.
#[inline]
pub(crate) fn saturate(v: f64) -> u8 {
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

fn axis_taps(src_len: usize, dst_len: usize, interpolation: Interpolation) -> Vec<Taps> {
    match interpolation {
        Interpolation::Area => area_taps(src_len, dst_len),
        Interpolation::Bilinear => bilinear_taps(src_len, dst_len),
    }
}

fn area_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            let mut taps: Taps = (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 1e-12).then_some((s, overlap))
                })
                .collect();
            let total: f64 = taps.iter().map(|&(_, w)| w).sum();
            if total > 0.0 {
                for tap in &mut taps {
                    tap.1 /= total;
                }
            } else {
                taps = vec![(first.min(src_len - 1), 1.0)];
            }
            taps
        })
        .collect()
}

fn bilinear_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;
    let max = (src_len - 1) as f64;
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f64 + 0.5) * scale - 0.5).clamp(0.0, max);
            let s0 = pos.floor() as usize;
            let s1 = (s0 + 1).min(src_len - 1);
            let frac = pos - s0 as f64;
            if s1 == s0 || frac <= 0.0 {
                vec![(s0, 1.0)]
            } else {
                vec![(s0, 1.0 - frac), (s1, frac)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;

    fn gray(data: Vec<u8>, width: u32, height: u32) -> Frame {
        Frame::from_raw(data, width, height, PixelFormat::Gray).unwrap()
    }

    #[test]
    fn test_downscale_dimensions_are_quotients() {
        let frame = Frame::new(65, 130, PixelFormat::Rgb);
        let small = downscale(&frame, Interpolation::Area);
        assert_eq!((small.width, small.height), (8, 16));
        assert_eq!(small.format, PixelFormat::Rgb);
        assert_eq!(small.data.len(), 8 * 16 * 3);
    }

    #[test]
    fn test_downscale_degenerate_input() {
        let frame = Frame::new(7, 100, PixelFormat::Gray);
        let small = downscale(&frame, Interpolation::Area);
        assert_eq!(small.width, 0);
        assert!(small.data.is_empty());
    }

    #[test]
    fn test_downscale_area_is_block_mean() {
        // 16x8 gray: left 8x8 block all 10, right block alternating 0/255
        let mut data = Vec::with_capacity(128);
        for _y in 0..8 {
            data.extend(std::iter::repeat(10).take(8));
            for x in 0..8 {
                data.push(if x % 2 == 0 { 0 } else { 255 });
            }
        }
        let small = downscale(&gray(data, 16, 8), Interpolation::Area);
        // mean of 0/255 alternating = 127.5, rounded half up
        assert_eq!(small.data, vec![10, 128]);
    }

    #[test]
    fn test_area_fractional_footprint() {
        // 3 pixels into 2: footprints [0, 1.5) and [1.5, 3)
        let small = resize(&gray(vec![0, 90, 180], 3, 1), 2, 1, Interpolation::Area);
        // (0 + 0.5*90) / 1.5 = 30, (0.5*90 + 180) / 1.5 = 150
        assert_eq!(small.data, vec![30, 150]);
    }

    #[test]
    fn test_upscale_area_replicates() {
        let frame = gray(vec![10, 200], 2, 1);
        let big = upscale(&frame, Interpolation::Area);
        assert_eq!((big.width, big.height), (16, 8));
        for y in 0..8 {
            assert!(big.row(y)[..8].iter().all(|&v| v == 10));
            assert!(big.row(y)[8..].iter().all(|&v| v == 200));
        }
    }

    #[test]
    fn test_upscale_then_downscale_restores() {
        let frame = Frame::from_raw(
            vec![1, 2, 3, 40, 50, 60, 70, 80, 90, 200, 210, 220],
            2,
            2,
            PixelFormat::Rgb,
        )
        .unwrap();
        let round = downscale(&upscale(&frame, Interpolation::Area), Interpolation::Area);
        assert_eq!(round, frame);
    }

    #[test]
    fn test_bilinear_uniform_stays_uniform() {
        let frame = gray(vec![77; 40 * 24], 40, 24);
        for interp in [Interpolation::Area, Interpolation::Bilinear] {
            let small = downscale(&frame, interp);
            assert!(small.data.iter().all(|&v| v == 77));
            let big = upscale(&small, interp);
            assert!(big.data.iter().all(|&v| v == 77));
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        // Upscale 2 -> 4: centers at 0.25 and 0.75 between source pixels
        let big = resize(&gray(vec![0, 100], 2, 1), 4, 1, Interpolation::Bilinear);
        assert_eq!(big.data, vec![0, 25, 75, 100]);
    }

    #[test]
    fn test_resize_region_crops() {
        // 3x1 region of a 4x1 frame; last pixel ignored
        let frame = gray(vec![10, 20, 30, 250], 4, 1);
        let out = resize_region(&frame, 3, 1, 1, 1, Interpolation::Area);
        assert_eq!(out.data, vec![20]);
    }

    #[test]
    fn test_saturate_clamps() {
        assert_eq!(saturate(-3.0), 0);
        assert_eq!(saturate(300.0), 255);
        assert_eq!(saturate(127.5), 128);
        assert_eq!(saturate(127.49), 127);
    }
}
