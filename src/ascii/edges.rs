//! Edge detection on the reduced grayscale frame.
//!
//! Pipeline: Gaussian blur -> 3x3 median -> Sobel gradients -> Canny
//! (non-maximum suppression + hysteresis) with thresholds derived from the
//! blurred frame's mean intensity.
//!
//! The Sobel kernels used are:
//! ```text
//! Gx:          Gy:
//! [-1  0  1]   [-1 -2 -1]
//! [-2  0  2]   [ 0  0  0]
//! [-1  0  1]   [ 1  2  1]
//! ```
//! `gy` is positive downwards (image row order).

use super::scale::saturate;
use crate::config::MAX_EDGE_KERNEL_SIZE;
use crate::frame::{Frame, PixelFormat};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// Value written to the edge mask for edge pixels.
pub const EDGE: u8 = 255;

/// Binary edge mask plus gradient fields, one value per reduced pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub width: usize,
    pub height: usize,
    /// `EDGE` for edge pixels, 0 elsewhere
    pub mask: Vec<u8>,
    /// Horizontal derivative
    pub grad_x: Vec<f32>,
    /// Vertical derivative
    pub grad_y: Vec<f32>,
}

impl EdgeData {
    fn empty(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            mask: vec![0; len],
            grad_x: vec![0.0; len],
            grad_y: vec![0.0; len],
        }
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.mask[y * self.width + x] != 0
    }

    #[inline]
    pub fn gradient(&self, x: usize, y: usize) -> (f32, f32) {
        let idx = y * self.width + x;
        (self.grad_x[idx], self.grad_y[idx])
    }

    pub fn edge_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m != 0).count()
    }
}

/// Detect edges in a single-channel frame.
///
/// The frame is smoothed with a Gaussian and then a 3x3 median, Sobel
/// gradients are taken on the smoothed result, and Canny keeps the thin,
/// connected ridges. Hysteresis thresholds are 0.7 and 1.3 times the mean
/// smoothed intensity, so they track the frame's overall brightness.
///
/// # Arguments
/// * `gray` - A single-channel frame, usually the downscaled luminance
/// * `kernel_size` - Odd Gaussian kernel size, clamped to `MAX_EDGE_KERNEL_SIZE`
///
/// # Returns
/// The edge mask and the per-pixel Sobel gradients, at the input's size.
/// An all-constant frame yields an empty mask.
pub fn detect_edges(gray: &Frame, kernel_size: usize) -> EdgeData {
    debug_assert_eq!(gray.format, PixelFormat::Gray);
    let width = gray.width as usize;
    let height = gray.height as usize;
    if width == 0 || height == 0 {
        return EdgeData::empty(width, height);
    }

    let blurred = gaussian_blur(&gray.data, width, height, kernel_size);
    let blurred = median_blur3(&blurred, width, height);

    let mean = mean_intensity(&blurred);
    let (low, high) = canny_thresholds(mean);

    let (grad_x, grad_y) = sobel(&blurred, width, height);
    let mask = canny(&grad_x, &grad_y, width, height, low, high);

    EdgeData {
        width,
        height,
        mask,
        grad_x,
        grad_y,
    }
}

/// Lower/upper hysteresis thresholds from a mean intensity.
pub fn canny_thresholds(mean: f32) -> (f32, f32) {
    ((0.7 * mean).max(0.0), (1.3 * mean).min(255.0))
}

pub fn mean_intensity(pixels: &[u8]) -> f32 {
    if pixels.is_empty() {
        return 0.0;
    }
    let sum: u64 = pixels.iter().map(|&p| p as u64).sum();
    (sum as f64 / pixels.len() as f64) as f32
}

/// Mirror an out-of-range index back into `0..n` without repeating the edge
/// pixel (`-1 -> 1`, `n -> n - 2`). Offsets wider than the row fold
/// periodically.
#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let last = n as isize - 1;
    let i = i.rem_euclid(2 * last);
    (if i > last { 2 * last - i } else { i }) as usize
}

/// 1D Gaussian taps for an odd kernel size.
///
/// Sizes up to 7 use the fixed binomial-style kernels; larger sizes derive
/// sigma as `0.3 * ((k - 1) / 2 - 1) + 0.8`.
pub fn gaussian_taps(kernel_size: usize) -> Vec<f32> {
    match kernel_size {
        0 | 1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![
            0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
        ],
        k => {
            let sigma = 0.3 * ((k as f32 - 1.0) * 0.5 - 1.0) + 0.8;
            let center = (k / 2) as f32;
            let raw: Vec<f32> = (0..k)
                .map(|i| {
                    let d = i as f32 - center;
                    (-(d * d) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let sum: f32 = raw.iter().sum();
            raw.into_iter().map(|v| v / sum).collect()
        }
    }
}

/// Separable Gaussian blur with reflect-101 borders.
///
/// Kernel sizes above [`MAX_EDGE_KERNEL_SIZE`] are clamped to it.
pub fn gaussian_blur(src: &[u8], width: usize, height: usize, kernel_size: usize) -> Vec<u8> {
    let taps = gaussian_taps(kernel_size.min(MAX_EDGE_KERNEL_SIZE));
    let radius = (taps.len() / 2) as isize;

    let mut horizontal = vec![0f32; width * height];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            horizontal[y * width + x] = taps
                .iter()
                .enumerate()
                .map(|(k, &t)| {
                    let sx = reflect_101(x as isize + k as isize - radius, width);
                    row[sx] as f32 * t
                })
                .sum();
        }
    }

    let mut out = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let v: f32 = taps
                .iter()
                .enumerate()
                .map(|(k, &t)| {
                    let sy = reflect_101(y as isize + k as isize - radius, height);
                    horizontal[sy * width + x] * t
                })
                .sum();
            out[y * width + x] = saturate(v as f64);
        }
    }
    out
}

/// 3x3 median filter with replicated borders.
pub fn median_blur3(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    let mut window = [0u8; 9];
    for y in 0..height {
        let ys = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
        for x in 0..width {
            let xs = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
            for (i, &yy) in ys.iter().enumerate() {
                for (j, &xx) in xs.iter().enumerate() {
                    window[i * 3 + j] = src[yy * width + xx];
                }
            }
            window.sort_unstable();
            out[y * width + x] = window[4];
        }
    }
    out
}

/// 3x3 Sobel derivatives with reflect-101 borders.
pub fn sobel(src: &[u8], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let mut gx = vec![0f32; width * height];
    let mut gy = vec![0f32; width * height];
    for y in 0..height {
        let ys = [
            reflect_101(y as isize - 1, height),
            y,
            reflect_101(y as isize + 1, height),
        ];
        for x in 0..width {
            let xs = [
                reflect_101(x as isize - 1, width),
                x,
                reflect_101(x as isize + 1, width),
            ];
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, &yy) in ys.iter().enumerate() {
                for (kx, &xx) in xs.iter().enumerate() {
                    let v = src[yy * width + xx] as f32;
                    sum_x += v * SOBEL_X[ky][kx];
                    sum_y += v * SOBEL_Y[ky][kx];
                }
            }
            gx[y * width + x] = sum_x;
            gy[y * width + x] = sum_y;
        }
    }
    (gx, gy)
}

/// Canny edge extraction from precomputed gradients.
///
/// Magnitude is `|gx| + |gy|`. A pixel survives non-maximum suppression if it
/// beats the previous neighbor along the gradient and is not beaten by the
/// next one. Pixels above `high` seed edges; pixels above `low` join an edge
/// when 8-connected to one.
pub fn canny(gx: &[f32], gy: &[f32], width: usize, height: usize, low: f32, high: f32) -> Vec<u8> {
    const WEAK: u8 = 1;
    const STRONG: u8 = 2;

    let mag: Vec<f32> = gx.iter().zip(gy).map(|(x, y)| x.abs() + y.abs()).collect();
    let at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            mag[y as usize * width + x as usize]
        }
    };

    let mut state = vec![0u8; width * height];
    let mut stack = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = mag[idx];
            if m <= low {
                continue;
            }

            let (xi, yi) = (x as isize, y as isize);
            let abs_gx = gx[idx].abs();
            let abs_gy = gy[idx].abs();
            let (prev, next) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (at(xi - 1, yi), at(xi + 1, yi))
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (at(xi, yi - 1), at(xi, yi + 1))
            } else if (gx[idx] > 0.0) == (gy[idx] > 0.0) {
                (at(xi - 1, yi - 1), at(xi + 1, yi + 1))
            } else {
                (at(xi + 1, yi - 1), at(xi - 1, yi + 1))
            };

            if m > prev && m >= next {
                if m > high {
                    state[idx] = STRONG;
                    stack.push(idx);
                } else {
                    state[idx] = WEAK;
                }
            }
        }
    }

    let mut mask = vec![0u8; width * height];
    for &idx in &stack {
        mask[idx] = EDGE;
    }
    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if state[n] == WEAK && mask[n] == 0 {
                    mask[n] = EDGE;
                    stack.push(n);
                }
            }
        }
    }

    mask
}
