//! Glyph ramp and edge glyph definitions.

/// Luminance ramp (10 levels), ordered from darkest (space) to brightest (#).
/// Every glyph here has a bitmap in [`super::font`].
pub const GLYPH_RAMP: &[char] = &[' ', '.', 'i', 'c', 'o', 'P', 'O', '?', '@', '#'];

/// Map an average luminance to an index into a ramp of `levels` glyphs.
///
/// Monotonic: a brighter input never yields a smaller index.
#[inline]
pub fn ramp_index(luminance: u8, levels: usize) -> usize {
    if levels == 0 {
        return 0;
    }
    (luminance as usize * (levels - 1)) / 255
}

/// Map an average luminance to a glyph from [`GLYPH_RAMP`].
#[inline]
pub fn ramp_glyph(luminance: u8) -> char {
    GLYPH_RAMP[ramp_index(luminance, GLYPH_RAMP.len())]
}

/// Orientation of a detected edge, as drawn by the edge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOrientation {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `/`
    ForwardDiagonal,
    /// `\`
    BackDiagonal,
}

impl EdgeOrientation {
    pub fn glyph(&self) -> char {
        match self {
            EdgeOrientation::Vertical => '|',
            EdgeOrientation::Horizontal => '-',
            EdgeOrientation::ForwardDiagonal => '/',
            EdgeOrientation::BackDiagonal => '\\',
        }
    }

    /// Classify a gradient angle in degrees, in `(-180, 180]`.
    ///
    /// Buckets are tested in order; open intervals, so exact boundaries fall
    /// through to the next test:
    /// ```text
    /// |a| < 22.5 or |a| > 157.5       -> Vertical
    /// 67.5 < |a| < 112.5              -> Horizontal
    /// 0 < a < 67.5 or -180 < a < -112.5 -> ForwardDiagonal
    /// otherwise                       -> BackDiagonal
    /// ```
    pub fn from_angle(angle: f32) -> Self {
        let abs = angle.abs();
        if abs < 22.5 || abs > 157.5 {
            EdgeOrientation::Vertical
        } else if abs > 67.5 && abs < 112.5 {
            EdgeOrientation::Horizontal
        } else if (angle > 0.0 && angle < 67.5) || (angle < -112.5 && angle > -180.0) {
            EdgeOrientation::ForwardDiagonal
        } else {
            EdgeOrientation::BackDiagonal
        }
    }

    /// Classify a gradient vector.
    pub fn from_gradient(gx: f32, gy: f32) -> Self {
        Self::from_angle(gy.atan2(gx).to_degrees())
    }
}
