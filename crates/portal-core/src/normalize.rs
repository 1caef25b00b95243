use crate::error::{PortalError, Result};
use crate::pointer::{PointerSample, ViewportBounds};
use glam::Vec2;

/// Closed interval a normalized axis maps onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputRange {
    pub min: f32,
    pub max: f32,
}

impl OutputRange {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(PortalError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `[-half, half]`; `half` must be positive.
    pub const fn symmetric(half: f32) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Linear map of `t` in \[0, 1\] onto the range. `t` is clamped first so
    /// the result never leaves the range.
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
        self.min + self.span() * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRanges {
    pub x: OutputRange,
    pub y: OutputRange,
}

impl AxisRanges {
    pub const fn symmetric(half_x: f32, half_y: f32) -> Self {
        Self {
            x: OutputRange::symmetric(half_x),
            y: OutputRange::symmetric(half_y),
        }
    }
}

/// Pointer position expressed in output-range units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedOffset {
    pub x: f32,
    pub y: f32,
}

impl NormalizedOffset {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Map a raw pixel sample onto `ranges`, `[0, width] -> [x.min, x.max]` and
/// `[0, height] -> [y.min, y.max]`. Unmeasured bounds use the fallback
/// viewport; positions outside the viewport clamp to the range ends.
pub fn normalize(
    sample: &PointerSample,
    bounds: ViewportBounds,
    ranges: &AxisRanges,
) -> NormalizedOffset {
    let bounds = bounds.or_fallback();
    NormalizedOffset {
        x: ranges.x.lerp(sample.x / bounds.width),
        y: ranges.y.lerp(sample.y / bounds.height),
    }
}

/// Offset for a viewport with no pointer activity yet: the range midpoint.
pub fn resting_offset(ranges: &AxisRanges) -> NormalizedOffset {
    NormalizedOffset {
        x: ranges.x.lerp(0.5),
        y: ranges.y.lerp(0.5),
    }
}
