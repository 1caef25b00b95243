use crate::constants::{FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};
use crate::normalize::{normalize, resting_offset, AxisRanges, NormalizedOffset};

/// Raw pointer position in CSS pixels relative to the viewport origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    /// Host timestamp in milliseconds (event time, not wall clock).
    pub timestamp_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportBounds {
    pub width: f32,
    pub height: f32,
}

impl ViewportBounds {
    pub const FALLBACK: Self = Self {
        width: FALLBACK_VIEWPORT_WIDTH,
        height: FALLBACK_VIEWPORT_HEIGHT,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// These bounds if measured, otherwise the 1920×1080 fallback.
    #[inline]
    pub fn or_fallback(self) -> Self {
        if self.is_measured() {
            self
        } else {
            Self::FALLBACK
        }
    }
}

/// Holds the latest pointer sample for one view together with the viewport
/// it was measured against.
///
/// Every movement overwrites the sample; nothing is filtered here. Readers
/// call [`PointerSampler::normalized`] on each tick so they always see the
/// newest position and the newest bounds.
#[derive(Clone, Debug, Default)]
pub struct PointerSampler {
    bounds: ViewportBounds,
    latest: Option<PointerSample>,
}

impl PointerSampler {
    pub fn new(bounds: ViewportBounds) -> Self {
        Self {
            bounds,
            latest: None,
        }
    }

    /// Record a movement; coordinates are clamped into the viewport.
    pub fn record(&mut self, x: f32, y: f32, timestamp_ms: f64) -> PointerSample {
        let b = self.bounds.or_fallback();
        let clamp = |v: f32, hi: f32| if v.is_finite() { v.clamp(0.0, hi) } else { hi * 0.5 };
        let sample = PointerSample {
            x: clamp(x, b.width),
            y: clamp(y, b.height),
            timestamp_ms,
        };
        self.latest = Some(sample);
        sample
    }

    /// Replace the viewport bounds. The stored sample is re-clamped so it
    /// stays inside the new viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = ViewportBounds::new(width, height);
        if let Some(s) = self.latest {
            self.record(s.x, s.y, s.timestamp_ms);
        }
        log::debug!("[pointer] viewport {}x{}", width, height);
    }

    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    pub fn latest(&self) -> Option<PointerSample> {
        self.latest
    }

    /// Latest sample mapped onto `ranges`; the range midpoint before any
    /// movement has been seen.
    pub fn normalized(&self, ranges: &AxisRanges) -> NormalizedOffset {
        match &self.latest {
            Some(s) => normalize(s, self.bounds, ranges),
            None => resting_offset(ranges),
        }
    }
}
