use crate::binder::{SceneBinder, SceneTransform};
use crate::normalize::{AxisRanges, NormalizedOffset};
use crate::pointer::{PointerSample, PointerSampler, ViewportBounds};
use crate::preset::SceneConfig;
use crate::spring::{SmoothedOffset, SpringConfig};
use glam::Vec2;

/// Pointer → normalized → smoothed → bound chain for one view.
///
/// Event handlers call [`record`](Self::record) / [`resize`](Self::resize);
/// the frame loop calls [`tick`](Self::tick). The target is recomputed from
/// the latest sample and bounds on every tick, never cached between ticks.
#[derive(Clone, Debug)]
pub struct ParallaxMapper {
    sampler: PointerSampler,
    ranges: AxisRanges,
    smoothed: SmoothedOffset,
    binder: SceneBinder,
    spotlight: bool,
}

impl ParallaxMapper {
    pub fn new(
        bounds: ViewportBounds,
        ranges: AxisRanges,
        spring: SpringConfig,
        binder: SceneBinder,
    ) -> Self {
        let sampler = PointerSampler::new(bounds);
        let initial = sampler.normalized(&ranges);
        Self {
            sampler,
            ranges,
            smoothed: SmoothedOffset::new(spring, initial),
            binder,
            spotlight: false,
        }
    }

    pub fn from_config(bounds: ViewportBounds, config: &SceneConfig) -> Self {
        let mut m = Self::new(bounds, config.ranges, config.spring, config.binder.clone());
        m.spotlight = config.spotlight;
        m
    }

    pub fn record(&mut self, x: f32, y: f32, timestamp_ms: f64) -> PointerSample {
        self.sampler.record(x, y, timestamp_ms)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sampler.resize(width, height);
    }

    pub fn sampler(&self) -> &PointerSampler {
        &self.sampler
    }

    pub fn target(&self) -> NormalizedOffset {
        self.sampler.normalized(&self.ranges)
    }

    pub fn smoothed(&self) -> Vec2 {
        self.smoothed.value()
    }

    pub fn is_settled(&self) -> bool {
        self.smoothed.is_at_rest(self.target())
    }

    /// Advance the springs by `dt_sec` and bind the result.
    pub fn tick(&mut self, dt_sec: f32) -> SceneTransform {
        let target = self.target();
        let value = self.smoothed.step(target, dt_sec);
        let mut out = self.binder.apply(value);
        if self.spotlight {
            out.spotlight = self.sampler.latest().map(|s| Vec2::new(s.x, s.y));
        }
        out
    }
}
